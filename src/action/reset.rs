use super::{Action, ActionEvent, ActionOptions, Lifecycle, PopoverNotifier, Snapshot};
use crate::error::ActionError;
use std::cell::RefCell;
use std::rc::Rc;

/// Puts its model back the way it was when the action was built.
///
/// `invoke` ends in `success` before it returns, or in `error` if a listener
/// left the model borrowed.
pub struct ResetAction<M: Snapshot> {
    lifecycle: Rc<Lifecycle>,
    notifier: Option<Rc<RefCell<PopoverNotifier>>>,
    model: Rc<RefCell<M>>,
    backup: M::Backup,
}

impl<M: Snapshot> ResetAction<M> {
    pub fn new(model: Rc<RefCell<M>>, options: ActionOptions) -> Result<Self, ActionError> {
        let (lifecycle, notifier) = options.build();
        let backup = model
            .try_borrow()
            .map_err(|_| ActionError::ModelBorrowed(lifecycle.name().to_string()))?
            .backup();
        Ok(Self {
            lifecycle,
            notifier,
            model,
            backup,
        })
    }

    pub fn backup(&self) -> &M::Backup {
        &self.backup
    }
}

impl<M: Snapshot> Action for ResetAction<M> {
    fn lifecycle(&self) -> &Rc<Lifecycle> {
        &self.lifecycle
    }

    fn notifier(&self) -> Option<&Rc<RefCell<PopoverNotifier>>> {
        self.notifier.as_ref()
    }

    fn invoke(&self) -> Result<(), ActionError> {
        let borrowed = || ActionError::ModelBorrowed(self.name().to_string());
        // Listeners may read the model during `invoke`, so no borrow is held across it.
        drop(self.model.try_borrow_mut().map_err(|_| borrowed())?);
        self.lifecycle.emit(ActionEvent::Invoke);
        // An invoke listener that leaves the model borrowed ends the run as failed.
        let Ok(mut model) = self.model.try_borrow_mut() else {
            log::warn!("Action '{}' could not restore a borrowed model", self.name());
            self.lifecycle.emit(ActionEvent::Error);
            return Err(borrowed());
        };
        model.restore(&self.backup);
        drop(model);
        log::info!("Action '{}' restored its model", self.name());
        self.lifecycle.emit(ActionEvent::Success);
        Ok(())
    }
}
