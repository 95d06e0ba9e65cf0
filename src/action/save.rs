use super::{
    Action, ActionEvent, ActionOptions, Lifecycle, Persistable, PopoverNotifier, SaveRequest, Store,
};
use crate::error::ActionError;
use std::cell::RefCell;
use std::rc::Rc;

/// Saves its model through a `Store`.
pub struct SaveAction<M: Persistable> {
    lifecycle: Rc<Lifecycle>,
    notifier: Option<Rc<RefCell<PopoverNotifier>>>,
    model: Rc<RefCell<M>>,
    store: Rc<dyn Store>,
    session_id: Option<String>,
}

impl<M: Persistable> SaveAction<M> {
    pub fn new(model: Rc<RefCell<M>>, store: Rc<dyn Store>, options: ActionOptions) -> Self {
        let (lifecycle, notifier) = options.build();
        Self {
            lifecycle,
            notifier,
            model,
            store,
            session_id: None,
        }
    }

    /// Scopes every save to a session.
    pub fn with_session_id(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}

impl<M: Persistable> Action for SaveAction<M> {
    fn lifecycle(&self) -> &Rc<Lifecycle> {
        &self.lifecycle
    }

    fn notifier(&self) -> Option<&Rc<RefCell<PopoverNotifier>>> {
        self.notifier.as_ref()
    }

    fn invoke(&self) -> Result<(), ActionError> {
        let request = {
            let model = self
                .model
                .try_borrow()
                .map_err(|_| ActionError::ModelBorrowed(self.name().to_string()))?;
            SaveRequest {
                key: model.persistence_key().to_string(),
                body: model.to_document(),
                session_id: self.session_id.clone(),
            }
        };

        log::info!("Saving '{}' via action '{}'", request.key, self.name());
        self.lifecycle.emit(ActionEvent::Invoke);

        let lifecycle = Rc::clone(&self.lifecycle);
        self.store.save(
            request,
            Box::new(move |result| match result {
                Ok(()) => lifecycle.emit(ActionEvent::Success),
                Err(error) => lifecycle.fail(error),
            }),
        );
        Ok(())
    }
}
