//! UI actions and their feedback.
//!
//! An action couples "perform an operation" to "report its outcome". Every
//! action emits the same three events through its [`Lifecycle`]:
//!
//! - `invoke`, synchronously, before the operation starts;
//! - then exactly one of `success` or `error` once the operation finishes.
//!
//! Save and call failures are reported only through the `error` event, never
//! as an `Err` from [`Action::invoke`]. With no listener attached a failure is
//! silent apart from the `log` warning. A [`PopoverNotifier`] is the opt-in
//! listener that turns these events into user-facing text.
//!
//! ```rust
//! use campaign_routing::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let routing = Rc::new(RefCell::new(CampaignRouting::new("campaign-1")));
//! let reset = ResetAction::new(
//!     Rc::clone(&routing),
//!     ActionOptions::named("Reset").with_notifier(NotifierOptions::default()),
//! )
//! .unwrap();
//!
//! routing.borrow_mut().attributes_mut().insert("name".into(), "draft".into());
//! reset.invoke().unwrap();
//!
//! assert_eq!(reset.state(), ActionState::Succeeded);
//! assert_eq!(reset.notifier().unwrap().borrow().text(), "Reset successful!");
//! ```
pub mod binding;
pub mod call;
pub mod lifecycle;
pub mod notifier;
pub mod reset;
pub mod save;
pub mod transport;

pub use binding::*;
pub use call::*;
pub use lifecycle::*;
pub use notifier::*;
pub use reset::*;
pub use save::*;
pub use transport::*;

use crate::error::ActionError;
use std::cell::RefCell;
use std::rc::Rc;

/// Name used when an action is built without one.
pub const DEFAULT_ACTION_NAME: &str = "Unnamed";

/// Options shared by every action type.
#[derive(Default)]
pub struct ActionOptions {
    pub name: Option<String>,
    /// Attaches a `PopoverNotifier` when set.
    pub notifier: Option<NotifierOptions>,
}

impl ActionOptions {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: NotifierOptions) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Builds the lifecycle and, if requested, its notifier.
    pub(crate) fn build(self) -> (Rc<Lifecycle>, Option<Rc<RefCell<PopoverNotifier>>>) {
        let lifecycle = Lifecycle::new(
            self.name
                .unwrap_or_else(|| DEFAULT_ACTION_NAME.to_string()),
        );
        let notifier = self
            .notifier
            .map(|options| PopoverNotifier::attach(&lifecycle, options));
        (lifecycle, notifier)
    }
}

/// A triggerable operation with an `invoke`/`success`/`error` lifecycle.
pub trait Action {
    fn lifecycle(&self) -> &Rc<Lifecycle>;

    /// Starts the operation. Returns `Err` only for programmer errors.
    fn invoke(&self) -> Result<(), ActionError>;

    fn notifier(&self) -> Option<&Rc<RefCell<PopoverNotifier>>>;

    fn name(&self) -> &str {
        self.lifecycle().name()
    }

    fn state(&self) -> ActionState {
        self.lifecycle().state()
    }

    fn on(&self, event: ActionEvent, listener: impl Fn(ActionEvent) + 'static) -> Subscription
    where
        Self: Sized,
    {
        self.lifecycle().subscribe(Some(event), listener)
    }

    fn on_any(&self, listener: impl Fn(ActionEvent) + 'static) -> Subscription
    where
        Self: Sized,
    {
        self.lifecycle().subscribe(None, listener)
    }

    fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.lifecycle().unsubscribe(subscription)
    }

    /// The trigger's click binding: invoke, then stop the default navigation.
    fn click(&self, event: &mut ClickEvent) -> Result<(), ActionError> {
        let result = self.invoke();
        event.prevent_default();
        result
    }
}
