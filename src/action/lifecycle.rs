use crate::error::TransportError;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// The three events every action emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionEvent {
    Invoke,
    Success,
    Error,
}

impl fmt::Display for ActionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionEvent::Invoke => write!(f, "invoke"),
            ActionEvent::Success => write!(f, "success"),
            ActionEvent::Error => write!(f, "error"),
        }
    }
}

/// `Idle -> Invoking -> {Succeeded, Failed}`. A finished action may be invoked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Invoking,
    Succeeded,
    Failed,
}

impl ActionState {
    fn after(event: ActionEvent) -> Self {
        match event {
            ActionEvent::Invoke => ActionState::Invoking,
            ActionEvent::Success => ActionState::Succeeded,
            ActionEvent::Error => ActionState::Failed,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Rc<dyn Fn(ActionEvent)>;

/// Event dispatch and state for one action instance.
///
/// Shared behind an `Rc` so completion callbacks handed to a store or a
/// transport can report back after `invoke` has returned.
pub struct Lifecycle {
    name: String,
    state: Cell<ActionState>,
    last_error: RefCell<Option<TransportError>>,
    listeners: RefCell<Vec<(Subscription, Option<ActionEvent>, Listener)>>,
    next_id: Cell<u64>,
}

impl Lifecycle {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            state: Cell::new(ActionState::Idle),
            last_error: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ActionState {
        self.state.get()
    }

    /// The failure behind the most recent `error` event, cleared on `invoke`.
    pub fn last_error(&self) -> Option<TransportError> {
        self.last_error.borrow().clone()
    }

    /// Listens to one event, or to all three when `event` is `None`.
    pub fn subscribe(
        &self,
        event: Option<ActionEvent>,
        listener: impl Fn(ActionEvent) + 'static,
    ) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .push((id, event, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _, _)| *id != subscription);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Moves to the event's state and notifies matching listeners in subscription order.
    pub fn emit(&self, event: ActionEvent) {
        self.state.set(ActionState::after(event));
        if event == ActionEvent::Invoke {
            *self.last_error.borrow_mut() = None;
        }
        log::debug!("Action '{}' -> {}", self.name, event);

        // Listeners may subscribe or unsubscribe while being notified.
        let targets: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, filter, _)| filter.is_none_or(|wanted| wanted == event))
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        for listener in targets {
            listener(event);
        }
    }

    pub(crate) fn fail(&self, error: TransportError) {
        log::warn!("Action '{}' failed: {}", self.name, error);
        *self.last_error.borrow_mut() = Some(error);
        self.emit(ActionEvent::Error);
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("name", &self.name)
            .field("state", &self.state.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
