use crate::error::TransportError;
use crate::model::Attributes;
use ahash::AHashMap;
use serde_json::Value;

/// Callback a collaborator runs exactly once when its operation finishes.
pub type Completion<T> = Box<dyn FnOnce(Result<T, TransportError>)>;

/// What a `SaveAction` hands to its store.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub key: String,
    pub body: Value,
    pub session_id: Option<String>,
}

/// Persists models. Implementations may complete synchronously or later.
pub trait Store {
    fn save(&self, request: SaveRequest, done: Completion<()>);
}

/// A fully merged remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    pub method: String,
    /// `None` leaves the target to the transport (typically the current page).
    pub url: Option<String>,
    pub data: Value,
    /// Transport-specific options that are not url, method or data.
    pub options: Attributes,
}

/// Issues remote calls. Implementations may complete synchronously or later.
pub trait Transport {
    fn send(&self, request: CallRequest, done: Completion<Value>);
}

/// The UI element an action is bound to. Only its attributes are modelled.
#[derive(Debug, Clone, Default)]
pub struct TriggerElement {
    attributes: AHashMap<String, String>,
}

impl TriggerElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn data_url(&self) -> Option<&str> {
        self.attr("data-url")
    }
}

/// A click on a trigger element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickEvent {
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
