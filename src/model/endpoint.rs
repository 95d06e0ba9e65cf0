use super::{Attributes, Keyed};

/// An addressable connection point on a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub uuid: String,
    /// Document fields beyond `uuid`, kept verbatim.
    pub attributes: Attributes,
}

impl Endpoint {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }
}

impl Keyed for Endpoint {
    fn key(&self) -> &str {
        &self.uuid
    }
}

/// A routing entry: a wire between two endpoints, stored as `[source, target]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub uuid: String,
    pub source: String,
    pub target: String,
    pub attributes: Attributes,
}

impl Connection {
    pub fn new(
        uuid: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            source: source.into(),
            target: target.into(),
            attributes: Attributes::new(),
        }
    }

    /// Both endpoint ids, source first.
    pub fn endpoints(&self) -> [&str; 2] {
        [&self.source, &self.target]
    }

    pub fn touches(&self, endpoint_id: &str) -> bool {
        self.source == endpoint_id || self.target == endpoint_id
    }
}

impl Keyed for Connection {
    fn key(&self) -> &str {
        &self.uuid
    }
}
