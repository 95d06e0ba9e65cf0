use thiserror::Error;

mod family;

pub use family::{ErrorKind, GoError};

/// Errors raised while reading a persistence document into the entity graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Failed to parse routing JSON: {0}")]
    JsonParseError(String),

    #[error("Routing document has no '{0}' field")]
    MissingField(&'static str),

    #[error("Entity in '{collection}' at index {index} has no 'uuid'")]
    MissingId {
        collection: &'static str,
        index: usize,
    },

    #[error("Field '{field}' has the wrong shape: {message}")]
    InvalidShape {
        field: &'static str,
        message: String,
    },
}

/// Violations of the entity graph's referential and ownership invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error(
        "Endpoint '{endpoint_id}' not found, which is required by routing entry '{connection_id}'"
    )]
    EndpointNotFound {
        endpoint_id: String,
        connection_id: String,
    },

    #[error("Routing entry '{0}' connects an endpoint to itself")]
    SelfConnection(String),

    #[error("Endpoint '{endpoint_id}' is already owned by {owner}")]
    EndpointAlreadyOwned { endpoint_id: String, owner: String },

    #[error("Endpoint '{endpoint_id}' is still referenced by routing entry '{connection_id}'")]
    EndpointInUse {
        endpoint_id: String,
        connection_id: String,
    },

    #[error("Endpoint '{0}' does not exist in this campaign")]
    UnknownEndpoint(String),

    #[error("State '{0}' does not exist in this campaign")]
    UnknownState(String),
}

/// Umbrella error for operations that both parse and validate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failures reported by a `Store` or `Transport` collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Request to '{url}' failed: {message}")]
    Network { url: String, message: String },

    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },
}

/// Programmer errors surfaced synchronously by `Action::invoke`.
///
/// Expected failures (network, server) never appear here; they are reported
/// through the action's `error` event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Action '{0}' could not access its model: it is already mutably borrowed")]
    ModelBorrowed(String),
}
