//! The typed entity graph of a campaign's routing configuration.
pub mod collection;
pub mod endpoint;
pub mod routing;
pub mod state;

pub use collection::*;
pub use endpoint::*;
pub use routing::*;
pub use state::*;

/// Free-form document fields carried alongside an entity's declared fields.
pub type Attributes = serde_json::Map<String, serde_json::Value>;
