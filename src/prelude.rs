//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! campaign_routing crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use campaign_routing::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/routing.json")?;
//! let mut routing = parse(&json)?;
//!
//! routing.connect(Connection::new("c2", "E1", "E3"))?;
//! println!("{}", serialize(&routing));
//! # Ok(())
//! # }
//! ```

// Entity graph
pub use crate::model::{
    Attributes, BlockSide, CampaignRouting, Channel, Collection, Connection, Conversation,
    Endpoint, EndpointOwner, Keyed, RoutingBlock, State, StateKind,
};

// Persistence document
pub use crate::document::{IntoRouting, RoutingDocument, parse, parse_value, serialize, to_value};

// Actions and notifiers
pub use crate::action::{
    Action, ActionEvent, ActionOptions, ActionState, CallAction, CallConfig, CallRequest,
    ClickEvent, Completion, MessageTemplate, NotifierOptions, NotifierView, Persistable, Popover,
    PopoverNotifier, ResetAction, SaveAction, SaveRequest, Snapshot, Store, Subscription,
    Transport, TriggerElement,
};

// Error types
pub use crate::error::{
    ActionError, ErrorKind, GoError, RoutingError, SchemaError, TransportError, ValidationError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
