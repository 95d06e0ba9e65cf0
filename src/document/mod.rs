//! Reading and writing the per-campaign persistence document.
//!
//! The document is one JSON object keyed by `campaign_id` with four top-level
//! arrays: `channels`, `routing_blocks`, `conversations` and `routing_entries`.
//! Parsing goes through the raw serde structs in [`types`] and the
//! [`IntoRouting`] conversion, which validates the resulting graph. Writing is
//! the hand-built inverse in [`routing_to_value`].
pub mod conversion;
pub mod types;

pub use conversion::*;
pub use types::*;

use crate::error::{RoutingError, SchemaError};
use crate::model::CampaignRouting;
use serde_json::Value;

/// Parses a JSON document into a validated aggregate.
pub fn parse(json: &str) -> Result<CampaignRouting, RoutingError> {
    let document: RoutingDocument =
        serde_json::from_str(json).map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
    document.into_routing()
}

/// Same as [`parse`], for an already-decoded JSON value.
pub fn parse_value(value: Value) -> Result<CampaignRouting, RoutingError> {
    if !value.is_object() {
        return Err(SchemaError::InvalidShape {
            field: "document",
            message: "expected a JSON object".to_string(),
        }
        .into());
    }
    let document: RoutingDocument =
        serde_json::from_value(value).map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
    document.into_routing()
}

/// Serializes an aggregate back into its JSON document.
pub fn serialize(routing: &CampaignRouting) -> String {
    routing_to_value(routing).to_string()
}

/// Serializes an aggregate into a `serde_json::Value`.
pub fn to_value(routing: &CampaignRouting) -> Value {
    routing_to_value(routing)
}
