use super::types::*;
use crate::error::{RoutingError, SchemaError};
use crate::model::{
    Attributes, CampaignRouting, Channel, Collection, Connection, Conversation, Endpoint,
    RoutingBlock,
};
use serde_json::Value;

/// A trait for document formats that can be converted into a `CampaignRouting`.
///
/// `RoutingDocument` implements it for the standard persistence format. Other
/// formats (an older export layout, a test fixture builder) can implement it to
/// reuse the aggregate's validation.
pub trait IntoRouting {
    /// Consumes the document and builds a validated aggregate.
    fn into_routing(self) -> Result<CampaignRouting, RoutingError>;
}

impl IntoRouting for RoutingDocument {
    fn into_routing(self) -> Result<CampaignRouting, RoutingError> {
        let campaign_id = self
            .campaign_id
            .ok_or(SchemaError::MissingField("campaign_id"))?;

        let channels = self
            .channels
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| -> Result<Channel, SchemaError> {
                Ok(Channel {
                    uuid: require_id(raw.uuid, "channels", index)?,
                    endpoints: endpoints(raw.endpoints, "channels.endpoints")?,
                    attributes: raw.attributes,
                })
            })
            .collect::<Result<Collection<_>, SchemaError>>()?;

        let routing_blocks = self
            .routing_blocks
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| -> Result<RoutingBlock, SchemaError> {
                Ok(RoutingBlock {
                    uuid: require_id(raw.uuid, "routing_blocks", index)?,
                    conversation_endpoints: endpoints(
                        raw.conversation_endpoints,
                        "routing_blocks.conversation_endpoints",
                    )?,
                    channel_endpoints: endpoints(
                        raw.channel_endpoints,
                        "routing_blocks.channel_endpoints",
                    )?,
                    attributes: raw.attributes,
                })
            })
            .collect::<Result<Collection<_>, SchemaError>>()?;

        let conversations = self
            .conversations
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| -> Result<Conversation, SchemaError> {
                Ok(Conversation {
                    uuid: require_id(raw.uuid, "conversations", index)?,
                    endpoints: endpoints(raw.endpoints, "conversations.endpoints")?,
                    attributes: raw.attributes,
                })
            })
            .collect::<Result<Collection<_>, SchemaError>>()?;

        let routing_entries = self
            .routing_entries
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| -> Result<Connection, SchemaError> {
                let uuid = require_id(raw.uuid, "routing_entries", index)?;
                let [source, target] = endpoint_pair(raw.endpoints, &uuid)?;
                Ok(Connection {
                    uuid,
                    source,
                    target,
                    attributes: raw.attributes,
                })
            })
            .collect::<Result<Collection<_>, SchemaError>>()?;

        log::debug!(
            "Read campaign '{}': {} channels, {} routing blocks, {} conversations, {} routing entries",
            campaign_id,
            channels.len(),
            routing_blocks.len(),
            conversations.len(),
            routing_entries.len()
        );

        CampaignRouting::from_parts(
            campaign_id,
            channels,
            routing_blocks,
            conversations,
            routing_entries,
            self.attributes,
        )
        .map_err(RoutingError::from)
    }
}

fn require_id(
    uuid: Option<String>,
    collection: &'static str,
    index: usize,
) -> Result<String, SchemaError> {
    uuid.ok_or(SchemaError::MissingId { collection, index })
}

fn endpoints(
    raw: Option<Vec<RawEndpoint>>,
    collection: &'static str,
) -> Result<Collection<Endpoint>, SchemaError> {
    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, raw)| -> Result<Endpoint, SchemaError> {
            Ok(Endpoint {
                uuid: require_id(raw.uuid, collection, index)?,
                attributes: raw.attributes,
            })
        })
        .collect()
}

fn endpoint_pair(raw: Option<Vec<String>>, uuid: &str) -> Result<[String; 2], SchemaError> {
    let ids = raw.unwrap_or_default();
    let count = ids.len();
    <[String; 2]>::try_from(ids).map_err(|_| SchemaError::InvalidShape {
        field: "routing_entries.endpoints",
        message: format!(
            "routing entry '{}' must reference exactly 2 endpoints, found {}",
            uuid, count
        ),
    })
}

fn object(attributes: &Attributes, fields: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    let mut map = attributes.clone();
    for (key, value) in fields {
        map.insert(key.to_string(), value);
    }
    Value::Object(map)
}

fn endpoint_list(endpoints: &Collection<Endpoint>) -> Value {
    Value::Array(
        endpoints
            .iter()
            .map(|e| object(&e.attributes, [("uuid", Value::from(e.uuid.as_str()))]))
            .collect(),
    )
}

/// Builds the persistence document for an aggregate.
pub fn routing_to_value(routing: &CampaignRouting) -> Value {
    let channels = routing
        .channels()
        .iter()
        .map(|c| {
            object(
                &c.attributes,
                [
                    ("uuid", Value::from(c.uuid.as_str())),
                    ("endpoints", endpoint_list(&c.endpoints)),
                ],
            )
        })
        .collect();

    let routing_blocks = routing
        .routing_blocks()
        .iter()
        .map(|b| {
            object(
                &b.attributes,
                [
                    ("uuid", Value::from(b.uuid.as_str())),
                    (
                        "conversation_endpoints",
                        endpoint_list(&b.conversation_endpoints),
                    ),
                    ("channel_endpoints", endpoint_list(&b.channel_endpoints)),
                ],
            )
        })
        .collect();

    let conversations = routing
        .conversations()
        .iter()
        .map(|c| {
            object(
                &c.attributes,
                [
                    ("uuid", Value::from(c.uuid.as_str())),
                    ("endpoints", endpoint_list(&c.endpoints)),
                ],
            )
        })
        .collect();

    let routing_entries = routing
        .routing_entries()
        .iter()
        .map(|r| {
            object(
                &r.attributes,
                [
                    ("uuid", Value::from(r.uuid.as_str())),
                    (
                        "endpoints",
                        Value::from(vec![r.source.as_str(), r.target.as_str()]),
                    ),
                ],
            )
        })
        .collect();

    object(
        routing.attributes(),
        [
            ("campaign_id", Value::from(routing.campaign_id())),
            ("channels", Value::Array(channels)),
            ("routing_blocks", Value::Array(routing_blocks)),
            ("conversations", Value::Array(conversations)),
            ("routing_entries", Value::Array(routing_entries)),
        ],
    )
}
