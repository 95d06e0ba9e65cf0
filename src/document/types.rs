use crate::model::Attributes;
use serde::Deserialize;

/// Endpoint as it appears in a persistence document
#[derive(Debug, Deserialize, Clone)]
pub struct RawEndpoint {
    pub uuid: Option<String>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Channel entry of the `channels` array
#[derive(Debug, Deserialize, Clone)]
pub struct RawChannel {
    pub uuid: Option<String>,
    #[serde(default)]
    pub endpoints: Option<Vec<RawEndpoint>>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Routing block entry of the `routing_blocks` array
#[derive(Debug, Deserialize, Clone)]
pub struct RawRoutingBlock {
    pub uuid: Option<String>,
    #[serde(default)]
    pub conversation_endpoints: Option<Vec<RawEndpoint>>,
    #[serde(default)]
    pub channel_endpoints: Option<Vec<RawEndpoint>>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Conversation entry of the `conversations` array
#[derive(Debug, Deserialize, Clone)]
pub struct RawConversation {
    pub uuid: Option<String>,
    #[serde(default)]
    pub endpoints: Option<Vec<RawEndpoint>>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Routing entry with its `[source, target]` endpoint ids
#[derive(Debug, Deserialize, Clone)]
pub struct RawRoutingEntry {
    pub uuid: Option<String>,
    #[serde(default)]
    pub endpoints: Option<Vec<String>>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Complete persistence document for one campaign.
///
/// Collection keys that are absent or `null` read as empty collections.
#[derive(Debug, Deserialize, Clone)]
pub struct RoutingDocument {
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub channels: Option<Vec<RawChannel>>,
    #[serde(default)]
    pub routing_blocks: Option<Vec<RawRoutingBlock>>,
    #[serde(default)]
    pub conversations: Option<Vec<RawConversation>>,
    #[serde(default)]
    pub routing_entries: Option<Vec<RawRoutingEntry>>,
    #[serde(flatten)]
    pub attributes: Attributes,
}
