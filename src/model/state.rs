use super::{Attributes, Collection, Endpoint, Keyed};
use std::fmt;

/// The concrete node types of a routing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Channel,
    RoutingBlock,
    Conversation,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKind::Channel => write!(f, "channel"),
            StateKind::RoutingBlock => write!(f, "routing block"),
            StateKind::Conversation => write!(f, "conversation"),
        }
    }
}

/// Which of a routing block's two endpoint collections is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockSide {
    Conversation,
    Channel,
}

/// Any node that owns endpoints.
pub trait State: Keyed {
    fn kind(&self) -> StateKind;

    /// Every endpoint the state owns, across all of its endpoint collections.
    fn endpoints(&self) -> Box<dyn Iterator<Item = &Endpoint> + '_>;

    fn owns(&self, endpoint_id: &str) -> bool {
        self.endpoints().any(|e| e.uuid == endpoint_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Channel {
    pub uuid: String,
    pub endpoints: Collection<Endpoint>,
    pub attributes: Attributes,
}

impl Channel {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }
}

impl Keyed for Channel {
    fn key(&self) -> &str {
        &self.uuid
    }
}

impl State for Channel {
    fn kind(&self) -> StateKind {
        StateKind::Channel
    }

    fn endpoints(&self) -> Box<dyn Iterator<Item = &Endpoint> + '_> {
        Box::new(self.endpoints.iter())
    }
}

/// A junction between conversation-side and channel-side wiring.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutingBlock {
    pub uuid: String,
    pub conversation_endpoints: Collection<Endpoint>,
    pub channel_endpoints: Collection<Endpoint>,
    pub attributes: Attributes,
}

impl RoutingBlock {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }

    pub fn side(&self, side: BlockSide) -> &Collection<Endpoint> {
        match side {
            BlockSide::Conversation => &self.conversation_endpoints,
            BlockSide::Channel => &self.channel_endpoints,
        }
    }

    pub fn side_mut(&mut self, side: BlockSide) -> &mut Collection<Endpoint> {
        match side {
            BlockSide::Conversation => &mut self.conversation_endpoints,
            BlockSide::Channel => &mut self.channel_endpoints,
        }
    }
}

impl Keyed for RoutingBlock {
    fn key(&self) -> &str {
        &self.uuid
    }
}

impl State for RoutingBlock {
    fn kind(&self) -> StateKind {
        StateKind::RoutingBlock
    }

    fn endpoints(&self) -> Box<dyn Iterator<Item = &Endpoint> + '_> {
        Box::new(
            self.conversation_endpoints
                .iter()
                .chain(self.channel_endpoints.iter()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conversation {
    pub uuid: String,
    pub endpoints: Collection<Endpoint>,
    pub attributes: Attributes,
}

impl Conversation {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }
}

impl Keyed for Conversation {
    fn key(&self) -> &str {
        &self.uuid
    }
}

impl State for Conversation {
    fn kind(&self) -> StateKind {
        StateKind::Conversation
    }

    fn endpoints(&self) -> Box<dyn Iterator<Item = &Endpoint> + '_> {
        Box::new(self.endpoints.iter())
    }
}

/// Names the endpoint collection an endpoint lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndpointOwner {
    Channel(String),
    RoutingBlock(String, BlockSide),
    Conversation(String),
}

impl EndpointOwner {
    pub fn state_id(&self) -> &str {
        match self {
            EndpointOwner::Channel(id)
            | EndpointOwner::RoutingBlock(id, _)
            | EndpointOwner::Conversation(id) => id,
        }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            EndpointOwner::Channel(_) => StateKind::Channel,
            EndpointOwner::RoutingBlock(..) => StateKind::RoutingBlock,
            EndpointOwner::Conversation(_) => StateKind::Conversation,
        }
    }
}

impl fmt::Display for EndpointOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointOwner::RoutingBlock(id, BlockSide::Conversation) => {
                write!(f, "routing block '{}' (conversation side)", id)
            }
            EndpointOwner::RoutingBlock(id, BlockSide::Channel) => {
                write!(f, "routing block '{}' (channel side)", id)
            }
            other => write!(f, "{} '{}'", other.kind(), other.state_id()),
        }
    }
}
