use super::{
    Attributes, BlockSide, Channel, Collection, Connection, Conversation, Endpoint, EndpointOwner,
    Keyed, RoutingBlock, State,
};
use crate::error::ValidationError;
use itertools::Itertools;

/// The root aggregate: one campaign's complete routing configuration.
///
/// Every endpoint belongs to exactly one state collection, and every routing
/// entry references two endpoints owned somewhere in the aggregate. The
/// mutation methods below keep both invariants; the collections themselves are
/// exposed read-only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CampaignRouting {
    campaign_id: String,
    channels: Collection<Channel>,
    routing_blocks: Collection<RoutingBlock>,
    conversations: Collection<Conversation>,
    routing_entries: Collection<Connection>,
    attributes: Attributes,
}

impl CampaignRouting {
    pub fn new(campaign_id: impl Into<String>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            ..Default::default()
        }
    }

    /// Assembles an aggregate from already-built collections and validates it.
    pub fn from_parts(
        campaign_id: impl Into<String>,
        channels: Collection<Channel>,
        routing_blocks: Collection<RoutingBlock>,
        conversations: Collection<Conversation>,
        routing_entries: Collection<Connection>,
        attributes: Attributes,
    ) -> Result<Self, ValidationError> {
        let routing = Self {
            campaign_id: campaign_id.into(),
            channels,
            routing_blocks,
            conversations,
            routing_entries,
            attributes,
        };
        routing.validate()?;
        Ok(routing)
    }

    pub fn campaign_id(&self) -> &str {
        &self.campaign_id
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn channels(&self) -> &Collection<Channel> {
        &self.channels
    }

    pub fn routing_blocks(&self) -> &Collection<RoutingBlock> {
        &self.routing_blocks
    }

    pub fn conversations(&self) -> &Collection<Conversation> {
        &self.conversations
    }

    pub fn routing_entries(&self) -> &Collection<Connection> {
        &self.routing_entries
    }

    pub fn channel(&self, uuid: &str) -> Option<&Channel> {
        self.channels.get(uuid)
    }

    pub fn routing_block(&self, uuid: &str) -> Option<&RoutingBlock> {
        self.routing_blocks.get(uuid)
    }

    pub fn conversation(&self, uuid: &str) -> Option<&Conversation> {
        self.conversations.get(uuid)
    }

    pub fn routing_entry(&self, uuid: &str) -> Option<&Connection> {
        self.routing_entries.get(uuid)
    }

    /// Every state in the aggregate, channels first, then routing blocks, then conversations.
    pub fn states(&self) -> impl Iterator<Item = &dyn State> {
        self.channels
            .iter()
            .map(|s| s as &dyn State)
            .chain(self.routing_blocks.iter().map(|s| s as &dyn State))
            .chain(self.conversations.iter().map(|s| s as &dyn State))
    }

    /// Locates an endpoint and its owning collection. O(number of states).
    pub fn find_endpoint(&self, endpoint_id: &str) -> Option<(EndpointOwner, &Endpoint)> {
        for channel in &self.channels {
            if let Some(e) = channel.endpoints.get(endpoint_id) {
                return Some((EndpointOwner::Channel(channel.uuid.clone()), e));
            }
        }
        for block in &self.routing_blocks {
            for side in [BlockSide::Conversation, BlockSide::Channel] {
                if let Some(e) = block.side(side).get(endpoint_id) {
                    return Some((EndpointOwner::RoutingBlock(block.uuid.clone(), side), e));
                }
            }
        }
        for conversation in &self.conversations {
            if let Some(e) = conversation.endpoints.get(endpoint_id) {
                return Some((EndpointOwner::Conversation(conversation.uuid.clone()), e));
            }
        }
        None
    }

    pub fn has_endpoint(&self, endpoint_id: &str) -> bool {
        self.find_endpoint(endpoint_id).is_some()
    }

    /// Checks referential integrity and exclusive endpoint ownership.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(endpoint_id) = self
            .states()
            .flat_map(|state| state.endpoints().map(|e| e.uuid.as_str()))
            .duplicates()
            .next()
        {
            let owner = self
                .find_endpoint(endpoint_id)
                .map(|(owner, _)| owner.to_string())
                .unwrap_or_default();
            return Err(ValidationError::EndpointAlreadyOwned {
                endpoint_id: endpoint_id.to_string(),
                owner,
            });
        }

        for connection in &self.routing_entries {
            self.check_connection(connection)?;
        }
        Ok(())
    }

    fn check_connection(&self, connection: &Connection) -> Result<(), ValidationError> {
        if connection.source == connection.target {
            return Err(ValidationError::SelfConnection(connection.uuid.clone()));
        }
        for endpoint_id in connection.endpoints() {
            if !self.has_endpoint(endpoint_id) {
                return Err(ValidationError::EndpointNotFound {
                    endpoint_id: endpoint_id.to_string(),
                    connection_id: connection.uuid.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_unused(&self, endpoint_ids: &[&str]) -> Result<(), ValidationError> {
        for connection in &self.routing_entries {
            if let Some(endpoint_id) = endpoint_ids.iter().find(|id| connection.touches(id)) {
                return Err(ValidationError::EndpointInUse {
                    endpoint_id: endpoint_id.to_string(),
                    connection_id: connection.uuid.clone(),
                });
            }
        }
        Ok(())
    }

    /// Rejects a state whose endpoints are already owned by a different state.
    fn check_claims(&self, state: &dyn State) -> Result<(), ValidationError> {
        if let Some(endpoint_id) = state.endpoints().map(|e| e.uuid.as_str()).duplicates().next() {
            return Err(ValidationError::EndpointAlreadyOwned {
                endpoint_id: endpoint_id.to_string(),
                owner: format!("{} '{}'", state.kind(), state.key()),
            });
        }
        for endpoint in state.endpoints() {
            if let Some((owner, _)) = self.find_endpoint(&endpoint.uuid) {
                if owner.kind() != state.kind() || owner.state_id() != state.key() {
                    return Err(ValidationError::EndpointAlreadyOwned {
                        endpoint_id: endpoint.uuid.clone(),
                        owner: owner.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Endpoints of `old` that `new` no longer carries must not be wired.
    fn check_dropped(&self, old: Option<&dyn State>, new: &dyn State) -> Result<(), ValidationError> {
        let Some(old) = old else { return Ok(()) };
        let dropped: Vec<&str> = old
            .endpoints()
            .map(|e| e.uuid.as_str())
            .filter(|id| !new.owns(id))
            .collect();
        self.check_unused(&dropped)
    }

    pub fn upsert_channel(&mut self, channel: Channel) -> Result<(), ValidationError> {
        self.check_claims(&channel)?;
        self.check_dropped(self.channels.get(&channel.uuid).map(|s| s as &dyn State), &channel)?;
        log::debug!("Upserting channel '{}'", channel.uuid);
        self.channels.upsert(channel);
        Ok(())
    }

    pub fn upsert_routing_block(&mut self, block: RoutingBlock) -> Result<(), ValidationError> {
        self.check_claims(&block)?;
        self.check_dropped(self.routing_blocks.get(&block.uuid).map(|s| s as &dyn State), &block)?;
        log::debug!("Upserting routing block '{}'", block.uuid);
        self.routing_blocks.upsert(block);
        Ok(())
    }

    pub fn upsert_conversation(&mut self, conversation: Conversation) -> Result<(), ValidationError> {
        self.check_claims(&conversation)?;
        self.check_dropped(
            self.conversations.get(&conversation.uuid).map(|s| s as &dyn State),
            &conversation,
        )?;
        log::debug!("Upserting conversation '{}'", conversation.uuid);
        self.conversations.upsert(conversation);
        Ok(())
    }

    pub fn remove_channel(&mut self, uuid: &str) -> Result<Channel, ValidationError> {
        let channel = self
            .channels
            .get(uuid)
            .ok_or_else(|| ValidationError::UnknownState(uuid.to_string()))?;
        self.check_unused(&channel.endpoints.keys().collect_vec())?;
        self.channels
            .remove(uuid)
            .ok_or_else(|| ValidationError::UnknownState(uuid.to_string()))
    }

    pub fn remove_routing_block(&mut self, uuid: &str) -> Result<RoutingBlock, ValidationError> {
        let block = self
            .routing_blocks
            .get(uuid)
            .ok_or_else(|| ValidationError::UnknownState(uuid.to_string()))?;
        self.check_unused(&block.endpoints().map(|e| e.uuid.as_str()).collect_vec())?;
        self.routing_blocks
            .remove(uuid)
            .ok_or_else(|| ValidationError::UnknownState(uuid.to_string()))
    }

    pub fn remove_conversation(&mut self, uuid: &str) -> Result<Conversation, ValidationError> {
        let conversation = self
            .conversations
            .get(uuid)
            .ok_or_else(|| ValidationError::UnknownState(uuid.to_string()))?;
        self.check_unused(&conversation.endpoints.keys().collect_vec())?;
        self.conversations
            .remove(uuid)
            .ok_or_else(|| ValidationError::UnknownState(uuid.to_string()))
    }

    fn endpoints_mut(&mut self, owner: &EndpointOwner) -> Option<&mut Collection<Endpoint>> {
        match owner {
            EndpointOwner::Channel(id) => self.channels.get_mut(id).map(|c| &mut c.endpoints),
            EndpointOwner::RoutingBlock(id, side) => {
                self.routing_blocks.get_mut(id).map(|b| b.side_mut(*side))
            }
            EndpointOwner::Conversation(id) => {
                self.conversations.get_mut(id).map(|c| &mut c.endpoints)
            }
        }
    }

    /// Adds an endpoint to `owner`, or updates it in place if `owner` already holds it.
    ///
    /// An endpoint owned by any other collection is rejected; use `move_endpoint`.
    pub fn add_endpoint(
        &mut self,
        owner: &EndpointOwner,
        endpoint: Endpoint,
    ) -> Result<(), ValidationError> {
        if let Some((current, _)) = self.find_endpoint(&endpoint.uuid) {
            if &current != owner {
                return Err(ValidationError::EndpointAlreadyOwned {
                    endpoint_id: endpoint.uuid,
                    owner: current.to_string(),
                });
            }
        }
        let endpoints = self
            .endpoints_mut(owner)
            .ok_or_else(|| ValidationError::UnknownState(owner.state_id().to_string()))?;
        log::debug!("Adding endpoint '{}' to {}", endpoint.uuid, owner);
        endpoints.upsert(endpoint);
        Ok(())
    }

    /// Removes an endpoint that no routing entry references.
    pub fn remove_endpoint(&mut self, endpoint_id: &str) -> Result<Endpoint, ValidationError> {
        let (owner, _) = self
            .find_endpoint(endpoint_id)
            .ok_or_else(|| ValidationError::UnknownEndpoint(endpoint_id.to_string()))?;
        self.check_unused(&[endpoint_id])?;
        self.endpoints_mut(&owner)
            .and_then(|endpoints| endpoints.remove(endpoint_id))
            .ok_or_else(|| ValidationError::UnknownEndpoint(endpoint_id.to_string()))
    }

    /// Moves an endpoint to another collection. Routing entries keep referencing it by id.
    pub fn move_endpoint(
        &mut self,
        endpoint_id: &str,
        to: &EndpointOwner,
    ) -> Result<(), ValidationError> {
        let (from, _) = self
            .find_endpoint(endpoint_id)
            .ok_or_else(|| ValidationError::UnknownEndpoint(endpoint_id.to_string()))?;
        if &from == to {
            return Ok(());
        }
        if self.endpoints_mut(to).is_none() {
            return Err(ValidationError::UnknownState(to.state_id().to_string()));
        }
        let endpoint = self
            .endpoints_mut(&from)
            .and_then(|endpoints| endpoints.remove(endpoint_id))
            .ok_or_else(|| ValidationError::UnknownEndpoint(endpoint_id.to_string()))?;
        log::debug!("Moving endpoint '{}' from {} to {}", endpoint_id, from, to);
        if let Some(endpoints) = self.endpoints_mut(to) {
            endpoints.upsert(endpoint);
        }
        Ok(())
    }

    /// Adds or updates a routing entry after checking both endpoints resolve.
    pub fn connect(&mut self, connection: Connection) -> Result<(), ValidationError> {
        self.check_connection(&connection)?;
        log::debug!(
            "Connecting '{}' -> '{}' as '{}'",
            connection.source,
            connection.target,
            connection.uuid
        );
        self.routing_entries.upsert(connection);
        Ok(())
    }

    pub fn disconnect(&mut self, uuid: &str) -> Option<Connection> {
        self.routing_entries.remove(uuid)
    }

    /// Connections that touch the given endpoint.
    pub fn connections_of<'a>(
        &'a self,
        endpoint_id: &'a str,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.routing_entries
            .iter()
            .filter(move |c| c.touches(endpoint_id))
    }

    /// Restores `snapshot`'s collections wholesale. Attributes present in the
    /// snapshot get their old values back; attributes added since are kept.
    pub(crate) fn restore_from(&mut self, snapshot: &CampaignRouting) {
        self.campaign_id = snapshot.campaign_id.clone();
        self.channels = snapshot.channels.clone();
        self.routing_blocks = snapshot.routing_blocks.clone();
        self.conversations = snapshot.conversations.clone();
        self.routing_entries = snapshot.routing_entries.clone();
        for (key, value) in &snapshot.attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
    }
}

impl Keyed for CampaignRouting {
    fn key(&self) -> &str {
        &self.campaign_id
    }
}
