use crate::config::{LiveKitConfig, LiveKitCredentials};
use crate::dispatch::{AgentDispatcher, DispatchRequest, LiveKitDispatcher};
use crate::error::VoiceError;
use crate::naming::RoomNames;
use livekit_api::access_token::{AccessToken, VideoGrants};
use parlor_types::{ConnectionDescriptor, JoinRequest};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug)]
pub struct VoiceService {
    config: LiveKitConfig,
    dispatcher: Arc<dyn AgentDispatcher>,
}

impl VoiceService {
    pub fn new(config: LiveKitConfig) -> Self {
        Self::with_dispatcher(config, Arc::new(LiveKitDispatcher))
    }

    /// Creates a service that schedules agents through `dispatcher`.
    pub fn with_dispatcher(config: LiveKitConfig, dispatcher: Arc<dyn AgentDispatcher>) -> Self {
        Self { config, dispatcher }
    }

    /// Returns `true` when all three deployment secrets are configured and
    /// the token TTL is usable.
    pub fn is_enabled(&self) -> bool {
        self.config.is_complete()
    }

    pub fn config(&self) -> &LiveKitConfig {
        &self.config
    }

    /// Signs a join token for `identity` scoped to `room_name`.
    ///
    /// The token carries the caller's display name, the agent and user ids as
    /// participant attributes, and grants join, publish, publish-data and
    /// subscribe on that one room.
    pub fn generate_join_token(
        &self,
        credentials: LiveKitCredentials<'_>,
        room_name: &str,
        identity: &str,
        join: &JoinRequest,
    ) -> Result<String, VoiceError> {
        if self.config.token_ttl_seconds == 0 {
            return Err(VoiceError::Config(
                "token_ttl_seconds must be greater than zero".to_string(),
            ));
        }

        let attributes = HashMap::from([
            ("agentId".to_string(), join.agent_id.clone()),
            ("userId".to_string(), join.user_id.clone()),
        ]);

        let token = AccessToken::with_api_key(credentials.api_key, credentials.api_secret)
            .with_identity(identity)
            .with_name(&join.user_name)
            .with_metadata(&self.config.participant_metadata)
            .with_attributes(attributes)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        token.to_jwt().map_err(VoiceError::LiveKit)
    }

    /// Reserves a fresh room, dispatches the agent into it, and signs the
    /// participant credential.
    ///
    /// Configuration is validated before the agent is dispatched. After that
    /// it fails without retrying on the first dispatch or signing error. Every call draws new names; nothing is shared between
    /// calls.
    pub async fn bootstrap(&self, join: &JoinRequest) -> Result<ConnectionDescriptor, VoiceError> {
        let credentials = self.config.credentials()?;
        let names = RoomNames::generate();

        let receipt = self
            .dispatcher
            .create_dispatch(
                credentials,
                &DispatchRequest {
                    room_name: names.room_name.clone(),
                    agent_name: self.config.agent_name.clone(),
                    metadata: self.config.dispatch_metadata.clone(),
                },
            )
            .await?;
        info!(
            dispatch_id = %receipt.dispatch_id,
            agent = %receipt.agent_name,
            room = %receipt.room_name,
            "agent dispatch created"
        );

        let participant_token = self.generate_join_token(
            credentials,
            &names.room_name,
            &names.participant_identity,
            join,
        )?;

        Ok(ConnectionDescriptor {
            server_url: credentials.url.to_string(),
            room_name: names.room_name,
            participant_name: names.participant_identity,
            participant_token,
        })
    }
}
