use crate::config::LiveKitCredentials;
use crate::error::VoiceError;
use async_trait::async_trait;
use livekit_api::services::agent_dispatch::AgentDispatchClient;
use livekit_protocol::CreateAgentDispatchRequest;
use std::fmt;

/// Parameters for scheduling an agent into a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub room_name: String,
    pub agent_name: String,
    pub metadata: String,
}

/// What the media service reported back for a created dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub dispatch_id: String,
    pub agent_name: String,
    pub room_name: String,
}

/// Schedules an AI agent participant into a room.
///
/// Credentials are passed per call: they are only known to be present once a
/// request has validated them.
#[async_trait]
pub trait AgentDispatcher: Send + Sync + fmt::Debug {
    async fn create_dispatch(
        &self,
        credentials: LiveKitCredentials<'_>,
        request: &DispatchRequest,
    ) -> Result<DispatchReceipt, VoiceError>;
}

/// Dispatcher backed by the LiveKit agent dispatch service.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveKitDispatcher;

#[async_trait]
impl AgentDispatcher for LiveKitDispatcher {
    async fn create_dispatch(
        &self,
        credentials: LiveKitCredentials<'_>,
        request: &DispatchRequest,
    ) -> Result<DispatchReceipt, VoiceError> {
        let client = AgentDispatchClient::with_api_key(
            &credentials.api_url(),
            credentials.api_key,
            credentials.api_secret,
        );

        let dispatch = client
            .create_dispatch(CreateAgentDispatchRequest {
                agent_name: request.agent_name.clone(),
                room: request.room_name.clone(),
                metadata: request.metadata.clone(),
                ..Default::default()
            })
            .await
            .map_err(|e| VoiceError::Dispatch(e.to_string()))?;

        Ok(DispatchReceipt {
            dispatch_id: dispatch.id,
            agent_name: dispatch.agent_name,
            room_name: dispatch.room,
        })
    }
}
