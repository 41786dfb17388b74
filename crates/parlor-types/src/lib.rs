//! Shared wire types for the Parlor voice-assistant workspace.
//!
//! These are the payloads exchanged between the browser-facing room client
//! and the bootstrap endpoint. Field names follow the camelCase JSON shape
//! the client already speaks, so every struct carries explicit renames.
//!
//! No crate in the workspace defines its own copy of these types; the server,
//! the voice service, and the room client all depend on `parlor-types`.

pub mod agent;

pub use agent::{AgentState, ParseAgentStateError};

use serde::{Deserialize, Serialize};

/// Body of a join request sent to `POST /api/connection-details`.
///
/// All three fields are required. Their contents are passed through to the
/// participant token without further validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Display name shown to other room participants.
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Identifier of the agent persona the user wants to talk to.
    #[serde(rename = "agentId")]
    pub agent_id: String,
    /// Caller-side user identifier.
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl JoinRequest {
    pub fn new(
        user_name: impl Into<String>,
        agent_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            agent_id: agent_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Everything a client needs to open one room session.
///
/// Created once per join attempt and discarded on disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Media service URL the client connects to.
    #[serde(rename = "serverUrl")]
    pub server_url: String,
    /// Room the credential is scoped to.
    #[serde(rename = "roomName")]
    pub room_name: String,
    /// Participant identity embedded in the credential.
    #[serde(rename = "participantName")]
    pub participant_name: String,
    /// Signed, time-limited access token.
    #[serde(rename = "participantToken")]
    pub participant_token: String,
}

/// Error body returned by the bootstrap endpoint on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
