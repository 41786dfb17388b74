//! Conversational phase of the voice agent.
//!
//! The state is reported by the external room session. Clients observe and
//! render it; nothing in this workspace drives the transitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Externally tracked phase of the voice agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    /// No session, or the session has closed.
    #[default]
    Disconnected,
    /// The room connection is being established.
    Connecting,
    /// Connected, waiting for the agent to come up.
    Initializing,
    /// The agent is listening to the user.
    Listening,
    /// The agent is producing a response.
    Thinking,
    /// The agent is speaking.
    Speaking,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Initializing => "initializing",
            Self::Listening => "listening",
            Self::Thinking => "thinking",
            Self::Speaking => "speaking",
        }
    }

    /// Returns `true` once the room is joined, regardless of agent activity.
    pub fn is_connected(self) -> bool {
        !matches!(self, Self::Disconnected | Self::Connecting)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown agent state: {0}")]
pub struct ParseAgentStateError(pub String);

impl FromStr for AgentState {
    type Err = ParseAgentStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disconnected" => Ok(Self::Disconnected),
            "connecting" => Ok(Self::Connecting),
            "initializing" => Ok(Self::Initializing),
            "listening" => Ok(Self::Listening),
            "thinking" => Ok(Self::Thinking),
            "speaking" => Ok(Self::Speaking),
            other => Err(ParseAgentStateError(other.to_string())),
        }
    }
}
