use crate::error::VoiceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the media service URL.
pub const URL_ENV: &str = "LIVEKIT_URL";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "LIVEKIT_API_KEY";
/// Environment variable holding the API secret.
pub const API_SECRET_ENV: &str = "LIVEKIT_API_SECRET";

/// Join tokens live for 15 minutes.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 15 * 60;
/// Worker name the agent process registers under.
pub const DEFAULT_AGENT_NAME: &str = "inbound-agent";

fn default_token_ttl_seconds() -> u64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

fn default_agent_name() -> String {
    DEFAULT_AGENT_NAME.to_string()
}

fn default_dispatch_metadata() -> String {
    r#"{"customData": "example"}"#.to_string()
}

fn default_participant_metadata() -> String {
    "this-is-metadata".to_string()
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing)]
    pub api_secret: String,
    /// JWT token TTL in seconds for join tokens. Default: 900 (15 minutes).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
    /// Agent worker dispatched into every new room.
    #[serde(default = "default_agent_name")]
    pub agent_name: String,
    /// Opaque metadata handed to the dispatched agent.
    #[serde(default = "default_dispatch_metadata")]
    pub dispatch_metadata: String,
    /// Metadata embedded in each participant token.
    #[serde(default = "default_participant_metadata")]
    pub participant_metadata: String,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
            agent_name: default_agent_name(),
            dispatch_metadata: default_dispatch_metadata(),
            participant_metadata: default_participant_metadata(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("agent_name", &self.agent_name)
            .field("dispatch_metadata", &self.dispatch_metadata)
            .field("participant_metadata", &self.participant_metadata)
            .finish()
    }
}

/// Borrowed view of the three deployment secrets, all known to be present.
#[derive(Clone, Copy)]
pub struct LiveKitCredentials<'a> {
    pub url: &'a str,
    pub api_key: &'a str,
    pub api_secret: &'a str,
}

impl fmt::Debug for LiveKitCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitCredentials")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl LiveKitCredentials<'_> {
    /// Returns the URL for server API calls.
    ///
    /// Clients connect over `ws://`/`wss://`; the Twirp API lives on the same
    /// host under `http://`/`https://`.
    pub fn api_url(&self) -> String {
        if let Some(rest) = self.url.strip_prefix("wss://") {
            format!("https://{rest}")
        } else if let Some(rest) = self.url.strip_prefix("ws://") {
            format!("http://{rest}")
        } else {
            self.url.to_string()
        }
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Self::default()
        }
    }

    /// Returns the deployment secrets, or the first one that is missing.
    ///
    /// Checked in order: URL, API key, API secret. Blank values count as
    /// missing. A zero token TTL is rejected here as well, since no join
    /// token could be signed with it.
    pub fn credentials(&self) -> Result<LiveKitCredentials<'_>, VoiceError> {
        if self.url.trim().is_empty() {
            return Err(VoiceError::MissingConfig(URL_ENV));
        }
        if self.api_key.trim().is_empty() {
            return Err(VoiceError::MissingConfig(API_KEY_ENV));
        }
        if self.api_secret.trim().is_empty() {
            return Err(VoiceError::MissingConfig(API_SECRET_ENV));
        }
        if self.token_ttl_seconds == 0 {
            return Err(VoiceError::Config(
                "token_ttl_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(LiveKitCredentials {
            url: &self.url,
            api_key: &self.api_key,
            api_secret: &self.api_secret,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.credentials().is_ok()
    }
}
