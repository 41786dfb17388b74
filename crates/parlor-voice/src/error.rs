use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    /// A required deployment secret is absent. Carries the variable name.
    #[error("{0} is not defined")]
    MissingConfig(&'static str),

    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("Agent dispatch error: {0}")]
    Dispatch(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VoiceError {
    /// Returns `true` for errors caused by deployment configuration rather
    /// than an upstream call.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingConfig(_) | Self::Config(_))
    }
}
