use thiserror::Error;

/// Text shown to the user when microphone access fails.
pub const DEVICE_FAILURE_ALERT: &str = "Error acquiring camera or microphone permissions. \
Please make sure you grant the necessary permissions in your browser and reload the tab";

#[derive(Error, Debug)]
pub enum RoomError {
    /// A session is already open or being opened.
    #[error("a room session is already active")]
    AlreadyConnected,

    /// The attempt was abandoned by a disconnect before it finished.
    #[error("connection attempt was cancelled")]
    Cancelled,

    /// The bootstrap endpoint answered with an error body.
    #[error("bootstrap endpoint returned {status}: {message}")]
    Bootstrap { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Microphone or camera permission was denied or the device is unusable.
    #[error("media device failure: {0}")]
    MediaDevice(String),

    /// The room SDK could not open the session.
    #[error("room connection failed: {0}")]
    Transport(String),
}
