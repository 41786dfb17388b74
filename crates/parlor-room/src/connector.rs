//! Seam between the session controller and the external room SDK.

use crate::error::RoomError;
use async_trait::async_trait;
use parlor_types::{AgentState, ConnectionDescriptor};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Options applied when the session is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Ask the SDK to run noise suppression on the local microphone.
    pub noise_filter: bool,
    /// Subscribe to audio tracks only.
    pub audio_only: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            noise_filter: true,
            audio_only: true,
        }
    }
}

/// Reference to the agent's audio track, as exposed by the SDK.
///
/// Holds the most recent PCM frame (mono, normalized to `-1.0..=1.0`).
#[derive(Debug, Clone)]
pub struct AudioTrackRef {
    frames: watch::Receiver<Arc<[f32]>>,
}

impl AudioTrackRef {
    pub fn new(frames: watch::Receiver<Arc<[f32]>>) -> Self {
        Self { frames }
    }

    /// Returns the most recent frame.
    pub fn latest(&self) -> Arc<[f32]> {
        self.frames.borrow().clone()
    }
}

/// An open room session owned by the external SDK.
#[async_trait]
pub trait RoomConnection: Send + Sync + fmt::Debug {
    /// Agent state as reported by the SDK. Closing the sender ends the
    /// session from the remote side.
    fn agent_state(&self) -> watch::Receiver<AgentState>;

    /// The agent's audio track, once it has been published.
    fn agent_audio(&self) -> Option<AudioTrackRef>;

    /// Leaves the room. Must be safe to call more than once.
    async fn close(&self);
}

/// Opens room sessions from connection descriptors.
#[async_trait]
pub trait RoomConnector: Send + Sync + fmt::Debug {
    /// Joins the room described by `descriptor`.
    ///
    /// Returns [`RoomError::MediaDevice`] when microphone access fails.
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
        options: SessionOptions,
    ) -> Result<Arc<dyn RoomConnection>, RoomError>;
}
