//! Headless room client for Parlor voice sessions.
//!
//! A [`RoomSession`] asks the bootstrap endpoint for a
//! [`ConnectionDescriptor`](parlor_types::ConnectionDescriptor), opens exactly
//! one session through a [`RoomConnector`], and relays the agent state the
//! external session reports to registered observers.
//!
//! Media transport, reconnection, and audio processing belong to whatever
//! implements [`RoomConnector`]. This crate only keeps the per-session state a
//! UI needs: the held descriptor, the last reported
//! [`AgentState`](parlor_types::AgentState), the control bar affordance and the
//! bar visualizer levels.

pub mod bootstrap;
pub mod connector;
pub mod control;
pub mod error;
pub mod session;
pub mod visualizer;

pub use bootstrap::{
    resolve_endpoint, BootstrapClient, ConnectionSource, DEFAULT_ENDPOINT_PATH, ENDPOINT_ENV,
};
pub use connector::{AudioTrackRef, RoomConnection, RoomConnector, SessionOptions};
pub use control::{banner_for, ControlAffordance, SPEAKING_BANNER, START_CONVERSATION_LABEL};
pub use error::{RoomError, DEVICE_FAILURE_ALERT};
pub use session::RoomSession;
pub use visualizer::BarVisualizer;
