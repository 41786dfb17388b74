//! Voice room bootstrap for Parlor.
//!
//! Integrates with LiveKit for room access: mints participant join tokens,
//! asks the media service to dispatch an AI agent into a fresh room, and
//! assembles the [`ConnectionDescriptor`](parlor_types::ConnectionDescriptor)
//! a browser needs to join.
//!
//! Media transport and the agent itself run outside this crate. The agent
//! dispatch call sits behind the [`AgentDispatcher`] trait so the HTTP layer
//! can be exercised without a live media service.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod naming;
pub mod service;

pub use config::{
    LiveKitConfig, LiveKitCredentials, API_KEY_ENV, API_SECRET_ENV, DEFAULT_AGENT_NAME,
    DEFAULT_TOKEN_TTL_SECONDS, URL_ENV,
};
pub use dispatch::{AgentDispatcher, DispatchReceipt, DispatchRequest, LiveKitDispatcher};
pub use error::VoiceError;
pub use naming::{parse_suffix, RoomNames, NAME_SUFFIX_RANGE, PARTICIPANT_PREFIX, ROOM_PREFIX};
pub use service::VoiceService;
