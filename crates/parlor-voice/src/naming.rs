//! Random room and participant names for each join attempt.
//!
//! Names are `voice_assistant_room_<n>` / `voice_assistant_user_<n>` with `n`
//! drawn uniformly from [`NAME_SUFFIX_RANGE`]. The range only holds 10 000
//! values, so two concurrent joins share a room with probability 1/10 000 per
//! pair. Nothing reserves a name; callers that need a unique room must check
//! with the media service first.

use rand::Rng;
use std::ops::Range;

pub const ROOM_PREFIX: &str = "voice_assistant_room_";
pub const PARTICIPANT_PREFIX: &str = "voice_assistant_user_";
pub const NAME_SUFFIX_RANGE: Range<u32> = 0..10_000;

/// Room name and participant identity for one join attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomNames {
    pub room_name: String,
    pub participant_identity: String,
}

impl RoomNames {
    /// Draws a fresh pair from the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Draws a fresh pair from `rng`. The participant suffix is drawn first.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let participant = rng.gen_range(NAME_SUFFIX_RANGE);
        let room = rng.gen_range(NAME_SUFFIX_RANGE);
        Self {
            room_name: format!("{ROOM_PREFIX}{room}"),
            participant_identity: format!("{PARTICIPANT_PREFIX}{participant}"),
        }
    }
}

/// Parses the numeric suffix of a generated name, if it carries `prefix`
/// and a suffix inside [`NAME_SUFFIX_RANGE`].
pub fn parse_suffix(name: &str, prefix: &str) -> Option<u32> {
    let digits = name.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = digits.parse().ok()?;
    NAME_SUFFIX_RANGE.contains(&value).then_some(value)
}
