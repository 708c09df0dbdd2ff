//! Game session and turn types for Dungeonduel.
//!
//! A game session pins a system prompt and two narrator model identities
//! for its whole lifetime; turns record one player action together with
//! both narrators' responses at a fixed position in the session history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One continuous game instance.
///
/// The system prompt and both model identities are fixed at creation and
/// never change afterwards: every turn of a session is judged under the
/// same instructions and by the same two backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Opaque unique id, stable for the session's lifetime.
    pub id: String,
    pub system_prompt: String,
    /// Model identity for narrator A.
    pub model_a: String,
    /// Model identity for narrator B.
    pub model_b: String,
    pub created_at: DateTime<Utc>,
}

/// One player action plus the two resulting narrator responses.
///
/// Turns belong to exactly one session. `number` starts at 1 and is
/// strictly increasing and gapless within a session; both responses are
/// always present once a turn is recorded -- a turn is never partially
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub session_id: String,
    pub number: u32,
    pub player_action: String,
    pub response_a: String,
    pub response_b: String,
}
