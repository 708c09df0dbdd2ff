//! GameRepository trait definition.
//!
//! Provides persistence operations for game sessions and their ordered
//! turns. Uses native async fn in traits (RPITIT, Rust 2024 edition).

use dungeonduel_types::error::StoreError;
use dungeonduel_types::game::{GameSession, Turn};

/// Repository trait for game session and turn persistence.
///
/// Implementations live in dungeonduel-infra (e.g., `SqliteGameRepository`).
/// The store exclusively owns persisted records; callers hold only
/// transient copies.
pub trait GameRepository: Send + Sync {
    /// Persist a new game session.
    fn create_session(
        &self,
        session: &GameSession,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Get a session by id. Fails with `StoreError::NotFound` if absent.
    fn get_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<GameSession, StoreError>> + Send;

    /// List all sessions, most recently created first.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<GameSession>, StoreError>> + Send;

    /// Get the turns of a session, ascending by turn number. Empty for a
    /// session with no turns yet.
    fn get_turns(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, StoreError>> + Send;

    /// Append a new turn, allocating the next turn number (one plus the
    /// current maximum, or 1 if none exist). Fails with
    /// `StoreError::NotFound` if the session does not exist.
    fn append_turn(
        &self,
        session_id: &str,
        player_action: &str,
        response_a: &str,
        response_b: &str,
    ) -> impl std::future::Future<Output = Result<Turn, StoreError>> + Send;
}
