//! SQLite game repository implementation.
//!
//! Implements `GameRepository` from `dungeonduel-core` using sqlx with
//! split read/write pools: raw queries, private Row structs, reads on the
//! reader pool, writes (and the read-then-insert of `append_turn`) on the
//! single writer connection.

use chrono::{DateTime, Utc};
use dungeonduel_core::game::repository::GameRepository;
use dungeonduel_types::error::StoreError;
use dungeonduel_types::game::{GameSession, Turn};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `GameRepository`.
pub struct SqliteGameRepository {
    pool: DatabasePool,
}

impl SqliteGameRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct GameSessionRow {
    id: String,
    system_prompt: String,
    model_a: String,
    model_b: String,
    created_at: String,
}

impl GameSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            system_prompt: row.try_get("system_prompt")?,
            model_a: row.try_get("model_a")?,
            model_b: row.try_get("model_b")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<GameSession, StoreError> {
        let created_at = parse_datetime(&self.created_at)?;
        Ok(GameSession {
            id: self.id,
            system_prompt: self.system_prompt,
            model_a: self.model_a,
            model_b: self.model_b,
            created_at,
        })
    }
}

struct TurnRow {
    session_id: String,
    number: i64,
    player_action: String,
    response_a: String,
    response_b: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            number: row.try_get("number")?,
            player_action: row.try_get("player_action")?,
            response_a: row.try_get("response_a")?,
            response_b: row.try_get("response_b")?,
        })
    }

    fn into_turn(self) -> Turn {
        Turn {
            session_id: self.session_id,
            number: self.number as u32,
            player_action: self.player_action,
            response_a: self.response_a,
            response_b: self.response_b,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Persistence(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn persistence(e: sqlx::Error) -> StoreError {
    StoreError::Persistence(e.to_string())
}

// ---------------------------------------------------------------------------
// GameRepository implementation
// ---------------------------------------------------------------------------

impl GameRepository for SqliteGameRepository {
    async fn create_session(&self, session: &GameSession) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO game_sessions (id, system_prompt, model_a, model_b, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&session.id)
        .bind(&session.system_prompt)
        .bind(&session.model_a)
        .bind(&session.model_b)
        .bind(format_datetime(&session.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(persistence)?;

        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Result<GameSession, StoreError> {
        let row = sqlx::query("SELECT * FROM game_sessions WHERE id = ?")
            .bind(session_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(persistence)?;

        match row {
            Some(row) => {
                let session_row = GameSessionRow::from_row(&row).map_err(persistence)?;
                session_row.into_session()
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn list_sessions(&self) -> Result<Vec<GameSession>, StoreError> {
        let rows = sqlx::query("SELECT * FROM game_sessions ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(persistence)?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row = GameSessionRow::from_row(row).map_err(persistence)?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }

    async fn get_turns(&self, session_id: &str) -> Result<Vec<Turn>, StoreError> {
        let rows = sqlx::query("SELECT * FROM turns WHERE session_id = ? ORDER BY number ASC")
            .bind(session_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(persistence)?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row = TurnRow::from_row(row).map_err(persistence)?;
            turns.push(turn_row.into_turn());
        }

        Ok(turns)
    }

    async fn append_turn(
        &self,
        session_id: &str,
        player_action: &str,
        response_a: &str,
        response_b: &str,
    ) -> Result<Turn, StoreError> {
        // Existence check and number allocation run on the writer
        // connection so the computed number reflects the latest committed
        // turn. The (session_id, number) primary key rejects duplicates.
        let exists = sqlx::query("SELECT 1 FROM game_sessions WHERE id = ?")
            .bind(session_id)
            .fetch_optional(&self.pool.writer)
            .await
            .map_err(persistence)?;
        if exists.is_none() {
            return Err(StoreError::NotFound);
        }

        let row = sqlx::query(
            "SELECT COALESCE(MAX(number), 0) + 1 AS next FROM turns WHERE session_id = ?",
        )
        .bind(session_id)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(persistence)?;
        let next: i64 = row.try_get("next").map_err(persistence)?;

        sqlx::query(
            r#"INSERT INTO turns (session_id, number, player_action, response_a, response_b)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(session_id)
        .bind(next)
        .bind(player_action)
        .bind(response_a)
        .bind(response_b)
        .execute(&self.pool.writer)
        .await
        .map_err(persistence)?;

        Ok(Turn {
            session_id: session_id.to_string(),
            number: next as u32,
            player_action: player_action.to_string(),
            response_a: response_a.to_string(),
            response_b: response_b.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_session(id: &str, created_at: DateTime<Utc>) -> GameSession {
        GameSession {
            id: id.to_string(),
            system_prompt: "You are a narrator.".to_string(),
            model_a: "llama-3.3-70b-versatile".to_string(),
            model_b: "mixtral-8x7b-32768".to_string(),
            created_at,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let pool = test_pool().await;
        let repo = SqliteGameRepository::new(pool);

        let session = make_session("s1", Utc::now());
        repo.create_session(&session).await.unwrap();

        let found = repo.get_session("s1").await.unwrap();
        assert_eq!(found.id, "s1");
        assert_eq!(found.system_prompt, "You are a narrator.");
        assert_eq!(found.model_a, "llama-3.3-70b-versatile");
        assert_eq!(found.model_b, "mixtral-8x7b-32768");

        let turns = repo.get_turns("s1").await.unwrap();
        assert!(turns.is_empty());
    }

    #[tokio::test]
    async fn test_get_session_missing_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteGameRepository::new(pool);

        let result = repo.get_session("nope").await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_sessions_newest_first() {
        let pool = test_pool().await;
        let repo = SqliteGameRepository::new(pool);

        let old = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        repo.create_session(&make_session("old", old)).await.unwrap();
        repo.create_session(&make_session("newer", newer))
            .await
            .unwrap();

        let sessions = repo.list_sessions().await.unwrap();
        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "old"]);
    }

    #[tokio::test]
    async fn test_list_sessions_empty() {
        let pool = test_pool().await;
        let repo = SqliteGameRepository::new(pool);
        assert!(repo.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_turn_numbers_are_gapless() {
        let pool = test_pool().await;
        let repo = SqliteGameRepository::new(pool);

        repo.create_session(&make_session("s1", Utc::now()))
            .await
            .unwrap();

        for (i, action) in ["first", "second", "third"].iter().enumerate() {
            let turn = repo
                .append_turn("s1", action, "resp a", "resp b")
                .await
                .unwrap();
            assert_eq!(turn.number, i as u32 + 1);
        }

        let turns = repo.get_turns("s1").await.unwrap();
        let numbers: Vec<u32> = turns.iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(turns[1].player_action, "second");
    }

    #[tokio::test]
    async fn test_append_turn_missing_session_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteGameRepository::new(pool);

        let result = repo.append_turn("ghost", "act", "a", "b").await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_turns_are_scoped_per_session() {
        let pool = test_pool().await;
        let repo = SqliteGameRepository::new(pool);

        repo.create_session(&make_session("s1", Utc::now()))
            .await
            .unwrap();
        repo.create_session(&make_session("s2", Utc::now()))
            .await
            .unwrap();

        repo.append_turn("s1", "in s1", "a", "b").await.unwrap();
        let turn = repo.append_turn("s2", "in s2", "a", "b").await.unwrap();

        // Numbering restarts per session.
        assert_eq!(turn.number, 1);
        let turns = repo.get_turns("s1").await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].player_action, "in s1");
    }

    #[tokio::test]
    async fn test_turn_round_trip_preserves_text() {
        let pool = test_pool().await;
        let repo = SqliteGameRepository::new(pool);

        repo.create_session(&make_session("s1", Utc::now()))
            .await
            .unwrap();

        let action = "I open the door carefully, with my shield raised";
        let appended = repo
            .append_turn("s1", action, "It creaks open.", "El DM está inconsciente (Error de Red).")
            .await
            .unwrap();

        let turns = repo.get_turns("s1").await.unwrap();
        assert_eq!(turns, vec![appended]);
        assert_eq!(turns[0].player_action, action);
    }
}
