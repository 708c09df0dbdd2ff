//! Game service orchestrating session lifecycle and turn play.
//!
//! `GameService` coordinates the session store, the context builder, and
//! the two concurrent narrator calls that make up one turn. It holds no
//! state across requests: everything is reloaded from the store each time,
//! which is what makes a session resumable exactly where it left off.

use chrono::Utc;
use dungeonduel_types::error::StoreError;
use dungeonduel_types::game::{GameSession, Turn};
use tracing::{error, info};
use uuid::Uuid;

use crate::game::context::build_transcripts;
use crate::game::repository::GameRepository;
use crate::llm::backend::CompletionBackend;
use crate::llm::narrator::Narrator;

/// Orchestrates game sessions and turn play.
///
/// Generic over `GameRepository` and `CompletionBackend` to keep the core
/// free of infrastructure dependencies.
pub struct GameService<R: GameRepository, B: CompletionBackend> {
    repo: R,
    narrator: Narrator<B>,
    model_a: String,
    model_b: String,
}

impl<R: GameRepository, B: CompletionBackend> GameService<R, B> {
    /// Create a new game service.
    ///
    /// `model_a` and `model_b` are the deployment-configured narrator
    /// identities stamped onto every new session.
    pub fn new(repo: R, narrator: Narrator<B>, model_a: String, model_b: String) -> Self {
        Self {
            repo,
            narrator,
            model_a,
            model_b,
        }
    }

    /// Create a new session with the configured narrator pair.
    pub async fn create_session(&self, system_prompt: String) -> Result<GameSession, StoreError> {
        let session = GameSession {
            id: Uuid::now_v7().to_string(),
            system_prompt,
            model_a: self.model_a.clone(),
            model_b: self.model_b.clone(),
            created_at: Utc::now(),
        };

        self.repo.create_session(&session).await?;
        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    /// List all sessions, most recently created first.
    pub async fn list_sessions(&self) -> Result<Vec<GameSession>, StoreError> {
        self.repo.list_sessions().await
    }

    /// Load a session together with its full turn history.
    pub async fn load_history(
        &self,
        session_id: &str,
    ) -> Result<(GameSession, Vec<Turn>), StoreError> {
        let session = self.repo.get_session(session_id).await?;
        let turns = self.repo.get_turns(session_id).await?;
        Ok((session, turns))
    }

    /// Play one turn: rebuild both narrators' context from the persisted
    /// history, ask both models concurrently, and append the result.
    ///
    /// The narrator calls cannot fail (degraded backends answer with
    /// placeholders), so the only failure modes are a missing session and
    /// a failed append. On append failure the computed responses are
    /// discarded and the turn is considered not to have happened.
    pub async fn play_turn(&self, session_id: &str, action: &str) -> Result<Turn, StoreError> {
        let session = self.repo.get_session(session_id).await?;
        let turns = self.repo.get_turns(session_id).await?;

        let (transcript_a, transcript_b) =
            build_transcripts(&session.system_prompt, &turns, action);

        let (response_a, response_b) = tokio::join!(
            self.narrator.narrate(transcript_a, &session.model_a),
            self.narrator.narrate(transcript_b, &session.model_b),
        );

        let turn = self
            .repo
            .append_turn(session_id, action, &response_a, &response_b)
            .await
            .inspect_err(|err| {
                error!(session_id, error = %err, "turn discarded: append failed after both model calls");
            })?;

        info!(session_id, number = turn.number, "turn recorded");
        Ok(turn)
    }
}
