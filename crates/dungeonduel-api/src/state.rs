//! Application state wiring the game service together.
//!
//! `GameService` is generic over repository/backend traits, but AppState
//! pins it to the concrete infra implementations.

use std::sync::Arc;

use dungeonduel_core::game::service::GameService;
use dungeonduel_core::llm::narrator::Narrator;
use dungeonduel_infra::config::AppConfig;
use dungeonduel_infra::llm::groq::GroqBackend;
use dungeonduel_infra::sqlite::game::SqliteGameRepository;
use dungeonduel_infra::sqlite::pool::DatabasePool;

/// Concrete type alias for the service generics pinned to infra
/// implementations.
pub type ConcreteGameService = GameService<SqliteGameRepository, GroqBackend>;

/// Shared application state for the REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<ConcreteGameService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, wire
    /// the repository, backend, and narrator into the game service.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            config.data_dir.join("dungeonduel.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let repo = SqliteGameRepository::new(db_pool.clone());
        let backend = GroqBackend::new(&config.groq_api_key, &config.groq_base_url);
        let narrator = Narrator::new(backend, config.sampling);
        let games = GameService::new(
            repo,
            narrator,
            config.model_a.clone(),
            config.model_b.clone(),
        );

        Ok(Self {
            games: Arc::new(games),
            db_pool,
        })
    }
}
