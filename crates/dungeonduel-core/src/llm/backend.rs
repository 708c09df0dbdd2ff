//! CompletionBackend trait definition.
//!
//! The raw chat-completion port. Uses native async fn in traits (RPITIT,
//! Rust 2024 edition). Implementations live in dungeonduel-infra (e.g.,
//! `GroqBackend`).

use dungeonduel_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
///
/// Unlike the [`Narrator`](crate::llm::narrator::Narrator) gateway built
/// on top of it, a backend is allowed to fail; the gateway is what turns
/// failures into narrative placeholders.
pub trait CompletionBackend: Send + Sync {
    /// Human-readable backend name, embedded in player-visible error
    /// placeholders.
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
