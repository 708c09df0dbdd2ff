//! The narrator gateway: a chat-completion call that cannot fail.
//!
//! Every failure mode degrades to a textual in-narrative placeholder,
//! because a partial or failed model response must not abort the turn or
//! lose the player's action. Transport failures are logged for operators
//! but never propagate to the caller.

use dungeonduel_types::llm::{CompletionRequest, LlmError, Message, SamplingConfig};
use tracing::warn;

use crate::llm::backend::CompletionBackend;

/// Placeholder when the backend answered but produced no usable content.
pub const NO_ANSWER: &str = "[Sin respuesta]";

/// Placeholder when the backend was unreachable, timed out, or returned a
/// malformed response.
pub const UNAVAILABLE: &str = "El DM está inconsciente (Error de Red).";

/// Wraps a [`CompletionBackend`] with the deployment-fixed sampling
/// configuration and normalizes every outcome into plain narrative text.
pub struct Narrator<B> {
    backend: B,
    sampling: SamplingConfig,
}

impl<B: CompletionBackend> Narrator<B> {
    pub fn new(backend: B, sampling: SamplingConfig) -> Self {
        Self { backend, sampling }
    }

    /// Ask the named model to continue the story.
    ///
    /// Never fails: a structured backend error is embedded as a readable
    /// placeholder, an empty answer becomes [`NO_ANSWER`], and any
    /// transport failure or timeout becomes [`UNAVAILABLE`].
    pub async fn narrate(&self, messages: Vec<Message>, model: &str) -> String {
        let request = CompletionRequest {
            model: model.to_string(),
            messages,
            max_tokens: self.sampling.max_tokens,
            temperature: Some(self.sampling.temperature),
        };

        let outcome = tokio::time::timeout(self.sampling.timeout, self.backend.complete(&request));
        match outcome.await {
            Ok(Ok(response)) => {
                if response.content.is_empty() {
                    NO_ANSWER.to_string()
                } else {
                    response.content
                }
            }
            Ok(Err(LlmError::Api { message })) => {
                warn!(backend = self.backend.name(), model, %message, "backend reported an error");
                format!("[Error {}]: {}", self.backend.name(), message)
            }
            Ok(Err(err)) => {
                warn!(backend = self.backend.name(), model, error = %err, "backend unreachable");
                UNAVAILABLE.to_string()
            }
            Err(_) => {
                warn!(backend = self.backend.name(), model, "backend call timed out");
                UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeonduel_types::llm::CompletionResponse;
    use std::time::Duration;

    /// Scripted backend for exercising each normalization branch.
    enum Script {
        Reply(&'static str),
        Empty,
        ApiError(&'static str),
        Unreachable,
        Hang,
    }

    struct ScriptedBackend(Script);

    impl CompletionBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match self.0 {
                Script::Reply(text) => Ok(CompletionResponse {
                    content: text.to_string(),
                    model: request.model.clone(),
                }),
                Script::Empty => Ok(CompletionResponse {
                    content: String::new(),
                    model: request.model.clone(),
                }),
                Script::ApiError(message) => Err(LlmError::Api {
                    message: message.to_string(),
                }),
                Script::Unreachable => {
                    Err(LlmError::Transport("connection refused".to_string()))
                }
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!()
                }
            }
        }
    }

    fn narrator(script: Script) -> Narrator<ScriptedBackend> {
        Narrator::new(ScriptedBackend(script), SamplingConfig::default())
    }

    #[tokio::test]
    async fn test_narrate_passes_content_through() {
        let n = narrator(Script::Reply("The dragon stirs."));
        let text = n.narrate(vec![Message::user("hi")], "model-a").await;
        assert_eq!(text, "The dragon stirs.");
    }

    #[tokio::test]
    async fn test_empty_content_becomes_no_answer_sentinel() {
        let n = narrator(Script::Empty);
        let text = n.narrate(vec![Message::user("hi")], "model-a").await;
        assert_eq!(text, NO_ANSWER);
    }

    #[tokio::test]
    async fn test_api_error_is_embedded_not_raised() {
        let n = narrator(Script::ApiError("model decommissioned"));
        let text = n.narrate(vec![Message::user("hi")], "model-a").await;
        assert_eq!(text, "[Error scripted]: model decommissioned");
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_unavailable_sentinel() {
        let n = narrator(Script::Unreachable);
        let text = n.narrate(vec![Message::user("hi")], "model-a").await;
        assert_eq!(text, UNAVAILABLE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_degrades_like_a_network_failure() {
        let n = narrator(Script::Hang);
        let text = n.narrate(vec![Message::user("hi")], "model-a").await;
        assert_eq!(text, UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_request_carries_fixed_sampling_config() {
        // The request is built from SamplingConfig, not per call; verify
        // through a backend that asserts on what it receives.
        struct AssertingBackend;
        impl CompletionBackend for AssertingBackend {
            fn name(&self) -> &str {
                "asserting"
            }
            async fn complete(
                &self,
                request: &CompletionRequest,
            ) -> Result<CompletionResponse, LlmError> {
                assert_eq!(request.max_tokens, 800);
                assert_eq!(request.temperature, Some(0.7));
                assert_eq!(request.model, "model-b");
                Ok(CompletionResponse {
                    content: "ok".to_string(),
                    model: request.model.clone(),
                })
            }
        }

        let n = Narrator::new(AssertingBackend, SamplingConfig::default());
        let text = n.narrate(vec![Message::user("hi")], "model-b").await;
        assert_eq!(text, "ok");
    }
}
