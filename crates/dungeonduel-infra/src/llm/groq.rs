//! Groq chat-completion backend.
//!
//! Speaks Groq's OpenAI-compatible chat completions endpoint through
//! [`async_openai`], so the same implementation works against any
//! OpenAI-compatible service by overriding the base URL (tests, proxies).

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use async_openai::Client;
use secrecy::{ExposeSecret, SecretString};

use dungeonduel_core::llm::backend::CompletionBackend;
use dungeonduel_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole};

/// Groq's OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat-completion backend for Groq.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct GroqBackend {
    client: Client<OpenAIConfig>,
}

impl GroqBackend {
    /// Create a backend for the given credential and base URL.
    pub fn new(api_key: &SecretString, base_url: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(base_url);

        Self {
            client: Client::with_config(config),
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic
    /// [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            })
            .collect();

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl CompletionBackend for GroqBackend {
    fn name(&self) -> &str {
        "Groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let groq_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(groq_request)
            .await
            .map_err(map_openai_error)?;

        // An answer with no choices or no content degrades downstream to
        // the no-answer sentinel; it is not an error here.
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: response.model,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
///
/// A structured API error body is the only application-level failure; all
/// other outcomes (connection failures, timeouts, malformed responses)
/// count as transport failures.
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match err {
        OpenAIError::ApiError(api_err) => LlmError::Api {
            message: api_err.message,
        },
        other => LlmError::Transport(other.to_string()),
    }
}
