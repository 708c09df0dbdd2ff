//! Chat-completion backend implementations.
//!
//! Contains the concrete implementation of the [`CompletionBackend`]
//! trait defined in `dungeonduel-core`, speaking the OpenAI chat
//! completions protocol against Groq.
//!
//! [`CompletionBackend`]: dungeonduel_core::llm::backend::CompletionBackend

pub mod groq;
