//! Shared domain types for Dungeonduel.
//!
//! This crate contains the core domain types used across the platform:
//! game sessions, turns, LLM messages, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod error;
pub mod game;
pub mod llm;
