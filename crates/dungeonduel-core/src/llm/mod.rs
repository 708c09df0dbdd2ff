//! Chat-completion backend abstractions.
//!
//! `CompletionBackend` is the raw, fallible port that infrastructure
//! implements; `Narrator` wraps a backend into the never-failing gateway
//! the turn engine calls.

pub mod backend;
pub mod narrator;
