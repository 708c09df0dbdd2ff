//! Business logic and repository trait definitions for Dungeonduel.
//!
//! This crate defines the "ports" (the session store and completion
//! backend traits) that the infrastructure layer implements, plus the
//! pieces with real invariants: the pure context builder, the
//! never-failing narrator gateway, and the turn engine. It depends only
//! on `dungeonduel-types` -- never on `dungeonduel-infra` or any
//! database/IO crate.

pub mod game;
pub mod llm;
