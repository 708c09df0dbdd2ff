//! HTTP/REST API layer for Dungeonduel.
//!
//! Axum-based API under `/api/` with CORS support and static front-end
//! serving. The wire format (Spanish route and field names) is the game
//! client's public contract and is kept verbatim.

pub mod error;
pub mod handlers;
pub mod router;
