//! HTTP request handlers for the REST API.

pub mod partida;
pub mod turno;
