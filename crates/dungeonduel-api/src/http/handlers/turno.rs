//! Turn play HTTP handler.
//!
//! POST /api/turno - Play one turn: both narrators judge the player's
//! action concurrently and the result is appended to the session history.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TurnoRequest {
    #[serde(rename = "partidaId")]
    pub partida_id: String,
    #[serde(rename = "accionJugador")]
    pub accion_jugador: String,
}

#[derive(Debug, Serialize)]
pub struct TurnoResponse {
    pub ia1: String,
    pub ia2: String,
}

/// POST /api/turno - Judge the action with both narrators and record the
/// turn.
///
/// A degraded narrator never fails the turn (its answer is an in-story
/// placeholder); only a missing session or a failed append surfaces as an
/// API error, and in the latter case the computed responses are discarded.
pub async fn jugar_turno(
    State(state): State<AppState>,
    Json(req): Json<TurnoRequest>,
) -> Result<Json<TurnoResponse>, AppError> {
    let turn = state
        .games
        .play_turn(&req.partida_id, &req.accion_jugador)
        .await
        .map_err(|e| AppError::from_store(e, "Partida no existe", "Error procesando turno"))?;

    Ok(Json(TurnoResponse {
        ia1: turn.response_a,
        ia2: turn.response_b,
    }))
}
