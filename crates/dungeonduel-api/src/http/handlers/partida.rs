//! Session management HTTP handlers.
//!
//! Endpoints:
//! - POST /api/nueva-partida - Create a new game session
//! - GET  /api/partidas      - List sessions, newest first
//! - GET  /api/historial/{id} - Load a session with its full turn history
//!
//! Field names mirror the game client's wire format (Spanish, mixed
//! camelCase/snake_case) and must not be renamed.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use dungeonduel_types::game::{GameSession, Turn};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NuevaPartidaRequest {
    #[serde(rename = "systemPrompt")]
    pub system_prompt: String,
}

#[derive(Debug, Serialize)]
pub struct NuevaPartidaResponse {
    pub success: bool,
    #[serde(rename = "partidaId")]
    pub partida_id: String,
}

/// Session summary row for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct PartidaSummary {
    pub id: String,
    pub fecha: String,
    pub system_prompt: String,
}

impl From<GameSession> for PartidaSummary {
    fn from(session: GameSession) -> Self {
        Self {
            id: session.id,
            fecha: session.created_at.to_rfc3339(),
            system_prompt: session.system_prompt,
        }
    }
}

/// Full session metadata for the history endpoint.
#[derive(Debug, Serialize)]
pub struct PartidaMeta {
    pub id: String,
    pub system_prompt: String,
    pub modelo_1: String,
    pub modelo_2: String,
    pub fecha: String,
}

impl From<GameSession> for PartidaMeta {
    fn from(session: GameSession) -> Self {
        Self {
            id: session.id,
            system_prompt: session.system_prompt,
            modelo_1: session.model_a,
            modelo_2: session.model_b,
            fecha: session.created_at.to_rfc3339(),
        }
    }
}

/// One recorded turn in the history endpoint's wire format.
#[derive(Debug, Serialize)]
pub struct TurnoRow {
    pub partida_id: String,
    pub numero_turno: u32,
    pub accion_usuario: String,
    pub respuesta_ia1: String,
    pub respuesta_ia2: String,
}

impl From<Turn> for TurnoRow {
    fn from(turn: Turn) -> Self {
        Self {
            partida_id: turn.session_id,
            numero_turno: turn.number,
            accion_usuario: turn.player_action,
            respuesta_ia1: turn.response_a,
            respuesta_ia2: turn.response_b,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistorialResponse {
    pub meta: PartidaMeta,
    pub turnos: Vec<TurnoRow>,
}

/// POST /api/nueva-partida - Create a session with the configured
/// narrator pair.
pub async fn nueva_partida(
    State(state): State<AppState>,
    Json(req): Json<NuevaPartidaRequest>,
) -> Result<Json<NuevaPartidaResponse>, AppError> {
    let session = state
        .games
        .create_session(req.system_prompt)
        .await
        .map_err(|e| {
            AppError::from_store(e, "Partida no encontrada", "Error al crear partida en BD")
        })?;

    Ok(Json(NuevaPartidaResponse {
        success: true,
        partida_id: session.id,
    }))
}

/// GET /api/partidas - List sessions, most recently created first.
pub async fn listar_partidas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PartidaSummary>>, AppError> {
    let sessions = state
        .games
        .list_sessions()
        .await
        .map_err(|e| AppError::from_store(e, "Partida no encontrada", "Error al obtener lista"))?;

    Ok(Json(sessions.into_iter().map(PartidaSummary::from).collect()))
}

/// GET /api/historial/{id} - Load a session and its ordered turns.
pub async fn historial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistorialResponse>, AppError> {
    let (session, turns) = state
        .games
        .load_history(&id)
        .await
        .map_err(|e| AppError::from_store(e, "Partida no encontrada", "Error al cargar historial"))?;

    Ok(Json(HistorialResponse {
        meta: PartidaMeta::from(session),
        turnos: turns.into_iter().map(TurnoRow::from).collect(),
    }))
}
