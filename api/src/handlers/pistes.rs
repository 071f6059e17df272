//! Piste handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{NewPiste, Piste, PisteColor, PisteId};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePisteRequest {
    pub name: String,
    pub color: PisteColor,
    pub length: i32,
    pub slope: i32,
}

#[derive(Debug, Serialize)]
pub struct PisteResponse {
    pub id: String,
    pub name: String,
    pub color: PisteColor,
    pub length: i32,
    pub slope: i32,
}

impl From<Piste> for PisteResponse {
    fn from(piste: Piste) -> Self {
        Self {
            id: piste.id.to_string(),
            name: piste.name,
            color: piste.color,
            length: piste.length,
            slope: piste.slope,
        }
    }
}

/// GET /pistes
pub async fn list_pistes(
    State(state): State<AppState>,
) -> Result<Json<Vec<PisteResponse>>, AppError> {
    let pistes = state.piste_service.retrieve_all_pistes().await?;
    Ok(Json(pistes.into_iter().map(PisteResponse::from).collect()))
}

/// POST /pistes
pub async fn create_piste(
    State(state): State<AppState>,
    Json(request): Json<CreatePisteRequest>,
) -> Result<(StatusCode, Json<PisteResponse>), AppError> {
    let piste = state
        .piste_service
        .add_piste(&NewPiste {
            name: request.name,
            color: request.color,
            length: request.length,
            slope: request.slope,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(piste.into())))
}

/// GET /pistes/:id
pub async fn get_piste(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PisteResponse>, AppError> {
    let piste = state
        .piste_service
        .retrieve_piste(&PisteId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Piste {} not found", id)))?;

    Ok(Json(piste.into()))
}

/// DELETE /pistes/:id
///
/// Skiers linked to the piste lose the link.
pub async fn delete_piste(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.piste_service.remove_piste(&PisteId(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Piste {} not found", id)))
    }
}
