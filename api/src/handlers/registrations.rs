//! Registration handlers
//!
//! Registrations are created as orphans; they get a skier and a course when a
//! skier is enrolled through `POST /skiers/courses/:course_id`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{NewRegistration, Registration, RegistrationId};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRegistrationRequest {
    pub num_week: i32,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub id: String,
    pub num_week: i32,
    pub skier_id: Option<String>,
    pub course_id: Option<String>,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id.to_string(),
            num_week: registration.num_week,
            skier_id: registration.skier_id.map(|id| id.to_string()),
            course_id: registration.course_id.map(|id| id.to_string()),
        }
    }
}

/// GET /registrations
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegistrationResponse>>, AppError> {
    let registrations = state
        .registration_service
        .retrieve_all_registrations()
        .await?;
    Ok(Json(
        registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect(),
    ))
}

/// POST /registrations
pub async fn create_registration(
    State(state): State<AppState>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let registration = state
        .registration_service
        .add_registration(&NewRegistration {
            num_week: request.num_week,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(registration.into())))
}

/// GET /registrations/:id
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationResponse>, AppError> {
    let registration = state
        .registration_service
        .retrieve_registration(&RegistrationId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Registration {} not found", id)))?;

    Ok(Json(registration.into()))
}
