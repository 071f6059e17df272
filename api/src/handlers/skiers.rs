//! Skier handlers
//!
//! Endpoints for skier management, subscription and piste assignment, and
//! course enrollment.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::registrations::RegistrationResponse;
use super::subscriptions::{SubscriptionRequest, SubscriptionResponse};
use crate::app::EnrolledSkier;
use crate::domain::entities::{
    CourseId, NewSkier, PisteId, RegistrationId, Skier, SkierId, SubscriptionId,
    SubscriptionType,
};
use crate::error::AppError;
use crate::AppState;

/// Request to create a skier, optionally with an inline subscription
#[derive(Debug, Deserialize)]
pub struct CreateSkierRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub subscription: Option<SubscriptionRequest>,
}

impl CreateSkierRequest {
    fn new_skier(&self) -> NewSkier {
        NewSkier {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self.date_of_birth,
            city: self.city.clone(),
        }
    }
}

/// Request to create a skier and attach orphan registrations to a course
#[derive(Debug, Deserialize)]
pub struct EnrollSkierRequest {
    #[serde(flatten)]
    pub skier: CreateSkierRequest,
    #[serde(default)]
    pub registration_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SkierResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub subscription: Option<SubscriptionResponse>,
    pub piste_ids: Vec<String>,
}

impl From<Skier> for SkierResponse {
    fn from(skier: Skier) -> Self {
        Self {
            id: skier.id.to_string(),
            first_name: skier.first_name,
            last_name: skier.last_name,
            date_of_birth: skier.date_of_birth,
            city: skier.city,
            subscription: skier.subscription.map(SubscriptionResponse::from),
            piste_ids: skier.pistes.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnrolledSkierResponse {
    pub skier: SkierResponse,
    pub registrations: Vec<RegistrationResponse>,
}

impl From<EnrolledSkier> for EnrolledSkierResponse {
    fn from(enrolled: EnrolledSkier) -> Self {
        Self {
            skier: enrolled.skier.into(),
            registrations: enrolled
                .registrations
                .into_iter()
                .map(RegistrationResponse::from)
                .collect(),
        }
    }
}

/// GET /skiers
pub async fn list_skiers(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkierResponse>>, AppError> {
    let skiers = state.skier_service.retrieve_all_skiers().await?;
    Ok(Json(skiers.into_iter().map(SkierResponse::from).collect()))
}

/// POST /skiers
///
/// Create a skier. An inline subscription gets its end date derived.
pub async fn create_skier(
    State(state): State<AppState>,
    Json(request): Json<CreateSkierRequest>,
) -> Result<(StatusCode, Json<SkierResponse>), AppError> {
    let subscription = request.subscription.as_ref().map(|s| s.new_subscription());
    let skier = state
        .skier_service
        .add_skier(&request.new_skier(), subscription.as_ref())
        .await?;

    Ok((StatusCode::CREATED, Json(skier.into())))
}

/// GET /skiers/:id
pub async fn get_skier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SkierResponse>, AppError> {
    let skier = state
        .skier_service
        .retrieve_skier(&SkierId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Skier {} not found", id)))?;

    Ok(Json(skier.into()))
}

/// DELETE /skiers/:id
///
/// Delete a skier together with its subscription, piste links and
/// registrations.
pub async fn delete_skier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.skier_service.remove_skier(&SkierId(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Skier {} not found", id)))
    }
}

/// PUT /skiers/:id/subscription/:subscription_id
pub async fn assign_subscription(
    State(state): State<AppState>,
    Path((id, subscription_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SkierResponse>, AppError> {
    let skier = state
        .skier_service
        .assign_skier_to_subscription(&SkierId(id), &SubscriptionId(subscription_id))
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Skier {} or subscription {} not found",
                id, subscription_id
            ))
        })?;

    Ok(Json(skier.into()))
}

/// PUT /skiers/:id/pistes/:piste_id
pub async fn assign_piste(
    State(state): State<AppState>,
    Path((id, piste_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SkierResponse>, AppError> {
    let skier = state
        .skier_service
        .assign_skier_to_piste(&SkierId(id), &PisteId(piste_id))
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Skier {} or piste {} not found", id, piste_id))
        })?;

    Ok(Json(skier.into()))
}

/// POST /skiers/courses/:course_id
///
/// Create a skier and link the listed orphan registrations to it and the
/// course. Nothing is written if the course or a registration is missing.
pub async fn enroll_skier(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(request): Json<EnrollSkierRequest>,
) -> Result<(StatusCode, Json<EnrolledSkierResponse>), AppError> {
    let subscription = request
        .skier
        .subscription
        .as_ref()
        .map(|s| s.new_subscription());
    let registration_ids: Vec<RegistrationId> = request
        .registration_ids
        .iter()
        .copied()
        .map(RegistrationId)
        .collect();

    let enrolled = state
        .skier_service
        .add_skier_and_assign_to_course(
            &request.skier.new_skier(),
            subscription.as_ref(),
            &CourseId(course_id),
            &registration_ids,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(enrolled.into())))
}

/// GET /skiers/by-subscription/:type_sub
pub async fn list_skiers_by_subscription_type(
    State(state): State<AppState>,
    Path(type_sub): Path<SubscriptionType>,
) -> Result<Json<Vec<SkierResponse>>, AppError> {
    let skiers = state
        .skier_service
        .retrieve_skiers_by_subscription_type(type_sub)
        .await?;
    Ok(Json(skiers.into_iter().map(SkierResponse::from).collect()))
}

/// GET /skiers/:id/registrations
pub async fn list_skier_registrations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationResponse>>, AppError> {
    let skier_id = SkierId(id);
    if state.skier_service.retrieve_skier(&skier_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Skier {} not found", id)));
    }

    let registrations = state
        .registration_service
        .retrieve_skier_registrations(&skier_id)
        .await?;
    Ok(Json(
        registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect(),
    ))
}
