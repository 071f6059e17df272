//! Course handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Course, CourseId, CourseType, NewCourse, Support};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating or replacing a course
#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub level: i32,
    pub course_type: CourseType,
    pub support: Support,
    pub price: f32,
    pub time_slot: i32,
}

impl From<CourseRequest> for NewCourse {
    fn from(request: CourseRequest) -> Self {
        Self {
            level: request.level,
            course_type: request.course_type,
            support: request.support,
            price: request.price,
            time_slot: request.time_slot,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: String,
    pub level: i32,
    pub course_type: CourseType,
    pub support: Support,
    pub price: f32,
    pub time_slot: i32,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            level: course.level,
            course_type: course.course_type,
            support: course.support,
            price: course.price,
            time_slot: course.time_slot,
        }
    }
}

/// GET /courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let courses = state.course_service.retrieve_all_courses().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// POST /courses
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let course = state.course_service.add_course(&request.into()).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

/// GET /courses/:id
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = state
        .course_service
        .retrieve_course(&CourseId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))?;

    Ok(Json(course.into()))
}

/// PUT /courses/:id
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = state
        .course_service
        .update_course(&CourseId(id), &request.into())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))?;

    Ok(Json(course.into()))
}
