//! Subscription handlers
//!
//! Endpoints for creating, editing and querying subscriptions. The end date
//! is never accepted from the client.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{NewSubscription, Subscription, SubscriptionId, SubscriptionType};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating or replacing a subscription
#[derive(Debug, Deserialize)]
pub struct SubscriptionRequest {
    pub start_date: NaiveDate,
    pub type_sub: SubscriptionType,
    pub price: f32,
}

impl SubscriptionRequest {
    pub fn new_subscription(&self) -> NewSubscription {
        NewSubscription {
            start_date: self.start_date,
            type_sub: self.type_sub,
            price: self.price,
        }
    }
}

/// Query parameters for listing subscriptions
#[derive(Debug, Deserialize)]
pub struct ListSubscriptionsQuery {
    pub type_sub: Option<SubscriptionType>,
}

/// Query parameters for the start-date range lookup
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub type_sub: SubscriptionType,
    pub price: f32,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id.to_string(),
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            type_sub: subscription.type_sub,
            price: subscription.price,
        }
    }
}

fn to_responses(subscriptions: Vec<Subscription>) -> Json<Vec<SubscriptionResponse>> {
    Json(
        subscriptions
            .into_iter()
            .map(SubscriptionResponse::from)
            .collect(),
    )
}

/// GET /subscriptions
///
/// List subscriptions, optionally only those of one type.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Query(query): Query<ListSubscriptionsQuery>,
) -> Result<Json<Vec<SubscriptionResponse>>, AppError> {
    let subscriptions = match query.type_sub {
        Some(type_sub) => {
            state
                .subscription_service
                .retrieve_subscriptions_by_type(type_sub)
                .await?
        }
        None => state.subscription_service.retrieve_all_subscriptions().await?,
    };

    Ok(to_responses(subscriptions))
}

/// POST /subscriptions
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(request): Json<SubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let subscription = state
        .subscription_service
        .add_subscription(&request.new_subscription())
        .await?;

    Ok((StatusCode::CREATED, Json(subscription.into())))
}

/// GET /subscriptions/:id
pub async fn get_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let subscription = state
        .subscription_service
        .retrieve_subscription(&SubscriptionId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subscription {} not found", id)))?;

    Ok(Json(subscription.into()))
}

/// PUT /subscriptions/:id
///
/// Replace start date, type and price. The end date is derived again.
pub async fn update_subscription(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let subscription = state
        .subscription_service
        .update_subscription(&SubscriptionId(id), &request.new_subscription())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subscription {} not found", id)))?;

    Ok(Json(subscription.into()))
}

/// GET /subscriptions/dates?start=&end=
///
/// Subscriptions whose start date lies in the inclusive range.
pub async fn list_subscriptions_by_dates(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<SubscriptionResponse>>, AppError> {
    let subscriptions = state
        .subscription_service
        .retrieve_subscriptions_by_dates(query.start, query.end)
        .await?;

    Ok(to_responses(subscriptions))
}
