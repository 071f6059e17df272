//! Subscription service
//!
//! Creates and edits subscriptions. The end date is always derived from the
//! start date and the type; callers never provide it.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::{
    NewSubscription, Subscription, SubscriptionId, SubscriptionPlan, SubscriptionType,
};
use crate::domain::ports::SubscriptionRepository;
use crate::error::AppError;

/// Derive the end date of a new subscription and validate its price
pub fn plan_subscription(subscription: &NewSubscription) -> Result<SubscriptionPlan, AppError> {
    if !subscription.price.is_finite() || subscription.price < 0.0 {
        return Err(AppError::validation(
            "Subscription price must be a non-negative number",
        ));
    }

    subscription.plan().ok_or_else(|| {
        AppError::validation(format!(
            "Start date {} is too far in the future for a {} subscription",
            subscription.start_date, subscription.type_sub
        ))
    })
}

/// Service for managing subscriptions
pub struct SubscriptionService<SUB>
where
    SUB: SubscriptionRepository,
{
    subscriptions: Arc<SUB>,
}

impl<SUB> SubscriptionService<SUB>
where
    SUB: SubscriptionRepository,
{
    pub fn new(subscriptions: Arc<SUB>) -> Self {
        Self { subscriptions }
    }

    /// Create a subscription with its derived end date
    pub async fn add_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, AppError> {
        let plan = plan_subscription(subscription)?;
        let created = self.subscriptions.create(&plan).await?;

        tracing::debug!(
            subscription_id = %created.id,
            type_sub = %created.type_sub,
            end_date = %created.end_date,
            "Subscription created"
        );

        Ok(created)
    }

    /// Replace start date, type and price; the end date is derived again.
    /// Returns None if the subscription does not exist.
    pub async fn update_subscription(
        &self,
        id: &SubscriptionId,
        subscription: &NewSubscription,
    ) -> Result<Option<Subscription>, AppError> {
        let plan = plan_subscription(subscription)?;
        Ok(self.subscriptions.update(id, &plan).await?)
    }

    pub async fn retrieve_subscription(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<Subscription>, AppError> {
        Ok(self.subscriptions.find_by_id(id).await?)
    }

    pub async fn retrieve_all_subscriptions(&self) -> Result<Vec<Subscription>, AppError> {
        Ok(self.subscriptions.find_all().await?)
    }

    pub async fn retrieve_subscriptions_by_type(
        &self,
        type_sub: SubscriptionType,
    ) -> Result<Vec<Subscription>, AppError> {
        Ok(self.subscriptions.find_by_type(type_sub).await?)
    }

    /// Subscriptions starting between two dates, both inclusive
    pub async fn retrieve_subscriptions_by_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, AppError> {
        if start > end {
            return Err(AppError::validation(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        Ok(self
            .subscriptions
            .find_by_start_date_between(start, end)
            .await?)
    }
}
