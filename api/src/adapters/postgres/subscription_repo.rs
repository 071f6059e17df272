//! PostgreSQL adapter for SubscriptionRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Subscription, SubscriptionId, SubscriptionPlan, SubscriptionType};
use crate::domain::ports::SubscriptionRepository;
use crate::entity::subscriptions;
use crate::error::DomainError;

/// PostgreSQL implementation of SubscriptionRepository
pub struct PostgresSubscriptionRepository {
    db: DatabaseConnection,
}

impl PostgresSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_all(&self) -> Result<Vec<Subscription>, DomainError> {
        let results = subscriptions::Entity::find()
            .order_by_asc(subscriptions::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Subscription::try_from).collect()
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let result = subscriptions::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Subscription::try_from).transpose()
    }

    async fn create(&self, plan: &SubscriptionPlan) -> Result<Subscription, DomainError> {
        let result = active_model(Uuid::new_v4(), plan)
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.try_into()
    }

    async fn update(
        &self,
        id: &SubscriptionId,
        plan: &SubscriptionPlan,
    ) -> Result<Option<Subscription>, DomainError> {
        match active_model(id.0, plan).update(&self.db).await {
            Ok(model) => model.try_into().map(Some),
            Err(sea_orm::DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(DomainError::Database(e.to_string())),
        }
    }

    async fn find_by_type(
        &self,
        type_sub: SubscriptionType,
    ) -> Result<Vec<Subscription>, DomainError> {
        let results = subscriptions::Entity::find()
            .filter(subscriptions::Column::TypeSub.eq(type_sub.to_string()))
            .order_by_asc(subscriptions::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Subscription::try_from).collect()
    }

    async fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, DomainError> {
        let results = subscriptions::Entity::find()
            .filter(subscriptions::Column::StartDate.between(start, end))
            .order_by_asc(subscriptions::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Subscription::try_from).collect()
    }
}

/// Build a fully populated active model for insert or overwrite
pub(super) fn active_model(id: Uuid, plan: &SubscriptionPlan) -> subscriptions::ActiveModel {
    subscriptions::ActiveModel {
        id: Set(id),
        start_date: Set(plan.start_date),
        end_date: Set(plan.end_date),
        type_sub: Set(plan.type_sub.to_string()),
        price: Set(plan.price),
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<subscriptions::Model> for Subscription {
    type Error = DomainError;

    fn try_from(model: subscriptions::Model) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: SubscriptionId(model.id),
            start_date: model.start_date,
            end_date: model.end_date,
            type_sub: model.type_sub.parse().map_err(DomainError::Database)?,
            price: model.price,
        })
    }
}
