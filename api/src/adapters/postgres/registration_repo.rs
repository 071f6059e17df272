//! PostgreSQL adapter for RegistrationRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    CourseId, NewRegistration, Registration, RegistrationId, SkierId,
};
use crate::domain::ports::RegistrationRepository;
use crate::entity::registrations;
use crate::error::DomainError;

/// PostgreSQL implementation of RegistrationRepository
pub struct PostgresRegistrationRepository {
    db: DatabaseConnection,
}

impl PostgresRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn find_all(&self) -> Result<Vec<Registration>, DomainError> {
        let results = registrations::Entity::find()
            .order_by_asc(registrations::Column::NumWeek)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        let result = registrations::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, registration: &NewRegistration) -> Result<Registration, DomainError> {
        let model = registrations::ActiveModel {
            id: Set(Uuid::new_v4()),
            num_week: Set(registration.num_week),
            skier_id: Set(None),
            course_id: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_skier(&self, skier_id: &SkierId) -> Result<Vec<Registration>, DomainError> {
        let results = registrations::Entity::find()
            .filter(registrations::Column::SkierId.eq(skier_id.0))
            .order_by_asc(registrations::Column::NumWeek)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<registrations::Model> for Registration {
    fn from(model: registrations::Model) -> Self {
        Registration {
            id: RegistrationId(model.id),
            num_week: model.num_week,
            skier_id: model.skier_id.map(SkierId),
            course_id: model.course_id.map(CourseId),
        }
    }
}
