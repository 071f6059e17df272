//! PostgreSQL adapter for CourseRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::domain::entities::{Course, CourseId, NewCourse};
use crate::domain::ports::CourseRepository;
use crate::entity::courses;
use crate::error::DomainError;

/// PostgreSQL implementation of CourseRepository
pub struct PostgresCourseRepository {
    db: DatabaseConnection,
}

impl PostgresCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn find_all(&self) -> Result<Vec<Course>, DomainError> {
        let results = courses::Entity::find()
            .order_by_asc(courses::Column::TimeSlot)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Course::try_from).collect()
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let result = courses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Course::try_from).transpose()
    }

    async fn create(&self, course: &NewCourse) -> Result<Course, DomainError> {
        let result = active_model(Uuid::new_v4(), course)
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.try_into()
    }

    async fn update(
        &self,
        id: &CourseId,
        course: &NewCourse,
    ) -> Result<Option<Course>, DomainError> {
        match active_model(id.0, course).update(&self.db).await {
            Ok(model) => model.try_into().map(Some),
            Err(sea_orm::DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(DomainError::Database(e.to_string())),
        }
    }
}

fn active_model(id: Uuid, course: &NewCourse) -> courses::ActiveModel {
    courses::ActiveModel {
        id: Set(id),
        level: Set(course.level),
        course_type: Set(course.course_type.to_string()),
        support: Set(course.support.to_string()),
        price: Set(course.price),
        time_slot: Set(course.time_slot),
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<courses::Model> for Course {
    type Error = DomainError;

    fn try_from(model: courses::Model) -> Result<Self, Self::Error> {
        Ok(Course {
            id: CourseId(model.id),
            level: model.level,
            course_type: model.course_type.parse().map_err(DomainError::Database)?,
            support: model.support.parse().map_err(DomainError::Database)?,
            price: model.price,
            time_slot: model.time_slot,
        })
    }
}
