//! Course service

use std::sync::Arc;

use crate::domain::entities::{Course, CourseId, NewCourse};
use crate::domain::ports::CourseRepository;
use crate::error::AppError;

/// Service for managing courses
pub struct CourseService<CR>
where
    CR: CourseRepository,
{
    courses: Arc<CR>,
}

impl<CR> CourseService<CR>
where
    CR: CourseRepository,
{
    pub fn new(courses: Arc<CR>) -> Self {
        Self { courses }
    }

    pub async fn retrieve_all_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.courses.find_all().await?)
    }

    pub async fn add_course(&self, course: &NewCourse) -> Result<Course, AppError> {
        validate(course)?;
        Ok(self.courses.create(course).await?)
    }

    /// Overwrite a course. Returns None if it does not exist.
    pub async fn update_course(
        &self,
        id: &CourseId,
        course: &NewCourse,
    ) -> Result<Option<Course>, AppError> {
        validate(course)?;
        Ok(self.courses.update(id, course).await?)
    }

    pub async fn retrieve_course(&self, id: &CourseId) -> Result<Option<Course>, AppError> {
        Ok(self.courses.find_by_id(id).await?)
    }
}

fn validate(course: &NewCourse) -> Result<(), AppError> {
    if !course.price.is_finite() || course.price < 0.0 {
        return Err(AppError::validation(
            "Course price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
