//! Registration service
//!
//! Registrations start as orphans; they are linked to a skier and a course
//! by `SkierService::add_skier_and_assign_to_course`.

use std::sync::Arc;

use crate::domain::entities::{NewRegistration, Registration, RegistrationId, SkierId};
use crate::domain::ports::RegistrationRepository;
use crate::error::AppError;

/// Service for managing registrations
pub struct RegistrationService<RR>
where
    RR: RegistrationRepository,
{
    registrations: Arc<RR>,
}

impl<RR> RegistrationService<RR>
where
    RR: RegistrationRepository,
{
    pub fn new(registrations: Arc<RR>) -> Self {
        Self { registrations }
    }

    /// Create a registration not yet linked to any skier or course
    pub async fn add_registration(
        &self,
        registration: &NewRegistration,
    ) -> Result<Registration, AppError> {
        if !(1..=53).contains(&registration.num_week) {
            return Err(AppError::validation(format!(
                "Week number must be between 1 and 53, got {}",
                registration.num_week
            )));
        }

        Ok(self.registrations.create(registration).await?)
    }

    pub async fn retrieve_all_registrations(&self) -> Result<Vec<Registration>, AppError> {
        Ok(self.registrations.find_all().await?)
    }

    pub async fn retrieve_registration(
        &self,
        id: &RegistrationId,
    ) -> Result<Option<Registration>, AppError> {
        Ok(self.registrations.find_by_id(id).await?)
    }

    pub async fn retrieve_skier_registrations(
        &self,
        skier_id: &SkierId,
    ) -> Result<Vec<Registration>, AppError> {
        Ok(self.registrations.find_by_skier(skier_id).await?)
    }
}
