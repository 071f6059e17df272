//! Piste service

use std::sync::Arc;

use crate::domain::entities::{NewPiste, Piste, PisteId};
use crate::domain::ports::PisteRepository;
use crate::error::AppError;

/// Service for managing pistes
pub struct PisteService<PR>
where
    PR: PisteRepository,
{
    pistes: Arc<PR>,
}

impl<PR> PisteService<PR>
where
    PR: PisteRepository,
{
    pub fn new(pistes: Arc<PR>) -> Self {
        Self { pistes }
    }

    pub async fn add_piste(&self, piste: &NewPiste) -> Result<Piste, AppError> {
        if piste.name.trim().is_empty() {
            return Err(AppError::validation(
                "Piste name must not be empty".to_string(),
            ));
        }
        if piste.length <= 0 {
            return Err(AppError::validation(
                "Piste length must be positive".to_string(),
            ));
        }

        Ok(self.pistes.create(piste).await?)
    }

    pub async fn retrieve_all_pistes(&self) -> Result<Vec<Piste>, AppError> {
        Ok(self.pistes.find_all().await?)
    }

    pub async fn retrieve_piste(&self, id: &PisteId) -> Result<Option<Piste>, AppError> {
        Ok(self.pistes.find_by_id(id).await?)
    }

    /// Delete a piste, unlinking it from every skier.
    /// Returns false if the piste did not exist.
    pub async fn remove_piste(&self, id: &PisteId) -> Result<bool, AppError> {
        let removed = self.pistes.delete_by_id(id).await?;
        if removed {
            tracing::info!(piste_id = %id, "Piste removed");
        }
        Ok(removed)
    }
}
