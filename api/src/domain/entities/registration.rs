//! Registration domain entity
//!
//! Join record between a skier and a course. Registrations are created
//! as orphans and back-filled when a skier is enrolled.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::course::CourseId;
use super::skier::SkierId;

/// Unique identifier for a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub Uuid);

impl RegistrationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RegistrationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One skier's enrollment in one course
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub num_week: i32,
    pub skier_id: Option<SkierId>,
    pub course_id: Option<CourseId>,
}

impl Registration {
    /// A registration not yet linked to a skier or a course
    pub fn is_orphan(&self) -> bool {
        self.skier_id.is_none() && self.course_id.is_none()
    }
}

/// Data needed to create an orphan registration
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub num_week: i32,
}
