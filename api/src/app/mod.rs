//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and repository ports.

pub mod course_service;
pub mod piste_service;
pub mod registration_service;
pub mod skier_service;
pub mod subscription_service;

pub use course_service::CourseService;
pub use piste_service::PisteService;
pub use registration_service::RegistrationService;
pub use skier_service::{EnrolledSkier, SkierService};
pub use subscription_service::SubscriptionService;
