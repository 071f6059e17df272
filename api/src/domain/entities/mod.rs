//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod course;
pub mod piste;
pub mod registration;
pub mod skier;
pub mod subscription;

pub use course::{Course, CourseId, CourseType, NewCourse, Support};
pub use piste::{NewPiste, Piste, PisteColor, PisteId};
pub use registration::{NewRegistration, Registration, RegistrationId};
pub use skier::{NewSkier, Skier, SkierId};
pub use subscription::{
    NewSubscription, Subscription, SubscriptionId, SubscriptionPlan, SubscriptionType,
};
