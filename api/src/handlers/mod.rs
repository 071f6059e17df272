//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod courses;
pub mod pistes;
pub mod registrations;
pub mod skiers;
pub mod subscriptions;

pub use courses::{create_course, get_course, list_courses, update_course};
pub use pistes::{create_piste, delete_piste, get_piste, list_pistes};
pub use registrations::{create_registration, get_registration, list_registrations};
pub use skiers::{
    assign_piste, assign_subscription, create_skier, delete_skier, enroll_skier, get_skier,
    list_skier_registrations, list_skiers, list_skiers_by_subscription_type,
};
pub use subscriptions::{
    create_subscription, get_subscription, list_subscriptions, list_subscriptions_by_dates,
    update_subscription,
};
