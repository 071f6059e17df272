//! SeaORM table models
//!
//! One module per table. Enum columns are stored as upper-case text and
//! parsed into domain enums by the postgres adapters.

pub mod courses;
pub mod pistes;
pub mod registrations;
pub mod skier_pistes;
pub mod skiers;
pub mod subscriptions;
