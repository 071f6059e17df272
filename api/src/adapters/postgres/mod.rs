//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod course_repo;
pub mod piste_repo;
pub mod registration_repo;
pub mod skier_repo;
pub mod subscription_repo;


use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

pub use course_repo::PostgresCourseRepository;
pub use piste_repo::PostgresPisteRepository;
pub use registration_repo::PostgresRegistrationRepository;
pub use skier_repo::PostgresSkierRepository;
pub use subscription_repo::PostgresSubscriptionRepository;

/// Bundled schema. Every statement is idempotent.
const SCHEMA: &str = include_str!("../../../migrations/0001_ski_station.sql");

/// Create any missing tables and indexes
pub async fn apply_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(SCHEMA).await?;
    Ok(())
}
