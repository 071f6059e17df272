//! Ski Station API Server
//!
//! Backend for a ski resort: skiers, their subscriptions, the pistes they ski
//! and the courses they register for.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresCourseRepository, PostgresPisteRepository, PostgresRegistrationRepository,
    PostgresSkierRepository, PostgresSubscriptionRepository,
};
use app::{CourseService, PisteService, RegistrationService, SkierService, SubscriptionService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub skier_service: Arc<
        SkierService<
            PostgresSkierRepository,
            PostgresSubscriptionRepository,
            PostgresPisteRepository,
            PostgresCourseRepository,
            PostgresRegistrationRepository,
        >,
    >,
    pub subscription_service: Arc<SubscriptionService<PostgresSubscriptionRepository>>,
    pub piste_service: Arc<PisteService<PostgresPisteRepository>>,
    pub course_service: Arc<CourseService<PostgresCourseRepository>>,
    pub registration_service: Arc<RegistrationService<PostgresRegistrationRepository>>,
}

impl AppState {
    /// Wire every service to its PostgreSQL adapters
    pub fn new(db: DatabaseConnection) -> Self {
        let skier_repo = Arc::new(PostgresSkierRepository::new(db.clone()));
        let subscription_repo = Arc::new(PostgresSubscriptionRepository::new(db.clone()));
        let piste_repo = Arc::new(PostgresPisteRepository::new(db.clone()));
        let course_repo = Arc::new(PostgresCourseRepository::new(db.clone()));
        let registration_repo = Arc::new(PostgresRegistrationRepository::new(db));

        Self {
            skier_service: Arc::new(SkierService::new(
                skier_repo,
                subscription_repo.clone(),
                piste_repo.clone(),
                course_repo.clone(),
                registration_repo.clone(),
            )),
            subscription_service: Arc::new(SubscriptionService::new(subscription_repo)),
            piste_service: Arc::new(PisteService::new(piste_repo)),
            course_service: Arc::new(CourseService::new(course_repo)),
            registration_service: Arc::new(RegistrationService::new(registration_repo)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with every endpoint and the shared middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Skiers
        .route(
            "/skiers",
            get(handlers::list_skiers).post(handlers::create_skier),
        )
        .route(
            "/skiers/:id",
            get(handlers::get_skier).delete(handlers::delete_skier),
        )
        .route(
            "/skiers/:id/subscription/:subscription_id",
            put(handlers::assign_subscription),
        )
        .route("/skiers/:id/pistes/:piste_id", put(handlers::assign_piste))
        .route(
            "/skiers/:id/registrations",
            get(handlers::list_skier_registrations),
        )
        .route("/skiers/courses/:course_id", post(handlers::enroll_skier))
        .route(
            "/skiers/by-subscription/:type_sub",
            get(handlers::list_skiers_by_subscription_type),
        )
        // Subscriptions
        .route(
            "/subscriptions",
            get(handlers::list_subscriptions).post(handlers::create_subscription),
        )
        .route(
            "/subscriptions/dates",
            get(handlers::list_subscriptions_by_dates),
        )
        .route(
            "/subscriptions/:id",
            get(handlers::get_subscription).put(handlers::update_subscription),
        )
        // Pistes
        .route(
            "/pistes",
            get(handlers::list_pistes).post(handlers::create_piste),
        )
        .route(
            "/pistes/:id",
            get(handlers::get_piste).delete(handlers::delete_piste),
        )
        // Courses
        .route(
            "/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/courses/:id",
            get(handlers::get_course).put(handlers::update_course),
        )
        // Registrations
        .route(
            "/registrations",
            get(handlers::list_registrations).post(handlers::create_registration),
        )
        .route("/registrations/:id", get(handlers::get_registration))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,skistation_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ski Station API...");

    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.apply_schema {
        adapters::postgres::apply_schema(&db)
            .await
            .context("Failed to apply database schema")?;
        tracing::info!("Database schema applied");
    }

    let app = router(AppState::new(db));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
