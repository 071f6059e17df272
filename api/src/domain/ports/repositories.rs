//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::{
    Course, CourseId, NewCourse, NewPiste, NewRegistration, NewSkier, Piste, PisteId,
    Registration, RegistrationId, Skier, SkierId, Subscription, SubscriptionId, SubscriptionPlan,
    SubscriptionType,
};
use crate::error::DomainError;

/// Repository for Skier entities
///
/// Loaded skiers always carry their subscription and piste set.
#[async_trait]
pub trait SkierRepository: Send + Sync {
    /// List every skier
    async fn find_all(&self) -> Result<Vec<Skier>, DomainError>;

    /// Find a skier by ID
    async fn find_by_id(&self, id: &SkierId) -> Result<Option<Skier>, DomainError>;

    /// Create a skier, inserting its subscription first when one is given
    async fn create(
        &self,
        skier: &NewSkier,
        subscription: Option<&SubscriptionPlan>,
    ) -> Result<Skier, DomainError>;

    /// Create a skier and link the given orphan registrations to it and to a
    /// course, all in one transaction. A missing registration is NotFound and
    /// one already owned by a skier is a Conflict; either rolls back.
    async fn create_with_registrations(
        &self,
        skier: &NewSkier,
        subscription: Option<&SubscriptionPlan>,
        course_id: &CourseId,
        registrations: &[RegistrationId],
    ) -> Result<(Skier, Vec<Registration>), DomainError>;

    /// Delete a skier together with its subscription, piste links and
    /// registrations. Returns false if the skier did not exist.
    async fn delete_by_id(&self, id: &SkierId) -> Result<bool, DomainError>;

    /// Skiers whose subscription has the given type
    async fn find_by_subscription_type(
        &self,
        type_sub: SubscriptionType,
    ) -> Result<Vec<Skier>, DomainError>;

    /// The skier owning a subscription, if any
    async fn find_by_subscription_id(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Option<Skier>, DomainError>;

    /// Attach a subscription to a skier. The subscription the skier held
    /// before, if any, is deleted in the same transaction.
    async fn set_subscription(
        &self,
        id: &SkierId,
        subscription_id: &SubscriptionId,
    ) -> Result<(), DomainError>;

    /// Link a piste to a skier (no-op if already linked)
    async fn add_piste(&self, id: &SkierId, piste_id: &PisteId) -> Result<(), DomainError>;
}

/// Repository for Subscription entities
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Subscription>, DomainError>;

    /// Find a subscription by ID
    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Create a new subscription
    async fn create(&self, plan: &SubscriptionPlan) -> Result<Subscription, DomainError>;

    /// Overwrite an existing subscription. Returns None if it does not exist.
    async fn update(
        &self,
        id: &SubscriptionId,
        plan: &SubscriptionPlan,
    ) -> Result<Option<Subscription>, DomainError>;

    /// Subscriptions of a given type
    async fn find_by_type(
        &self,
        type_sub: SubscriptionType,
    ) -> Result<Vec<Subscription>, DomainError>;

    /// Subscriptions whose start date lies in `[start, end]`
    async fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, DomainError>;
}

/// Repository for Piste entities
#[async_trait]
pub trait PisteRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Piste>, DomainError>;

    /// Find a piste by ID
    async fn find_by_id(&self, id: &PisteId) -> Result<Option<Piste>, DomainError>;

    /// Create a new piste
    async fn create(&self, piste: &NewPiste) -> Result<Piste, DomainError>;

    /// Delete a piste and its skier links. Returns false if it did not exist.
    async fn delete_by_id(&self, id: &PisteId) -> Result<bool, DomainError>;
}

/// Repository for Course entities
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Course>, DomainError>;

    /// Find a course by ID
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// Create a new course
    async fn create(&self, course: &NewCourse) -> Result<Course, DomainError>;

    /// Overwrite an existing course. Returns None if it does not exist.
    async fn update(&self, id: &CourseId, course: &NewCourse)
        -> Result<Option<Course>, DomainError>;
}

/// Repository for Registration entities
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Registration>, DomainError>;

    /// Find a registration by ID
    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError>;

    /// Create an orphan registration
    async fn create(&self, registration: &NewRegistration) -> Result<Registration, DomainError>;

    /// Registrations linked to a skier
    async fn find_by_skier(&self, skier_id: &SkierId) -> Result<Vec<Registration>, DomainError>;
}
