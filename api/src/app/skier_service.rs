//! Skier service
//!
//! Skier registration and the relations a skier takes part in:
//! - the subscription it owns (end date derived at creation)
//! - the pistes it is linked to
//! - course enrollment through orphan registrations
//!
//! Operations that relate two entities look both up first and return
//! `Ok(None)` without writing anything if either side is missing.

use std::collections::HashSet;
use std::sync::Arc;

use super::subscription_service::plan_subscription;
use crate::domain::entities::{
    CourseId, NewSkier, NewSubscription, PisteId, Registration, RegistrationId, Skier, SkierId,
    SubscriptionId, SubscriptionPlan, SubscriptionType,
};
use crate::domain::ports::{
    CourseRepository, PisteRepository, RegistrationRepository, SkierRepository,
    SubscriptionRepository,
};
use crate::error::{AppError, DomainError};

/// A newly created skier together with the registrations linked to it
#[derive(Debug)]
pub struct EnrolledSkier {
    pub skier: Skier,
    pub registrations: Vec<Registration>,
}

/// Service for managing skiers
pub struct SkierService<SR, SUB, PR, CR, RR>
where
    SR: SkierRepository,
    SUB: SubscriptionRepository,
    PR: PisteRepository,
    CR: CourseRepository,
    RR: RegistrationRepository,
{
    skiers: Arc<SR>,
    subscriptions: Arc<SUB>,
    pistes: Arc<PR>,
    courses: Arc<CR>,
    registrations: Arc<RR>,
}

impl<SR, SUB, PR, CR, RR> SkierService<SR, SUB, PR, CR, RR>
where
    SR: SkierRepository,
    SUB: SubscriptionRepository,
    PR: PisteRepository,
    CR: CourseRepository,
    RR: RegistrationRepository,
{
    pub fn new(
        skiers: Arc<SR>,
        subscriptions: Arc<SUB>,
        pistes: Arc<PR>,
        courses: Arc<CR>,
        registrations: Arc<RR>,
    ) -> Self {
        Self {
            skiers,
            subscriptions,
            pistes,
            courses,
            registrations,
        }
    }

    pub async fn retrieve_all_skiers(&self) -> Result<Vec<Skier>, AppError> {
        Ok(self.skiers.find_all().await?)
    }

    /// Create a skier, with its subscription when one is given
    pub async fn add_skier(
        &self,
        skier: &NewSkier,
        subscription: Option<&NewSubscription>,
    ) -> Result<Skier, AppError> {
        let plan = prepare(skier, subscription)?;
        let created = self.skiers.create(skier, plan.as_ref()).await?;

        tracing::info!(
            skier_id = %created.id,
            subscription = ?created.subscription_type(),
            "Skier added"
        );

        Ok(created)
    }

    /// Attach an existing subscription to an existing skier.
    ///
    /// A subscription belongs to at most one skier: attaching one already
    /// owned by somebody else is a conflict. A subscription the skier held
    /// before is replaced and deleted.
    pub async fn assign_skier_to_subscription(
        &self,
        skier_id: &SkierId,
        subscription_id: &SubscriptionId,
    ) -> Result<Option<Skier>, AppError> {
        let Some(mut skier) = self.skiers.find_by_id(skier_id).await? else {
            return Ok(None);
        };
        let Some(subscription) = self.subscriptions.find_by_id(subscription_id).await? else {
            return Ok(None);
        };

        if skier.subscription.as_ref().map(|s| s.id) == Some(*subscription_id) {
            return Ok(Some(skier));
        }

        if let Some(owner) = self
            .skiers
            .find_by_subscription_id(subscription_id)
            .await?
        {
            if owner.id != skier.id {
                return Err(AppError::Domain(DomainError::Conflict(format!(
                    "Subscription {} already belongs to skier {}",
                    subscription_id, owner.id
                ))));
            }
        }

        self.skiers
            .set_subscription(skier_id, subscription_id)
            .await?;
        let replaced = skier.subscription.replace(subscription).map(|s| s.id);

        tracing::debug!(
            skier_id = %skier_id,
            subscription_id = %subscription_id,
            replaced = ?replaced,
            "Subscription assigned"
        );

        Ok(Some(skier))
    }

    /// Create a skier and enroll it in a course through orphan registrations.
    ///
    /// The course and every registration must exist and no registration may
    /// already belong to a skier; otherwise nothing is written. The skier
    /// insert and the registration updates commit together.
    pub async fn add_skier_and_assign_to_course(
        &self,
        skier: &NewSkier,
        subscription: Option<&NewSubscription>,
        course_id: &CourseId,
        registration_ids: &[RegistrationId],
    ) -> Result<EnrolledSkier, AppError> {
        let plan = prepare(skier, subscription)?;

        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(AppError::Domain(DomainError::NotFound(format!(
                "Course {}",
                course_id
            ))));
        }

        let mut seen = HashSet::new();
        let mut unique_ids = Vec::with_capacity(registration_ids.len());
        for id in registration_ids {
            if !seen.insert(*id) {
                continue;
            }
            let Some(registration) = self.registrations.find_by_id(id).await? else {
                return Err(AppError::Domain(DomainError::NotFound(format!(
                    "Registration {}",
                    id
                ))));
            };
            if let Some(owner) = registration.skier_id {
                return Err(AppError::Domain(DomainError::Conflict(format!(
                    "Registration {} already belongs to skier {}",
                    id, owner
                ))));
            }
            unique_ids.push(*id);
        }

        let (created, registrations) = self
            .skiers
            .create_with_registrations(skier, plan.as_ref(), course_id, &unique_ids)
            .await?;

        tracing::info!(
            skier_id = %created.id,
            course_id = %course_id,
            registrations = registrations.len(),
            "Skier added and assigned to course"
        );

        Ok(EnrolledSkier {
            skier: created,
            registrations,
        })
    }

    /// Delete a skier; its subscription goes with it.
    /// Returns false if the skier did not exist.
    pub async fn remove_skier(&self, id: &SkierId) -> Result<bool, AppError> {
        let removed = self.skiers.delete_by_id(id).await?;
        if removed {
            tracing::info!(skier_id = %id, "Skier removed");
        }
        Ok(removed)
    }

    pub async fn retrieve_skier(&self, id: &SkierId) -> Result<Option<Skier>, AppError> {
        Ok(self.skiers.find_by_id(id).await?)
    }

    /// Link a piste to a skier. Linking the same piste again changes nothing.
    pub async fn assign_skier_to_piste(
        &self,
        skier_id: &SkierId,
        piste_id: &PisteId,
    ) -> Result<Option<Skier>, AppError> {
        let Some(mut skier) = self.skiers.find_by_id(skier_id).await? else {
            return Ok(None);
        };
        if self.pistes.find_by_id(piste_id).await?.is_none() {
            return Ok(None);
        }

        if skier.pistes.insert(*piste_id) {
            self.skiers.add_piste(skier_id, piste_id).await?;
        }

        Ok(Some(skier))
    }

    pub async fn retrieve_skiers_by_subscription_type(
        &self,
        type_sub: SubscriptionType,
    ) -> Result<Vec<Skier>, AppError> {
        Ok(self.skiers.find_by_subscription_type(type_sub).await?)
    }
}

/// Validate the skier fields and derive the subscription end date
fn prepare(
    skier: &NewSkier,
    subscription: Option<&NewSubscription>,
) -> Result<Option<SubscriptionPlan>, AppError> {
    if skier.first_name.trim().is_empty() || skier.last_name.trim().is_empty() {
        return Err(AppError::validation(
            "First and last name must not be empty".to_string(),
        ));
    }

    subscription.map(plan_subscription).transpose()
}
