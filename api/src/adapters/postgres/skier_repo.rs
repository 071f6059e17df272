//! PostgreSQL adapter for SkierRepository
//!
//! Multi-step writes (creation with registrations, cascading delete) run in a
//! single transaction. Dropping an uncommitted transaction rolls it back.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::subscription_repo;
use crate::domain::entities::{
    CourseId, NewSkier, PisteId, Registration, RegistrationId, Skier, SkierId, Subscription,
    SubscriptionId, SubscriptionPlan, SubscriptionType,
};
use crate::domain::ports::SkierRepository;
use crate::entity::{registrations, skier_pistes, skiers, subscriptions};
use crate::error::DomainError;

/// PostgreSQL implementation of SkierRepository
pub struct PostgresSkierRepository {
    db: DatabaseConnection,
}

impl PostgresSkierRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SkierRepository for PostgresSkierRepository {
    async fn find_all(&self) -> Result<Vec<Skier>, DomainError> {
        let rows = skiers::Entity::find()
            .find_also_related(subscriptions::Entity)
            .order_by_asc(skiers::Column::LastName)
            .order_by_asc(skiers::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        load_skiers(&self.db, rows).await
    }

    async fn find_by_id(&self, id: &SkierId) -> Result<Option<Skier>, DomainError> {
        let row = skiers::Entity::find_by_id(id.0)
            .find_also_related(subscriptions::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(load_skiers(&self.db, row.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    async fn create(
        &self,
        skier: &NewSkier,
        subscription: Option<&SubscriptionPlan>,
    ) -> Result<Skier, DomainError> {
        let txn = self.db.begin().await?;
        let created = insert_skier(&txn, skier, subscription).await?;
        txn.commit().await?;

        Ok(created)
    }

    async fn create_with_registrations(
        &self,
        skier: &NewSkier,
        subscription: Option<&SubscriptionPlan>,
        course_id: &CourseId,
        registrations: &[RegistrationId],
    ) -> Result<(Skier, Vec<Registration>), DomainError> {
        let txn = self.db.begin().await?;
        let created = insert_skier(&txn, skier, subscription).await?;

        let mut linked = Vec::with_capacity(registrations.len());
        for registration_id in registrations {
            // Only orphans are claimed; a concurrent owner makes this a no-op
            let result = registrations::Entity::update_many()
                .col_expr(registrations::Column::SkierId, Expr::value(created.id.0))
                .col_expr(registrations::Column::CourseId, Expr::value(course_id.0))
                .filter(registrations::Column::Id.eq(registration_id.0))
                .filter(registrations::Column::SkierId.is_null())
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                let exists = registrations::Entity::find_by_id(registration_id.0)
                    .one(&txn)
                    .await?
                    .is_some();
                return Err(if exists {
                    DomainError::Conflict(format!(
                        "Registration {} already belongs to a skier",
                        registration_id
                    ))
                } else {
                    DomainError::NotFound(format!("Registration {}", registration_id))
                });
            }

            let model = registrations::Entity::find_by_id(registration_id.0)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    DomainError::NotFound(format!("Registration {}", registration_id))
                })?;
            linked.push(model.into());
        }

        txn.commit().await?;

        tracing::debug!(
            skier_id = %created.id,
            course_id = %course_id,
            registrations = linked.len(),
            "Linked registrations to new skier"
        );

        Ok((created, linked))
    }

    async fn delete_by_id(&self, id: &SkierId) -> Result<bool, DomainError> {
        let txn = self.db.begin().await?;

        let Some(skier) = skiers::Entity::find_by_id(id.0).one(&txn).await? else {
            return Ok(false);
        };

        skier_pistes::Entity::delete_many()
            .filter(skier_pistes::Column::SkierId.eq(id.0))
            .exec(&txn)
            .await?;

        registrations::Entity::delete_many()
            .filter(registrations::Column::SkierId.eq(id.0))
            .exec(&txn)
            .await?;

        skiers::Entity::delete_by_id(id.0).exec(&txn).await?;

        // The skier row references the subscription, so it goes last
        if let Some(subscription_id) = skier.subscription_id {
            subscriptions::Entity::delete_by_id(subscription_id)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok(true)
    }

    async fn find_by_subscription_type(
        &self,
        type_sub: SubscriptionType,
    ) -> Result<Vec<Skier>, DomainError> {
        let rows = skiers::Entity::find()
            .find_also_related(subscriptions::Entity)
            .filter(subscriptions::Column::TypeSub.eq(type_sub.to_string()))
            .order_by_asc(skiers::Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        load_skiers(&self.db, rows).await
    }

    async fn find_by_subscription_id(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Option<Skier>, DomainError> {
        let row = skiers::Entity::find()
            .filter(skiers::Column::SubscriptionId.eq(subscription_id.0))
            .find_also_related(subscriptions::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(load_skiers(&self.db, row.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    async fn set_subscription(
        &self,
        id: &SkierId,
        subscription_id: &SubscriptionId,
    ) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let skier = skiers::Entity::find_by_id(id.0)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Skier {}", id)))?;
        let previous = skier.subscription_id;

        let mut model: skiers::ActiveModel = skier.into();
        model.subscription_id = Set(Some(subscription_id.0));
        model.update(&txn).await?;

        // The replaced subscription goes with the old link
        if let Some(previous) = previous.filter(|p| *p != subscription_id.0) {
            subscriptions::Entity::delete_by_id(previous)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok(())
    }

    async fn add_piste(&self, id: &SkierId, piste_id: &PisteId) -> Result<(), DomainError> {
        let link = skier_pistes::ActiveModel {
            skier_id: Set(id.0),
            piste_id: Set(piste_id.0),
        };

        skier_pistes::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([skier_pistes::Column::SkierId, skier_pistes::Column::PisteId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Insert a skier and, when given, the subscription it owns
async fn insert_skier<C: ConnectionTrait>(
    conn: &C,
    skier: &NewSkier,
    plan: Option<&SubscriptionPlan>,
) -> Result<Skier, DomainError> {
    let subscription = match plan {
        Some(plan) => {
            let model = subscription_repo::active_model(Uuid::new_v4(), plan)
                .insert(conn)
                .await?;
            Some(Subscription::try_from(model)?)
        }
        None => None,
    };

    let model = skiers::ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(skier.first_name.clone()),
        last_name: Set(skier.last_name.clone()),
        date_of_birth: Set(skier.date_of_birth),
        city: Set(skier.city.clone()),
        subscription_id: Set(subscription.as_ref().map(|s| s.id.0)),
    }
    .insert(conn)
    .await?;

    Ok(to_skier(model, subscription, BTreeSet::new()))
}

/// Attach subscriptions and piste sets to loaded skier rows
async fn load_skiers<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<(skiers::Model, Option<subscriptions::Model>)>,
) -> Result<Vec<Skier>, DomainError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|(s, _)| s.id).collect();
    let links = skier_pistes::Entity::find()
        .filter(skier_pistes::Column::SkierId.is_in(ids))
        .all(conn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    let mut pistes: HashMap<Uuid, BTreeSet<PisteId>> = HashMap::new();
    for link in links {
        pistes
            .entry(link.skier_id)
            .or_default()
            .insert(PisteId(link.piste_id));
    }

    rows.into_iter()
        .map(|(skier, subscription)| -> Result<Skier, DomainError> {
            let subscription = subscription.map(Subscription::try_from).transpose()?;
            let skier_pistes = pistes.remove(&skier.id).unwrap_or_default();
            Ok(to_skier(skier, subscription, skier_pistes))
        })
        .collect()
}

fn to_skier(
    model: skiers::Model,
    subscription: Option<Subscription>,
    pistes: BTreeSet<PisteId>,
) -> Skier {
    Skier {
        id: SkierId(model.id),
        first_name: model.first_name,
        last_name: model.last_name,
        date_of_birth: model.date_of_birth,
        city: model.city,
        subscription,
        pistes,
    }
}
