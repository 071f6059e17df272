//! In-memory implementations of port traits
//!
//! `InMemoryResort` implements every repository port over one shared set of
//! tables, so relations (skier to subscription, skier to piste, registrations)
//! behave like the relational store. Every mutating port call bumps a write
//! counter that tests use to assert "no persistence write happened".

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::entities::{
    Course, CourseId, NewCourse, NewPiste, NewRegistration, NewSkier, Piste, PisteId,
    Registration, RegistrationId, Skier, SkierId, Subscription, SubscriptionId, SubscriptionPlan,
    SubscriptionType,
};
use crate::domain::ports::{
    CourseRepository, PisteRepository, RegistrationRepository, SkierRepository,
    SubscriptionRepository,
};
use crate::error::DomainError;

// ============================================================================
// Tables
// ============================================================================

/// Stored skier row; the subscription is referenced, not embedded
#[derive(Clone)]
struct SkierRow {
    id: SkierId,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    city: String,
    subscription_id: Option<SubscriptionId>,
    pistes: BTreeSet<PisteId>,
}

#[derive(Default)]
struct Tables {
    skiers: HashMap<SkierId, SkierRow>,
    subscriptions: HashMap<SubscriptionId, Subscription>,
    pistes: HashMap<PisteId, Piste>,
    courses: HashMap<CourseId, Course>,
    registrations: HashMap<RegistrationId, Registration>,
}

impl Tables {
    fn materialize(&self, row: &SkierRow) -> Skier {
        Skier {
            id: row.id,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            date_of_birth: row.date_of_birth,
            city: row.city.clone(),
            subscription: row
                .subscription_id
                .and_then(|id| self.subscriptions.get(&id).cloned()),
            pistes: row.pistes.clone(),
        }
    }

    fn insert_skier(&mut self, skier: &NewSkier, plan: Option<&SubscriptionPlan>) -> Skier {
        let subscription_id = plan.map(|plan| {
            let subscription = to_subscription(SubscriptionId::new(), plan);
            let id = subscription.id;
            self.subscriptions.insert(id, subscription);
            id
        });

        let row = SkierRow {
            id: SkierId::new(),
            first_name: skier.first_name.clone(),
            last_name: skier.last_name.clone(),
            date_of_birth: skier.date_of_birth,
            city: skier.city.clone(),
            subscription_id,
            pistes: BTreeSet::new(),
        };
        let skier = self.materialize(&row);
        self.skiers.insert(row.id, row);
        skier
    }
}

fn to_subscription(id: SubscriptionId, plan: &SubscriptionPlan) -> Subscription {
    Subscription {
        id,
        start_date: plan.start_date,
        end_date: plan.end_date,
        type_sub: plan.type_sub,
        price: plan.price,
    }
}

fn sorted_skiers(tables: &Tables, filter: impl Fn(&Skier) -> bool) -> Vec<Skier> {
    let mut skiers: Vec<Skier> = tables
        .skiers
        .values()
        .map(|row| tables.materialize(row))
        .filter(|s| filter(s))
        .collect();
    skiers.sort_by(|a, b| {
        (&a.last_name, &a.first_name, a.id.0).cmp(&(&b.last_name, &b.first_name, b.id.0))
    });
    skiers
}

// ============================================================================
// In-Memory Resort
// ============================================================================

#[derive(Default)]
pub struct InMemoryResort {
    tables: RwLock<Tables>,
    writes: AtomicUsize,
}

impl InMemoryResort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a skier (and the subscription it owns)
    pub fn with_skier(self, skier: Skier) -> Self {
        {
            let mut tables = self.tables.write().unwrap();
            let subscription_id = skier.subscription.as_ref().map(|s| s.id);
            if let Some(subscription) = skier.subscription {
                tables.subscriptions.insert(subscription.id, subscription);
            }
            tables.skiers.insert(
                skier.id,
                SkierRow {
                    id: skier.id,
                    first_name: skier.first_name,
                    last_name: skier.last_name,
                    date_of_birth: skier.date_of_birth,
                    city: skier.city,
                    subscription_id,
                    pistes: skier.pistes,
                },
            );
        }
        self
    }

    /// Pre-populate with an unowned subscription
    pub fn with_subscription(self, subscription: Subscription) -> Self {
        self.tables
            .write()
            .unwrap()
            .subscriptions
            .insert(subscription.id, subscription);
        self
    }

    pub fn with_piste(self, piste: Piste) -> Self {
        self.tables.write().unwrap().pistes.insert(piste.id, piste);
        self
    }

    pub fn with_course(self, course: Course) -> Self {
        self.tables
            .write()
            .unwrap()
            .courses
            .insert(course.id, course);
        self
    }

    pub fn with_registration(self, registration: Registration) -> Self {
        self.tables
            .write()
            .unwrap()
            .registrations
            .insert(registration.id, registration);
        self
    }

    /// Number of mutating repository calls made so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn skier_count(&self) -> usize {
        self.tables.read().unwrap().skiers.len()
    }

    pub fn subscription_count(&self) -> usize {
        self.tables.read().unwrap().subscriptions.len()
    }

    pub fn skier(&self, id: &SkierId) -> Option<Skier> {
        let tables = self.tables.read().unwrap();
        tables.skiers.get(id).map(|row| tables.materialize(row))
    }

    pub fn registration(&self, id: &RegistrationId) -> Option<Registration> {
        self.tables.read().unwrap().registrations.get(id).cloned()
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SkierRepository for InMemoryResort {
    async fn find_all(&self) -> Result<Vec<Skier>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(sorted_skiers(&tables, |_| true))
    }

    async fn find_by_id(&self, id: &SkierId) -> Result<Option<Skier>, DomainError> {
        Ok(self.skier(id))
    }

    async fn create(
        &self,
        skier: &NewSkier,
        subscription: Option<&SubscriptionPlan>,
    ) -> Result<Skier, DomainError> {
        self.record_write();
        let mut tables = self.tables.write().unwrap();
        Ok(tables.insert_skier(skier, subscription))
    }

    async fn create_with_registrations(
        &self,
        skier: &NewSkier,
        subscription: Option<&SubscriptionPlan>,
        course_id: &CourseId,
        registrations: &[RegistrationId],
    ) -> Result<(Skier, Vec<Registration>), DomainError> {
        self.record_write();
        let mut tables = self.tables.write().unwrap();

        // Check everything up front so a failure leaves the tables untouched
        if !tables.courses.contains_key(course_id) {
            return Err(DomainError::NotFound(format!("Course {}", course_id)));
        }
        if let Some(missing) = registrations
            .iter()
            .find(|id| !tables.registrations.contains_key(*id))
        {
            return Err(DomainError::NotFound(format!("Registration {}", missing)));
        }
        if let Some(owned) = registrations
            .iter()
            .filter_map(|id| tables.registrations.get(id))
            .find(|r| r.skier_id.is_some())
        {
            return Err(DomainError::Conflict(format!(
                "Registration {} already belongs to a skier",
                owned.id
            )));
        }

        let created = tables.insert_skier(skier, subscription);
        let mut linked = Vec::with_capacity(registrations.len());
        for id in registrations {
            if let Some(registration) = tables.registrations.get_mut(id) {
                registration.skier_id = Some(created.id);
                registration.course_id = Some(*course_id);
                linked.push(registration.clone());
            }
        }

        Ok((created, linked))
    }

    async fn delete_by_id(&self, id: &SkierId) -> Result<bool, DomainError> {
        self.record_write();
        let mut tables = self.tables.write().unwrap();

        let Some(row) = tables.skiers.remove(id) else {
            return Ok(false);
        };
        tables.registrations.retain(|_, r| r.skier_id != Some(*id));
        if let Some(subscription_id) = row.subscription_id {
            tables.subscriptions.remove(&subscription_id);
        }

        Ok(true)
    }

    async fn find_by_subscription_type(
        &self,
        type_sub: SubscriptionType,
    ) -> Result<Vec<Skier>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(sorted_skiers(&tables, |s| {
            s.subscription_type() == Some(type_sub)
        }))
    }

    async fn find_by_subscription_id(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Option<Skier>, DomainError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .skiers
            .values()
            .find(|row| row.subscription_id == Some(*subscription_id))
            .map(|row| tables.materialize(row)))
    }

    async fn set_subscription(
        &self,
        id: &SkierId,
        subscription_id: &SubscriptionId,
    ) -> Result<(), DomainError> {
        self.record_write();
        let mut tables = self.tables.write().unwrap();
        let row = tables
            .skiers
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Skier {}", id)))?;
        let previous = row.subscription_id.replace(*subscription_id);
        if let Some(previous) = previous.filter(|p| p != subscription_id) {
            tables.subscriptions.remove(&previous);
        }
        Ok(())
    }

    async fn add_piste(&self, id: &SkierId, piste_id: &PisteId) -> Result<(), DomainError> {
        self.record_write();
        let mut tables = self.tables.write().unwrap();
        let row = tables
            .skiers
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Skier {}", id)))?;
        row.pistes.insert(*piste_id);
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryResort {
    async fn find_all(&self) -> Result<Vec<Subscription>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut subscriptions: Vec<Subscription> =
            tables.subscriptions.values().cloned().collect();
        subscriptions.sort_by_key(|s| (s.start_date, s.id.0));
        Ok(subscriptions)
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.tables.read().unwrap().subscriptions.get(id).cloned())
    }

    async fn create(&self, plan: &SubscriptionPlan) -> Result<Subscription, DomainError> {
        self.record_write();
        let subscription = to_subscription(SubscriptionId::new(), plan);
        self.tables
            .write()
            .unwrap()
            .subscriptions
            .insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn update(
        &self,
        id: &SubscriptionId,
        plan: &SubscriptionPlan,
    ) -> Result<Option<Subscription>, DomainError> {
        self.record_write();
        let mut tables = self.tables.write().unwrap();
        Ok(tables.subscriptions.get_mut(id).map(|existing| {
            *existing = to_subscription(*id, plan);
            existing.clone()
        }))
    }

    async fn find_by_type(
        &self,
        type_sub: SubscriptionType,
    ) -> Result<Vec<Subscription>, DomainError> {
        let all = SubscriptionRepository::find_all(self).await?;
        Ok(all.into_iter().filter(|s| s.type_sub == type_sub).collect())
    }

    async fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, DomainError> {
        let all = SubscriptionRepository::find_all(self).await?;
        Ok(all
            .into_iter()
            .filter(|s| s.start_date >= start && s.start_date <= end)
            .collect())
    }
}

#[async_trait]
impl PisteRepository for InMemoryResort {
    async fn find_all(&self) -> Result<Vec<Piste>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut pistes: Vec<Piste> = tables.pistes.values().cloned().collect();
        pistes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pistes)
    }

    async fn find_by_id(&self, id: &PisteId) -> Result<Option<Piste>, DomainError> {
        Ok(self.tables.read().unwrap().pistes.get(id).cloned())
    }

    async fn create(&self, piste: &NewPiste) -> Result<Piste, DomainError> {
        self.record_write();
        let piste = Piste {
            id: PisteId::new(),
            name: piste.name.clone(),
            color: piste.color,
            length: piste.length,
            slope: piste.slope,
        };
        self.tables
            .write()
            .unwrap()
            .pistes
            .insert(piste.id, piste.clone());
        Ok(piste)
    }

    async fn delete_by_id(&self, id: &PisteId) -> Result<bool, DomainError> {
        self.record_write();
        let mut tables = self.tables.write().unwrap();
        for row in tables.skiers.values_mut() {
            row.pistes.remove(id);
        }
        Ok(tables.pistes.remove(id).is_some())
    }
}

#[async_trait]
impl CourseRepository for InMemoryResort {
    async fn find_all(&self) -> Result<Vec<Course>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut courses: Vec<Course> = tables.courses.values().cloned().collect();
        courses.sort_by_key(|c| (c.time_slot, c.id.0));
        Ok(courses)
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        Ok(self.tables.read().unwrap().courses.get(id).cloned())
    }

    async fn create(&self, course: &NewCourse) -> Result<Course, DomainError> {
        self.record_write();
        let course = to_course(CourseId::new(), course);
        self.tables
            .write()
            .unwrap()
            .courses
            .insert(course.id, course.clone());
        Ok(course)
    }

    async fn update(
        &self,
        id: &CourseId,
        course: &NewCourse,
    ) -> Result<Option<Course>, DomainError> {
        self.record_write();
        let mut tables = self.tables.write().unwrap();
        Ok(tables.courses.get_mut(id).map(|existing| {
            *existing = to_course(*id, course);
            existing.clone()
        }))
    }
}

fn to_course(id: CourseId, course: &NewCourse) -> Course {
    Course {
        id,
        level: course.level,
        course_type: course.course_type,
        support: course.support,
        price: course.price,
        time_slot: course.time_slot,
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryResort {
    async fn find_all(&self) -> Result<Vec<Registration>, DomainError> {
        let tables = self.tables.read().unwrap();
        let mut registrations: Vec<Registration> =
            tables.registrations.values().cloned().collect();
        registrations.sort_by_key(|r| (r.num_week, r.id.0));
        Ok(registrations)
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        Ok(self.registration(id))
    }

    async fn create(&self, registration: &NewRegistration) -> Result<Registration, DomainError> {
        self.record_write();
        let registration = Registration {
            id: RegistrationId::new(),
            num_week: registration.num_week,
            skier_id: None,
            course_id: None,
        };
        self.tables
            .write()
            .unwrap()
            .registrations
            .insert(registration.id, registration.clone());
        Ok(registration)
    }

    async fn find_by_skier(&self, skier_id: &SkierId) -> Result<Vec<Registration>, DomainError> {
        let all = RegistrationRepository::find_all(self).await?;
        Ok(all
            .into_iter()
            .filter(|r| r.skier_id == Some(*skier_id))
            .collect())
    }
}
