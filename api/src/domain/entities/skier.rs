//! Skier domain entity
//!
//! A registered customer of the station.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::piste::PisteId;
use super::subscription::{Subscription, SubscriptionType};

/// Unique identifier for a skier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkierId(pub Uuid);

impl SkierId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SkierId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SkierId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SkierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A skier with its owned subscription and the pistes it is linked to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skier {
    pub id: SkierId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub subscription: Option<Subscription>,
    pub pistes: BTreeSet<PisteId>,
}

impl Skier {
    pub fn subscription_type(&self) -> Option<SubscriptionType> {
        self.subscription.as_ref().map(|s| s.type_sub)
    }
}

/// Data needed to create a new skier
#[derive(Debug, Clone)]
pub struct NewSkier {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
}
