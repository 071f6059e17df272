//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::entities::{
    Course, CourseId, CourseType, NewSkier, Piste, PisteColor, PisteId, Registration,
    RegistrationId, Skier, SkierId, Subscription, SubscriptionId, SubscriptionType, Support,
};

/// Shorthand for a calendar date known to be valid
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a test skier without subscription or pistes
pub fn test_skier() -> Skier {
    Skier {
        id: SkierId::new(),
        first_name: "Marie".to_string(),
        last_name: "Dupont".to_string(),
        date_of_birth: date(1992, 3, 14),
        city: "Annecy".to_string(),
        subscription: None,
        pistes: BTreeSet::new(),
    }
}

/// Create the input for a new skier
pub fn test_new_skier() -> NewSkier {
    NewSkier {
        first_name: "Lucas".to_string(),
        last_name: "Martin".to_string(),
        date_of_birth: date(1988, 11, 2),
        city: "Grenoble".to_string(),
    }
}

/// Create a test skier owning a subscription of the given type
pub fn test_skier_with_subscription(type_sub: SubscriptionType, start_date: NaiveDate) -> Skier {
    Skier {
        subscription: Some(test_subscription(type_sub, start_date)),
        ..test_skier()
    }
}

/// Create a subscription whose end date is derived the usual way
pub fn test_subscription(type_sub: SubscriptionType, start_date: NaiveDate) -> Subscription {
    Subscription {
        id: SubscriptionId::new(),
        start_date,
        end_date: type_sub.end_date_from(start_date).unwrap(),
        type_sub,
        price: 100.0,
    }
}

pub fn test_piste() -> Piste {
    Piste {
        id: PisteId::new(),
        name: "Combe Noire".to_string(),
        color: PisteColor::Black,
        length: 1800,
        slope: 38,
    }
}

pub fn test_course() -> Course {
    Course {
        id: CourseId::new(),
        level: 2,
        course_type: CourseType::CollectiveAdult,
        support: Support::Ski,
        price: 150.0,
        time_slot: 3,
    }
}

/// Create an orphan registration for the given week
pub fn test_registration(num_week: i32) -> Registration {
    Registration {
        id: RegistrationId::new(),
        num_week,
        skier_id: None,
        course_id: None,
    }
}
