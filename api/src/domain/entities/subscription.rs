//! Subscription domain entity
//!
//! A time-bounded membership plan. The end date is never set directly:
//! it is derived from the start date and the subscription type.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubscriptionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscription plan type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionType {
    Annual,
    Semestriel,
    Monthly,
}

impl SubscriptionType {
    /// Length of the plan in calendar months
    pub fn duration_months(self) -> u32 {
        match self {
            SubscriptionType::Annual => 12,
            SubscriptionType::Semestriel => 6,
            SubscriptionType::Monthly => 1,
        }
    }

    /// Compute the end date of a plan starting on `start`.
    ///
    /// Month arithmetic clamps to the last day of the target month, so a
    /// monthly plan starting on Jan 31 ends on the last day of February.
    /// Returns `None` only if the result falls outside the supported calendar.
    pub fn end_date_from(self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_months(Months::new(self.duration_months()))
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionType::Annual => write!(f, "ANNUAL"),
            SubscriptionType::Semestriel => write!(f, "SEMESTRIEL"),
            SubscriptionType::Monthly => write!(f, "MONTHLY"),
        }
    }
}

impl std::str::FromStr for SubscriptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANNUAL" => Ok(SubscriptionType::Annual),
            "SEMESTRIEL" => Ok(SubscriptionType::Semestriel),
            "MONTHLY" => Ok(SubscriptionType::Monthly),
            _ => Err(format!("Unknown subscription type: {}", s)),
        }
    }
}

/// A stored subscription
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub type_sub: SubscriptionType,
    pub price: f32,
}

/// Data needed to create (or fully replace) a subscription
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub start_date: NaiveDate,
    pub type_sub: SubscriptionType,
    pub price: f32,
}

impl NewSubscription {
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.type_sub.end_date_from(self.start_date)
    }

    /// Derive the end date, producing a plan ready to persist
    pub fn plan(&self) -> Option<SubscriptionPlan> {
        Some(SubscriptionPlan {
            start_date: self.start_date,
            end_date: self.end_date()?,
            type_sub: self.type_sub,
            price: self.price,
        })
    }
}

/// A subscription whose end date has been derived and is ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPlan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub type_sub: SubscriptionType,
    pub price: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn annual_adds_one_year() {
        assert_eq!(
            SubscriptionType::Annual.end_date_from(date(2024, 1, 15)),
            Some(date(2025, 1, 15))
        );
    }

    #[test]
    fn semestriel_adds_six_months() {
        assert_eq!(
            SubscriptionType::Semestriel.end_date_from(date(2024, 1, 15)),
            Some(date(2024, 7, 15))
        );
        assert_eq!(
            SubscriptionType::Semestriel.end_date_from(date(2024, 9, 1)),
            Some(date(2025, 3, 1))
        );
    }

    #[test]
    fn monthly_adds_one_month() {
        assert_eq!(
            SubscriptionType::Monthly.end_date_from(date(2024, 1, 15)),
            Some(date(2024, 2, 15))
        );
        assert_eq!(
            SubscriptionType::Monthly.end_date_from(date(2024, 12, 10)),
            Some(date(2025, 1, 10))
        );
    }

    #[test]
    fn month_end_is_clamped() {
        assert_eq!(
            SubscriptionType::Monthly.end_date_from(date(2024, 1, 31)),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            SubscriptionType::Monthly.end_date_from(date(2023, 1, 31)),
            Some(date(2023, 2, 28))
        );
        assert_eq!(
            SubscriptionType::Annual.end_date_from(date(2024, 2, 29)),
            Some(date(2025, 2, 28))
        );
    }

    #[test]
    fn end_date_is_deterministic() {
        let types = [
            SubscriptionType::Annual,
            SubscriptionType::Semestriel,
            SubscriptionType::Monthly,
        ];
        let mut start = date(2023, 1, 1);
        while start < date(2025, 1, 1) {
            for t in types {
                assert_eq!(t.end_date_from(start), t.end_date_from(start));
                assert!(t.end_date_from(start).unwrap() > start);
            }
            start = start.succ_opt().unwrap();
        }
    }

    #[test]
    fn end_date_overflow_is_none() {
        assert_eq!(SubscriptionType::Annual.end_date_from(NaiveDate::MAX), None);
    }

    #[test]
    fn subscription_type_from_str() {
        assert_eq!(
            "ANNUAL".parse::<SubscriptionType>().unwrap(),
            SubscriptionType::Annual
        );
        assert_eq!(
            "SEMESTRIEL".parse::<SubscriptionType>().unwrap(),
            SubscriptionType::Semestriel
        );
        assert!("WEEKLY".parse::<SubscriptionType>().is_err());
    }

    #[test]
    fn subscription_type_parsing_is_case_sensitive_like_serde() {
        assert!("semestriel".parse::<SubscriptionType>().is_err());
        assert!("Monthly".parse::<SubscriptionType>().is_err());

        let lower: Result<SubscriptionType, _> = serde_json::from_str("\"monthly\"");
        assert!(lower.is_err());

        for type_sub in [
            SubscriptionType::Annual,
            SubscriptionType::Semestriel,
            SubscriptionType::Monthly,
        ] {
            let json = serde_json::to_string(&type_sub).unwrap();
            assert_eq!(json, format!("\"{}\"", type_sub));
            assert_eq!(type_sub.to_string().parse::<SubscriptionType>().unwrap(), type_sub);
        }
    }

    #[test]
    fn subscription_type_serde_uses_upper_case() {
        let json = serde_json::to_string(&SubscriptionType::Semestriel).unwrap();
        assert_eq!(json, "\"SEMESTRIEL\"");

        let parsed: SubscriptionType = serde_json::from_str("\"MONTHLY\"").unwrap();
        assert_eq!(parsed, SubscriptionType::Monthly);

        let unknown: Result<SubscriptionType, _> = serde_json::from_str("\"WEEKLY\"");
        assert!(unknown.is_err());
    }

    #[test]
    fn new_subscription_end_date() {
        let new = NewSubscription {
            start_date: date(2024, 1, 15),
            type_sub: SubscriptionType::Monthly,
            price: 49.0,
        };
        assert_eq!(new.end_date(), Some(date(2024, 2, 15)));

        let plan = new.plan().unwrap();
        assert_eq!(plan.start_date, date(2024, 1, 15));
        assert_eq!(plan.end_date, date(2024, 2, 15));
        assert_eq!(plan.type_sub, SubscriptionType::Monthly);
    }
}
