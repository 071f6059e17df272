//! Course domain entity
//!
//! A bookable lesson. Skiers enroll through registrations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub Uuid);

impl CourseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CourseId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseType {
    CollectiveChildren,
    CollectiveAdult,
    Individual,
}

impl std::fmt::Display for CourseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseType::CollectiveChildren => write!(f, "COLLECTIVE_CHILDREN"),
            CourseType::CollectiveAdult => write!(f, "COLLECTIVE_ADULT"),
            CourseType::Individual => write!(f, "INDIVIDUAL"),
        }
    }
}

impl std::str::FromStr for CourseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COLLECTIVE_CHILDREN" => Ok(CourseType::CollectiveChildren),
            "COLLECTIVE_ADULT" => Ok(CourseType::CollectiveAdult),
            "INDIVIDUAL" => Ok(CourseType::Individual),
            _ => Err(format!("Unknown course type: {}", s)),
        }
    }
}

/// Equipment taught in a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Support {
    Ski,
    Snowboard,
}

impl std::fmt::Display for Support {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Support::Ski => write!(f, "SKI"),
            Support::Snowboard => write!(f, "SNOWBOARD"),
        }
    }
}

impl std::str::FromStr for Support {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SKI" => Ok(Support::Ski),
            "SNOWBOARD" => Ok(Support::Snowboard),
            _ => Err(format!("Unknown support: {}", s)),
        }
    }
}

/// A bookable lesson
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub level: i32,
    pub course_type: CourseType,
    pub support: Support,
    pub price: f32,
    pub time_slot: i32,
}

/// Data needed to create a course, or to overwrite an existing one
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub level: i32,
    pub course_type: CourseType,
    pub support: Support,
    pub price: f32,
    pub time_slot: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_type_from_str() {
        assert_eq!(
            "COLLECTIVE_CHILDREN".parse::<CourseType>().unwrap(),
            CourseType::CollectiveChildren
        );
        assert!("collective_children".parse::<CourseType>().is_err());
        assert_eq!(
            "INDIVIDUAL".parse::<CourseType>().unwrap(),
            CourseType::Individual
        );
        assert!("GROUP".parse::<CourseType>().is_err());
    }

    #[test]
    fn course_type_display_matches_serde() {
        let json = serde_json::to_string(&CourseType::CollectiveAdult).unwrap();
        assert_eq!(json, format!("\"{}\"", CourseType::CollectiveAdult));
    }

    #[test]
    fn support_from_str() {
        assert_eq!("SKI".parse::<Support>().unwrap(), Support::Ski);
        assert!("ski".parse::<Support>().is_err());
        assert_eq!("SNOWBOARD".parse::<Support>().unwrap(), Support::Snowboard);
        assert!("sled".parse::<Support>().is_err());
    }
}
