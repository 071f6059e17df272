//! Piste domain entity
//!
//! A ski run. Skiers are linked to pistes many-to-many.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a piste
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PisteId(pub Uuid);

impl PisteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PisteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PisteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PisteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty color of a piste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PisteColor {
    Green,
    Blue,
    Red,
    Black,
}

impl std::fmt::Display for PisteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PisteColor::Green => write!(f, "GREEN"),
            PisteColor::Blue => write!(f, "BLUE"),
            PisteColor::Red => write!(f, "RED"),
            PisteColor::Black => write!(f, "BLACK"),
        }
    }
}

impl std::str::FromStr for PisteColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GREEN" => Ok(PisteColor::Green),
            "BLUE" => Ok(PisteColor::Blue),
            "RED" => Ok(PisteColor::Red),
            "BLACK" => Ok(PisteColor::Black),
            _ => Err(format!("Unknown piste color: {}", s)),
        }
    }
}

/// A ski run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Piste {
    pub id: PisteId,
    pub name: String,
    pub color: PisteColor,
    /// Length in metres
    pub length: i32,
    /// Average slope in percent
    pub slope: i32,
}

/// Data needed to create a new piste
#[derive(Debug, Clone)]
pub struct NewPiste {
    pub name: String,
    pub color: PisteColor,
    pub length: i32,
    pub slope: i32,
}
