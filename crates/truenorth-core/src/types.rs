//! Core types for TrueNorth
//!
//! This module defines the fundamental shared types:
//! - Task categories
//! - Goal timeframes
//! - Timestamps
//! - Score clamping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse task category
///
/// A closed enumeration: the classifier always resolves to exactly one of
/// these six values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Personal life and home
    Personal,
    /// Professional and job-related
    Work,
    /// Fitness, medical, wellbeing
    Health,
    /// Study and skill-building
    Learning,
    /// Shopping, chores, appointments
    Errands,
    /// Fallback when no keyword rule matches
    Other,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 6] = [
        Category::Personal,
        Category::Work,
        Category::Health,
        Category::Learning,
        Category::Errands,
        Category::Other,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Goal timeframe horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// One-year horizon
    #[serde(rename = "1year")]
    OneYear,
    /// Three-year horizon
    #[serde(rename = "3year")]
    ThreeYear,
    /// Five-year horizon
    #[serde(rename = "5year")]
    FiveYear,
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::OneYear => write!(f, "1 year"),
            Timeframe::ThreeYear => write!(f, "3 year"),
            Timeframe::FiveYear => write!(f, "5 year"),
        }
    }
}

/// Timestamp type alias
pub type Timestamp = DateTime<Utc>;

/// Create a timestamp for the current moment
pub fn now() -> Timestamp {
    Utc::now()
}

/// Clamp a raw score into the [0, 100] record range
///
/// Model output and arithmetic intermediates may be negative or overshoot;
/// everything stored on a record goes through this.
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}
