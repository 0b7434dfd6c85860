//! Category classification via ordered keyword rules
//!
//! Maps a task title to one coarse [`Category`] using word-boundary,
//! case-insensitive keyword patterns evaluated in a fixed order.
//!
//! # Precedence
//!
//! The rules are evaluated Health -> Work -> Learning -> Errands -> Personal
//! and the LAST matching rule wins: a title matching several keyword sets
//! resolves to the latest rule in evaluation order, not the first. "Gym
//! meeting" is therefore Work, and "buy running shoes" is Errands even
//! though "shoes" is a Health keyword.
//!
//! This overlap behavior is almost certainly accidental rather than a
//! designed precedence, but it is what shipped; it is kept as-is and pinned
//! by test until a product decision resolves it.

use crate::types::Category;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Ordered rule table; later entries override earlier matches.
    static ref RULES: Vec<(Category, Regex)> = vec![
        (
            Category::Health,
            Regex::new(r"\b(gym|workout|exercise|run|health|doctor|dentist|medicine|yoga|fitness|training|sleep|shoes)\b").unwrap(),
        ),
        (
            Category::Work,
            Regex::new(r"\b(meeting|email|presentation|report|client|project|deadline|work|boss|colleague|interview)\b").unwrap(),
        ),
        (
            Category::Learning,
            Regex::new(r"\b(study|learn|read|book|course|class|homework|research|practice|tutorial|lesson|react|javascript|programming|module)\b").unwrap(),
        ),
        (
            Category::Errands,
            Regex::new(r"\b(buy|shop|grocery|store|pay|bill|bank|pickup|return|mail|post|clean|laundry)\b").unwrap(),
        ),
        (
            Category::Personal,
            Regex::new(r"\b(family|friend|call|visit|birthday|gift|hobby|movie|dinner|lunch|date|party)\b").unwrap(),
        ),
    ];
}

/// Classify a task title into one of the six categories
///
/// Pure and total: the same input always yields the same category, and the
/// result is always one of the enumerated values. Returns
/// [`Category::Other`] when no rule matches.
pub fn classify_category(title: &str) -> Category {
    let lower = title.to_lowercase();
    let mut category = Category::Other;

    for (rule_category, pattern) in RULES.iter() {
        if pattern.is_match(&lower) {
            category = *rule_category;
        }
    }

    category
}
