//! # Store Models
//!
//! Plain records; no behavior beyond formatting helpers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored trivia question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Category id; not checked against the categories table
    pub category: i64,
    pub difficulty: i64,
}

/// A question that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A question category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Category id to type label, ordered by id.
///
/// Serializes as a JSON object keyed by the id rendered as a string.
pub type CategoryMap = BTreeMap<i64, String>;

/// Build the id -> label mapping returned by the listing endpoints
pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}
