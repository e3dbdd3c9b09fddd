//! Normalization of grouped query rows into canonical count records.
//!
//! The feature query service returns one row per category value per
//! requested feature. Rows arrive with optional counts and optional,
//! untrimmed category values; ingestion maps them onto [`RawCountRecord`]
//! without dropping any row.

use std::fmt;

use bevy::log::debug;
use serde::{Deserialize, Serialize};

use crate::config::UNKNOWN_LABEL;

/// Distinct value of the grouping field a row is bucketed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Named(String),
    /// Source value was null, missing, or blank.
    Unknown,
}

impl Category {
    /// Trim `raw` and substitute [`Category::Unknown`] for missing or blank values.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if !value.is_empty() => Category::Named(value.to_string()),
            _ => Category::Unknown,
        }
    }

    /// Display label; [`Category::Unknown`] renders as `"Unknown"`.
    pub fn label(&self) -> &str {
        match self {
            Category::Named(name) => name,
            Category::Unknown => UNKNOWN_LABEL,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Category::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One grouped row as returned by the feature query service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCountRow {
    pub feature_field: String,
    pub category: Option<String>,
    pub count: Option<u64>,
}

impl RawCountRow {
    pub fn new(feature_field: impl Into<String>, category: Option<&str>, count: u64) -> Self {
        Self {
            feature_field: feature_field.into(),
            category: category.map(str::to_string),
            count: Some(count),
        }
    }
}

/// Canonical count record for one (feature, category) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCountRecord {
    pub feature_field: String,
    pub category: Category,
    pub count: u64,
}

/// Normalize `rows`, preserving input order.
///
/// Missing counts become `0`; the row is kept so its category still gets a slot.
pub fn ingest(rows: &[RawCountRow]) -> Vec<RawCountRecord> {
    let records: Vec<RawCountRecord> = rows
        .iter()
        .map(|row| RawCountRecord {
            feature_field: row.feature_field.clone(),
            category: Category::from_raw(row.category.as_deref()),
            count: row.count.unwrap_or(0),
        })
        .collect();

    let unknown = records.iter().filter(|r| r.category.is_unknown()).count();
    if unknown > 0 {
        debug!(
            "ingest: {} of {} rows had no category value, grouped as {}",
            unknown,
            records.len(),
            UNKNOWN_LABEL
        );
    }
    records
}
