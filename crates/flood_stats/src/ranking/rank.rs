//! Merging, ranking and truncation of category buckets.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use bevy::log::warn;
use serde::{Deserialize, Serialize};

use crate::config::OTHER_LABEL;
use crate::metric::DerivedRecord;

use super::limit::CategoryLimit;

/// Derived values for one category, merged across features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub label: String,
    /// Feature field -> summed derived value.
    pub per_feature_value: BTreeMap<String, f64>,
    pub total: f64,
}

impl CategoryBucket {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            per_feature_value: BTreeMap::new(),
            total: 0.0,
        }
    }

    /// Add `value` to `feature_field`'s contribution.
    pub fn add(&mut self, feature_field: &str, value: f64) {
        *self
            .per_feature_value
            .entry(feature_field.to_string())
            .or_insert(0.0) += value;
        self.total += value;
    }

    /// Fold every contribution of `other` into this bucket.
    pub fn absorb(&mut self, other: &CategoryBucket) {
        for (field, value) in &other.per_feature_value {
            self.add(field, *value);
        }
    }

    /// Contribution of one feature; `0` when it contributed nothing.
    pub fn value_for(&self, feature_field: &str) -> f64 {
        self.per_feature_value
            .get(feature_field)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Labels to display, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCategorySet {
    pub ordered_labels: Vec<String>,
    /// True iff an "Other" bucket was synthesized from truncated categories.
    pub overflowed: bool,
}

/// Output of [`rank`]: the display order plus the bucket behind every label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCategories {
    pub set: RankedCategorySet,
    pub buckets: BTreeMap<String, CategoryBucket>,
}

impl RankedCategories {
    /// Buckets in display order.
    pub fn ordered_buckets(&self) -> impl Iterator<Item = &CategoryBucket> {
        self.set
            .ordered_labels
            .iter()
            .filter_map(|label| self.buckets.get(label))
    }

    /// Sum of every displayed bucket's total, "Other" included.
    pub fn grand_total(&self) -> f64 {
        self.buckets.values().map(|b| b.total).sum()
    }
}

/// Group derived records by category, keeping first-encountered order.
fn merge_buckets(derived: &[DerivedRecord]) -> Vec<CategoryBucket> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<CategoryBucket> = Vec::new();

    for d in derived {
        let label = d.record.category.label();
        let slot = *index.entry(label).or_insert_with(|| {
            buckets.push(CategoryBucket::new(label));
            buckets.len() - 1
        });
        buckets[slot].add(&d.record.feature_field, d.value);
    }
    buckets
}

/// Rank categories by total, descending, and truncate to `limit`.
///
/// Ties keep their first-encountered order. When truncation drops
/// categories whose totals sum to more than zero, their per-feature values
/// are folded into a trailing "Other" bucket.
pub fn rank(derived: &[DerivedRecord], limit: CategoryLimit) -> RankedCategories {
    let mut buckets = merge_buckets(derived);
    // sort_by is stable: equal totals keep input order
    buckets.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

    let truncated = match limit.max_categories() {
        Some(max) if max < buckets.len() => buckets.split_off(max),
        _ => Vec::new(),
    };

    let remainder: f64 = truncated.iter().map(|b| b.total).sum();
    let overflowed = remainder > 0.0;
    if overflowed {
        let mut other = CategoryBucket::new(OTHER_LABEL);
        for bucket in &truncated {
            other.absorb(bucket);
        }
        if let Some(pos) = buckets.iter().position(|b| b.label == OTHER_LABEL) {
            warn!(
                "rank: real category {:?} collides with the overflow bucket; merging {} truncated categories into it",
                OTHER_LABEL,
                truncated.len()
            );
            let real = buckets.remove(pos);
            other.absorb(&real);
        }
        buckets.push(other);
    }

    let ordered_labels = buckets.iter().map(|b| b.label.clone()).collect();
    RankedCategories {
        set: RankedCategorySet {
            ordered_labels,
            overflowed,
        },
        buckets: buckets.into_iter().map(|b| (b.label.clone(), b)).collect(),
    }
}
