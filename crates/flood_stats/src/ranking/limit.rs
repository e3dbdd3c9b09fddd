//! `CategoryLimit`: the "maximum categories" selection.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::UNLIMITED_SENTINEL;
use crate::error::AggregationError;

/// Maximum number of real categories a chart shows before folding the
/// remainder into "Other".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLimit", into = "RawLimit")]
pub enum CategoryLimit {
    Limited(NonZeroUsize),
    Unlimited,
}

impl CategoryLimit {
    /// `None` when unlimited.
    pub fn max_categories(&self) -> Option<usize> {
        match self {
            CategoryLimit::Limited(n) => Some(n.get()),
            CategoryLimit::Unlimited => None,
        }
    }
}

impl TryFrom<i64> for CategoryLimit {
    type Error = AggregationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(CategoryLimit::Limited)
            .ok_or_else(|| AggregationError::InvalidCategoryLimit(value.to_string()))
    }
}

impl FromStr for CategoryLimit {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == UNLIMITED_SENTINEL {
            return Ok(CategoryLimit::Unlimited);
        }
        s.parse::<i64>()
            .map_err(|_| AggregationError::InvalidCategoryLimit(s.to_string()))
            .and_then(CategoryLimit::try_from)
    }
}

impl fmt::Display for CategoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryLimit::Limited(n) => write!(f, "{n}"),
            CategoryLimit::Unlimited => f.write_str(UNLIMITED_SENTINEL),
        }
    }
}

/// Wire form: a bare integer or the `"unlimited"` string.
///
/// Untagged variants are tried in order, so non-negative integers land in
/// `Unsigned` and only negatives reach `Signed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl TryFrom<RawLimit> for CategoryLimit {
    type Error = AggregationError;

    fn try_from(raw: RawLimit) -> Result<Self, Self::Error> {
        match raw {
            RawLimit::Unsigned(n) => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .map(CategoryLimit::Limited)
                .ok_or_else(|| AggregationError::InvalidCategoryLimit(n.to_string())),
            RawLimit::Signed(n) => CategoryLimit::try_from(n),
            RawLimit::Text(text) if text == UNLIMITED_SENTINEL => Ok(CategoryLimit::Unlimited),
            RawLimit::Text(text) => Err(AggregationError::InvalidCategoryLimit(text)),
        }
    }
}

impl From<CategoryLimit> for RawLimit {
    fn from(limit: CategoryLimit) -> Self {
        match limit {
            CategoryLimit::Limited(n) => {
                RawLimit::Unsigned(u64::try_from(n.get()).unwrap_or(u64::MAX))
            }
            CategoryLimit::Unlimited => RawLimit::Text(UNLIMITED_SENTINEL.to_string()),
        }
    }
}
