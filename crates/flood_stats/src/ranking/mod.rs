//! Category ranking.
//!
//! Merges derived values across all requested features into one bucket per
//! category, ranks buckets by total (descending, stable on ties), keeps the
//! top `N` and folds the rest into a synthetic "Other" bucket when the
//! remainder is nonzero.
//!
//! A limit is either a positive integer or the single explicit
//! `"unlimited"` sentinel; anything else is rejected when the
//! [`CategoryLimit`] is constructed.

mod limit;
mod rank;


pub use limit::CategoryLimit;
pub use rank::{rank, CategoryBucket, RankedCategories, RankedCategorySet};
