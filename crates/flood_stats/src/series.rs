//! Chart-ready series built from ranked categories.
//!
//! The engine fixes label and series order only; colors are assigned by the
//! renderer (a cyclical palette indexed by series position).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::FeatureDefinition;
use crate::ranking::{CategoryBucket, RankedCategorySet};

/// Series label of the single dataset produced for pie charts.
pub const PIE_SERIES_LABEL: &str = "Total";

/// Chart type selected on the chart panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

/// Values of one feature, aligned positionally with [`ChartSeries::labels`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub series_label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Per-label sum across all datasets.
    pub fn category_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.labels.len()];
        for dataset in &self.datasets {
            for (total, value) in totals.iter_mut().zip(&dataset.values) {
                *total += value;
            }
        }
        totals
    }

    /// Collapse every dataset into one value per category for pie rendering.
    pub fn collapse_for_pie(&self) -> ChartSeries {
        ChartSeries {
            labels: self.labels.clone(),
            datasets: vec![Dataset {
                series_label: PIE_SERIES_LABEL.to_string(),
                values: self.category_totals(),
            }],
        }
    }

    /// Shape the series for `kind`: bars keep one dataset per feature.
    pub fn for_kind(self, kind: ChartKind) -> ChartSeries {
        match kind {
            ChartKind::Bar => self,
            ChartKind::Pie => self.collapse_for_pie(),
        }
    }
}

/// Build one dataset per feature, in caller order, aligned to the ranked labels.
///
/// A feature that contributed nothing to a category gets `0` in that slot.
pub fn build(
    ranked: &RankedCategorySet,
    buckets: &BTreeMap<String, CategoryBucket>,
    features: &[FeatureDefinition],
) -> ChartSeries {
    let labels = ranked.ordered_labels.clone();
    let datasets = features
        .iter()
        .map(|feature| Dataset {
            series_label: feature.label.clone(),
            values: labels
                .iter()
                .map(|label| {
                    buckets
                        .get(label)
                        .map(|bucket| bucket.value_for(&feature.field))
                        .unwrap_or(0.0)
                })
                .collect(),
        })
        .collect();

    ChartSeries { labels, datasets }
}
