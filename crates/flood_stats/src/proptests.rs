//! Property tests for the aggregation pipeline.
//!
//! Inputs are grouped rows over a small county pool, with null categories
//! and zero counts mixed in.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use proptest::prelude::*;

use crate::config::{FeatureDefinition, Scenario, OTHER_LABEL};
use crate::ingest::{ingest, RawCountRow};
use crate::metric::{derive, Metric};
use crate::pipeline::{build_chart, ChartOptions};
use crate::ranking::{rank, CategoryLimit};
use crate::series::ChartKind;
use crate::summary::{summarize, ModelCount};

const FIELDS: [&str; 3] = ["F1", "F2", "F3"];
// No "Other" here: a real "Other" category is a known collision case.
const COUNTIES: [&str; 8] = [
    "Dublin", "Cork", "Galway", "Kerry", "Mayo", "Sligo", "Clare", "Meath",
];

prop_compose! {
    /// Grouped rows over a small category pool, including null categories
    /// and zero counts.
    fn arb_rows()(
        rows in prop::collection::vec(
            (0..FIELDS.len(), prop::option::weighted(0.9, 0..COUNTIES.len()), 0u64..500),
            0..60,
        )
    ) -> Vec<RawCountRow> {
        rows.into_iter()
            .map(|(f, c, count)| RawCountRow::new(FIELDS[f], c.map(|i| COUNTIES[i]), count))
            .collect()
    }
}

fn arb_limit() -> impl Strategy<Value = CategoryLimit> {
    prop_oneof![
        (1usize..12).prop_map(|n| CategoryLimit::Limited(NonZeroUsize::new(n).unwrap())),
        Just(CategoryLimit::Unlimited),
    ]
}

fn arb_metric() -> impl Strategy<Value = Metric> {
    prop_oneof![Just(Metric::SegmentCount), Just(Metric::TotalLength)]
}

fn features() -> Vec<FeatureDefinition> {
    FIELDS
        .iter()
        .map(|f| FeatureDefinition::new(*f, format!("Model {f}"), Scenario::Primary))
        .collect()
}

/// Distinct category labels in first-encountered order.
fn distinct_labels(rows: &[RawCountRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    ingest(rows)
        .into_iter()
        .map(|r| r.category.label().to_string())
        .filter(|l| seen.insert(l.clone()))
        .collect()
}

proptest! {
    /// Property: ranking never loses or fabricates value
    #[test]
    fn prop_conservation(rows in arb_rows(), limit in arb_limit(), metric in arb_metric()) {
        let derived = derive(&ingest(&rows), metric, 0.1).unwrap();
        let input_total: f64 = derived.iter().map(|d| d.value).sum();
        let ranked = rank(&derived, limit);
        prop_assert!((ranked.grand_total() - input_total).abs() < 1e-6 * (1.0 + input_total));
    }

    /// Property: "Other" exists iff the truncated remainder is nonzero, and
    /// its total equals that remainder
    #[test]
    fn prop_other_bucket(rows in arb_rows(), n in 1usize..8) {
        let derived = derive(&ingest(&rows), Metric::SegmentCount, 0.1).unwrap();
        let unlimited = rank(&derived, CategoryLimit::Unlimited);
        let limited = rank(&derived, CategoryLimit::Limited(NonZeroUsize::new(n).unwrap()));

        let remainder: f64 = unlimited
            .ordered_buckets()
            .skip(n)
            .map(|b| b.total)
            .sum();
        prop_assert_eq!(limited.set.overflowed, remainder > 0.0);
        match limited.buckets.get(OTHER_LABEL) {
            Some(other) => {
                prop_assert!((other.total - remainder).abs() < 1e-9);
                prop_assert_eq!(limited.set.ordered_labels.last().map(String::as_str), Some(OTHER_LABEL));
                prop_assert_eq!(limited.set.ordered_labels.len(), n + 1);
            }
            None => prop_assert!(limited.set.ordered_labels.len() <= n),
        }
    }

    /// Property: a limit at or above the distinct category count never truncates
    #[test]
    fn prop_no_truncation_boundary(rows in arb_rows(), extra in 0usize..3) {
        let distinct = distinct_labels(&rows).len();
        let derived = derive(&ingest(&rows), Metric::SegmentCount, 0.1).unwrap();
        let limit = NonZeroUsize::new(distinct + extra)
            .map(CategoryLimit::Limited)
            .unwrap_or(CategoryLimit::Unlimited);
        let ranked = rank(&derived, limit);
        prop_assert!(!ranked.set.overflowed);
        prop_assert_eq!(ranked.set.ordered_labels.len(), distinct);
    }

    /// Property: identical inputs give deep-equal outputs
    #[test]
    fn prop_idempotent(rows in arb_rows(), limit in arb_limit(), metric in arb_metric()) {
        let options = ChartOptions { metric, limit, unit_length_km: 0.1, kind: ChartKind::Bar };
        let first = build_chart(&rows, &features(), &options).unwrap();
        let second = build_chart(&rows, &features(), &options).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: equal totals keep first-encountered order, and totals never increase
    #[test]
    fn prop_ranked_order(rows in arb_rows()) {
        let derived = derive(&ingest(&rows), Metric::SegmentCount, 0.1).unwrap();
        let ranked = rank(&derived, CategoryLimit::Unlimited);
        let first_seen = distinct_labels(&rows);
        let position = |label: &str| first_seen.iter().position(|l| l == label);

        let buckets: Vec<_> = ranked.ordered_buckets().collect();
        for pair in buckets.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
            if pair[0].total == pair[1].total {
                prop_assert!(position(pair[0].label.as_str()) < position(pair[1].label.as_str()));
            }
        }
    }

    /// Property: every dataset is aligned with the labels
    #[test]
    fn prop_series_alignment(rows in arb_rows(), limit in arb_limit()) {
        let options = ChartOptions {
            metric: Metric::SegmentCount,
            limit,
            unit_length_km: 0.1,
            kind: ChartKind::Bar,
        };
        let series = build_chart(&rows, &features(), &options).unwrap();
        prop_assert_eq!(series.datasets.len(), FIELDS.len());
        for dataset in &series.datasets {
            prop_assert_eq!(dataset.values.len(), series.labels.len());
            prop_assert!(dataset.values.iter().all(|v| *v >= 0.0));
        }
        let unique: HashSet<&String> = series.labels.iter().collect();
        prop_assert_eq!(unique.len(), series.labels.len());
    }

    /// Property: percentages stay in [0, 100] and are 0 for an empty network
    #[test]
    fn prop_percentage_safety(
        any in 0u64..2000,
        counts in prop::collection::vec(0u64..2000, 0..6),
        network in prop_oneof![Just(0u64), 1u64..5000],
    ) {
        let models: Vec<ModelCount> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ModelCount {
                label: format!("Model {i}"),
                model_type: "fluvial".to_string(),
                count,
            })
            .collect();
        let stat = summarize(Scenario::Primary, any, &models, network, 0.1).unwrap();

        let percentages = std::iter::once(stat.total_affected.percentage)
            .chain(stat.model_breakdown.iter().map(|m| m.percentage));
        for pct in percentages {
            prop_assert!(!pct.is_nan());
            prop_assert!((0.0..=100.0).contains(&pct));
            if network == 0 {
                prop_assert_eq!(pct, 0.0);
            }
        }
        // Property: zero-count models never appear in the breakdown
        prop_assert!(stat.model_breakdown.iter().all(|m| m.count > 0));
        prop_assert_eq!(
            stat.model_breakdown.len(),
            counts.iter().filter(|&&c| c > 0).count()
        );
    }
}
