//! End-to-end scenarios for the aggregation engine through its public API.
//!
//! Covers:
//! - Two-feature county chart with and without an "Other" bucket
//! - Null categories folded into "Unknown"
//! - Length metric conversion
//! - Zero network totals in scenario statistics
//! - Stable ordering of tied categories
//! - A config-driven chart + statistics request
//!
//! Run: cargo test -p flood_stats --test aggregation_scenarios

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use flood_stats::summary::ModelCount;
use flood_stats::{
    build, build_chart, build_statistics, derive, ingest, rank, summarize, CategoryLimit,
    ChartKind, ChartOptions, DashboardConfig, FeatureDefinition, Metric, RawCountRow, Scenario,
};

fn limit(n: usize) -> CategoryLimit {
    CategoryLimit::Limited(NonZeroUsize::new(n).unwrap())
}

fn county_rows() -> Vec<RawCountRow> {
    vec![
        RawCountRow::new("F1", Some("Dublin"), 40),
        RawCountRow::new("F1", Some("Cork"), 30),
        RawCountRow::new("F2", Some("Dublin"), 10),
        RawCountRow::new("F2", Some("Cork"), 5),
    ]
}

fn county_features() -> Vec<FeatureDefinition> {
    vec![
        FeatureDefinition::new("F1", "River flooding", Scenario::Primary),
        FeatureDefinition::new("F2", "Coastal flooding", Scenario::Primary),
    ]
}

// ---------------------------------------------------------------------------
// 1. Limit covers every category: no "Other"
// ---------------------------------------------------------------------------

#[test]
fn test_two_categories_within_limit() {
    let derived = derive(&ingest(&county_rows()), Metric::SegmentCount, 0.1).unwrap();
    let ranked = rank(&derived, limit(2));
    let series = build(&ranked.set, &ranked.buckets, &county_features());

    assert_eq!(series.labels, vec!["Dublin", "Cork"]);
    assert!(!ranked.set.overflowed);
    assert_eq!(series.datasets[0].values, vec![40.0, 30.0]);
    assert_eq!(series.datasets[1].values, vec![10.0, 5.0]);
}

// ---------------------------------------------------------------------------
// 2. Limit of one: Cork folds into "Other"
// ---------------------------------------------------------------------------

#[test]
fn test_overflow_into_other() {
    let derived = derive(&ingest(&county_rows()), Metric::SegmentCount, 0.1).unwrap();
    let ranked = rank(&derived, limit(1));
    let series = build(&ranked.set, &ranked.buckets, &county_features());

    assert_eq!(series.labels, vec!["Dublin", "Other"]);
    assert!(ranked.set.overflowed);
    assert!((ranked.buckets["Other"].total - 35.0).abs() < f64::EPSILON);
    assert_eq!(series.datasets[0].values, vec![40.0, 30.0]);
    assert_eq!(series.datasets[1].values, vec![10.0, 5.0]);
}

// ---------------------------------------------------------------------------
// 3. Null category becomes "Unknown"
// ---------------------------------------------------------------------------

#[test]
fn test_null_category_becomes_unknown() {
    let mut rows = county_rows();
    rows.push(RawCountRow::new("F1", None, 3));
    let options = ChartOptions {
        metric: Metric::SegmentCount,
        limit: CategoryLimit::Unlimited,
        unit_length_km: 0.1,
        kind: ChartKind::Bar,
    };
    let series = build_chart(&rows, &county_features(), &options).unwrap();
    assert_eq!(series.labels, vec!["Dublin", "Cork", "Unknown"]);
    assert_eq!(series.datasets[0].values[2], 3.0);
    assert_eq!(series.datasets[1].values[2], 0.0);
}

// ---------------------------------------------------------------------------
// 4. Length metric
// ---------------------------------------------------------------------------

#[test]
fn test_length_metric_value() {
    let rows = vec![RawCountRow::new("F1", Some("Dublin"), 40)];
    let derived = derive(&ingest(&rows), Metric::TotalLength, 0.1).unwrap();
    assert!((derived[0].value - 4.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// 5. Empty network: every percentage is zero
// ---------------------------------------------------------------------------

#[test]
fn test_zero_network_total() {
    let models = vec![
        ModelCount {
            label: "River".to_string(),
            model_type: "fluvial".to_string(),
            count: 12,
        },
        ModelCount {
            label: "Coastal".to_string(),
            model_type: "coastal".to_string(),
            count: 4,
        },
    ];
    let stat = summarize(Scenario::Primary, 14, &models, 0, 0.1).unwrap();
    assert_eq!(stat.total_affected.percentage, 0.0);
    assert_eq!(stat.model_breakdown.len(), 2);
    assert!(stat.model_breakdown.iter().all(|m| m.percentage == 0.0));
}

// ---------------------------------------------------------------------------
// 6. Ties keep input order, not alphabetical order
// ---------------------------------------------------------------------------

#[test]
fn test_tied_categories_keep_input_order() {
    let rows = vec![
        RawCountRow::new("F1", Some("Cork"), 50),
        RawCountRow::new("F1", Some("Dublin"), 50),
    ];
    let derived = derive(&ingest(&rows), Metric::SegmentCount, 0.1).unwrap();
    let ranked = rank(&derived, CategoryLimit::Unlimited);
    assert_eq!(ranked.set.ordered_labels, vec!["Cork", "Dublin"]);
}

// ---------------------------------------------------------------------------
// Config-driven request
// ---------------------------------------------------------------------------

const CONFIG: &str = r#"{
    "features": [
        { "field": "h_any", "label": "Any historic flood", "scenario": "primary", "union_indicator": true },
        { "field": "h_river", "label": "Historic river", "scenario": "primary", "model_type": "fluvial" },
        { "field": "h_coast", "label": "Historic coastal", "scenario": "primary", "model_type": "coastal" },
        { "field": "f_any", "label": "Any future flood", "scenario": "secondary", "union_indicator": true },
        { "field": "f_river", "label": "Future river", "scenario": "secondary", "model_type": "fluvial" }
    ],
    "category_fields": { "COUNTY": "County" },
    "category_limits": [2, 5, "unlimited"],
    "default_limit": 2,
    "unit_length_km": 0.25
}"#;

#[test]
fn test_config_driven_chart_and_statistics() {
    let config = DashboardConfig::from_json(CONFIG).expect("valid config");

    let selected: Vec<FeatureDefinition> = config
        .chartable_features()
        .filter(|f| f.scenario == Scenario::Primary)
        .cloned()
        .collect();
    let rows = vec![
        RawCountRow::new("h_river", Some("Kerry"), 8),
        RawCountRow::new("h_river", Some("Mayo"), 6),
        RawCountRow::new("h_coast", Some("Mayo"), 4),
        RawCountRow::new("h_coast", Some("Clare"), 3),
        RawCountRow::new("h_coast", Some(" "), 1),
    ];
    let options = ChartOptions::from_config(&config, Metric::TotalLength);
    let series = build_chart(&rows, &selected, &options).unwrap();
    assert_eq!(series.labels, vec!["Mayo", "Kerry", "Other"]);
    assert_eq!(series.datasets.len(), 2);
    assert_eq!(series.datasets[0].series_label, "Historic river");
    assert_eq!(series.datasets[0].values, vec![1.5, 2.0, 0.0]);
    assert_eq!(series.datasets[1].values, vec![1.0, 0.0, 1.0]);

    let counts: BTreeMap<String, u64> = [
        ("h_any", 11),
        ("h_river", 9),
        ("h_coast", 0),
        ("f_any", 30),
        ("f_river", 30),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    let stats = build_statistics(
        &Scenario::ALL,
        &config.features,
        &counts,
        200,
        config.unit_length_km,
    )
    .unwrap();

    assert_eq!(stats.len(), 2);
    let historic = &stats[0];
    assert_eq!(historic.total_affected.count, 11);
    assert!((historic.total_affected.length_km - 2.75).abs() < 1e-9);
    assert!((historic.total_affected.percentage - 5.5).abs() < 1e-9);
    assert_eq!(historic.model_breakdown.len(), 1);
    assert_eq!(historic.model_breakdown[0].model_type, "fluvial");
    assert_eq!(historic.risk_level(&config.risk_bands), Some("Moderate"));

    let future = &stats[1];
    assert!((future.total_affected.percentage - 15.0).abs() < 1e-9);
    assert_eq!(future.risk_level(&config.risk_bands), Some("High"));
}

#[test]
fn test_pie_chart_collapses_series() {
    let options = ChartOptions {
        metric: Metric::SegmentCount,
        limit: limit(1),
        unit_length_km: 0.1,
        kind: ChartKind::Pie,
    };
    let series = build_chart(&county_rows(), &county_features(), &options).unwrap();
    assert_eq!(series.labels, vec!["Dublin", "Other"]);
    assert_eq!(series.datasets.len(), 1);
    assert_eq!(series.datasets[0].values, vec![50.0, 35.0]);
}

#[test]
fn test_chart_series_serializes_for_renderer() {
    let options = ChartOptions {
        metric: Metric::SegmentCount,
        limit: limit(1),
        unit_length_km: 0.1,
        kind: ChartKind::Bar,
    };
    let series = build_chart(&county_rows(), &county_features(), &options).unwrap();
    let json = serde_json::to_value(&series).expect("serialize");
    assert_eq!(json["labels"][1], "Other");
    assert_eq!(json["datasets"][1]["series_label"], "Coastal flooding");
}
