// file: src/dashboard/analytics.rs
// description: aggregations behind the dashboard charts
// reference: value-by-type, priority and confidence charts

use crate::models::{InsightRecord, Priority};
use std::collections::BTreeMap;

pub const CONFIDENCE_BIN_WIDTH: f64 = 0.05;
pub const CONFIDENCE_BINS: usize = 20;

/// Sum of known amounts per document type. Types whose amounts are all
/// missing still appear with zero.
pub fn value_by_type(insights: &[InsightRecord]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for insight in insights {
        let entry = totals.entry(insight.document_type.clone()).or_insert(0.0);
        if let Some(amount) = insight.total_amount {
            *entry += amount;
        }
    }
    totals
}

/// Document counts per priority label, ordered High, Medium, Low, then any
/// other label alphabetically. Rows without a priority are dropped.
pub fn priority_counts(insights: &[InsightRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<(u8, String), usize> = BTreeMap::new();
    for insight in insights {
        if let Some(level) = insight.priority_level.as_deref() {
            let key = (Priority::rank(Some(level)), level.to_string());
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((_, label), count)| (label, count))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl ConfidenceBin {
    pub fn label(&self) -> String {
        format!("{:.2}-{:.2}", self.lower, self.upper)
    }
}

/// Fixed 0.05-wide bins over [0, 1]; a score of exactly 1.0 lands in the last bin.
pub fn confidence_histogram(insights: &[InsightRecord]) -> Vec<ConfidenceBin> {
    let mut bins: Vec<ConfidenceBin> = (0..CONFIDENCE_BINS)
        .map(|i| ConfidenceBin {
            lower: i as f64 * CONFIDENCE_BIN_WIDTH,
            upper: (i + 1) as f64 * CONFIDENCE_BIN_WIDTH,
            count: 0,
        })
        .collect();

    for score in insights.iter().filter_map(|i| i.confidence_score) {
        if !score.is_finite() {
            continue;
        }
        let clamped = score.clamp(0.0, 1.0);
        let idx = ((clamped / CONFIDENCE_BIN_WIDTH).floor() as usize).min(CONFIDENCE_BINS - 1);
        bins[idx].count += 1;
    }

    bins
}
