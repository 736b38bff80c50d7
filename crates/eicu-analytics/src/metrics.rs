//! Accuracy, recall and precision of the binarized mortality prediction.
//!
//! Recall and precision follow the zero-division convention of common
//! statistics libraries: when the denominator is zero (no actual deaths for
//! recall, no predicted deaths for precision) the rate is reported as `0.0`
//! instead of failing or yielding NaN. Accuracy has no such fallback; an empty
//! group is an error.

use std::collections::BTreeMap;

use eicu_model::{ConfusionCounts, GroupField, GroupKey, GroupMetrics, MetricName, Stratify};
use tracing::debug;

use crate::classify::ClassifiedStay;
use crate::error::{AnalyticsError, Result};

/// Computes the three rates for every group of `group_by`.
///
/// Each group yields exactly three rows, in the order Accuracy, Recall,
/// Precision. Groups are ordered by key. With no grouping fields a single
/// "All" group covers every stay.
///
/// # Errors
///
/// Returns [`AnalyticsError::UndefinedMetric`] when the "All" group is empty.
pub fn compute_metrics(
    stays: &[ClassifiedStay<'_>],
    group_by: &[GroupField],
) -> Result<Vec<GroupMetrics>> {
    let mut groups: BTreeMap<GroupKey, ConfusionCounts> = BTreeMap::new();
    if group_by.is_empty() {
        groups.insert(GroupKey::all(), ConfusionCounts::default());
    }
    for classified in stays {
        let Some(key) = classified.group_key(group_by) else {
            continue;
        };
        groups
            .entry(key)
            .or_default()
            .record(classified.actual_mortality(), classified.predicted_mortality);
    }

    let mut rows = Vec::with_capacity(groups.len() * MetricName::ALL.len());
    for (group, counts) in groups {
        let rates = metric_rates(&counts).ok_or_else(|| AnalyticsError::UndefinedMetric {
            group: group.clone(),
        })?;
        for (metric, rate) in MetricName::ALL.into_iter().zip(rates) {
            rows.push(GroupMetrics {
                group: group.clone(),
                metric,
                rate,
            });
        }
    }
    debug!(
        stays = stays.len(),
        fields = group_by.len(),
        rows = rows.len(),
        "computed stratified metrics"
    );
    Ok(rows)
}

/// Accuracy, recall and precision of one set of counts, `None` when empty.
pub fn metric_rates(counts: &ConfusionCounts) -> Option<[f64; 3]> {
    let total = counts.total();
    if total == 0 {
        return None;
    }
    let accuracy = (counts.true_positive + counts.true_negative) as f64 / total as f64;
    let recall = zero_division_rate(
        counts.true_positive,
        counts.true_positive + counts.false_negative,
    );
    let precision = zero_division_rate(
        counts.true_positive,
        counts.true_positive + counts.false_positive,
    );
    Some([accuracy, recall, precision])
}

fn zero_division_rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
