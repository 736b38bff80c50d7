//! Outputs of the mortality and length-of-stay performance analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::group::GroupKey;

/// Classification rates reported per group, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricName {
    Accuracy,
    Recall,
    Precision,
}

impl MetricName {
    pub const ALL: [MetricName; 3] = [Self::Accuracy, Self::Recall, Self::Precision];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accuracy => "Accuracy",
            Self::Recall => "Recall",
            Self::Precision => "Precision",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (group, metric) rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    pub group: GroupKey,
    pub metric: MetricName,
    /// Rate in [0, 1].
    pub rate: f64,
}

/// Operating point chosen on the ROC curve of the mortality score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    pub threshold: f64,
    pub auc_score: f64,
}

/// A point of the ROC curve: rates obtained when predicting death for `score >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub false_positive_rate: f64,
    pub true_positive_rate: f64,
}

impl RocPoint {
    /// Youden's J statistic.
    pub fn youden_j(&self) -> f64 {
        self.true_positive_rate - self.false_positive_rate
    }
}

/// Length-of-stay prediction error for one stay, as `actual - predicted`.
/// Positive values mean the model under-predicted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Residual {
    pub hospital_los_residual: f64,
    pub icu_los_residual: f64,
}

/// Confusion counts of binarized mortality predictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionCounts {
    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true, true) => self.true_positive += 1,
            (false, true) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}
