//! Error types for outcome analytics.

use eicu_model::GroupKey;
use thiserror::Error;

/// Errors raised by the analytics functions. Every function either returns a
/// complete result or one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// The ROC curve needs at least one positive and one negative label.
    #[error(
        "insufficient data for ROC analysis: {positives} positive and {negatives} negative labels"
    )]
    InsufficientData { positives: usize, negatives: usize },

    /// Accuracy is undefined for a group with no rows.
    #[error("metric undefined for empty group '{group}'")]
    UndefinedMetric { group: GroupKey },
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
