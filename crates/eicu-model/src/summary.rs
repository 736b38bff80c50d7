//! Descriptive summaries behind the length-of-stay and demographics views.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::group::GroupKey;

/// Where a length of stay was spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StayLocation {
    #[serde(rename = "ICU")]
    Icu,
    Hospital,
}

impl StayLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Icu => "ICU",
            Self::Hospital => "Hospital",
        }
    }
}

impl fmt::Display for StayLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean length of stay of one group at one location, in long form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthOfStayMean {
    pub group: GroupKey,
    /// 1-based ordinal of the group among all groups of the summary.
    pub ordinal: usize,
    pub location: StayLocation,
    /// Mean in days, rounded to two decimals.
    pub mean_days: f64,
    pub stays: usize,
}

/// Median residuals of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualSummary {
    pub group: GroupKey,
    pub stays: usize,
    pub median_hospital_los_residual: f64,
    pub median_icu_los_residual: f64,
}

/// Row count of one combination of grouping values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    pub key: GroupKey,
    pub count: usize,
    /// Share of `count` within the rows sharing the key's leading values,
    /// rounded to four decimals.
    pub proportion: f64,
}

/// Five-number summary of a numeric measure within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub group: GroupKey,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}
