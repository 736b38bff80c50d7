//! Patient mix summaries: category counts and numeric distributions.

use std::collections::BTreeMap;

use eicu_model::{CompositionRow, DemographicRecord, Distribution, GroupField, GroupKey, Stratify};

use crate::partition::partition;
use crate::stats::{quantile_sorted, round_to, sorted_copy};

/// Counts rows per combination of `fields`.
///
/// `share_within` leading fields define the population each proportion is
/// taken over: with `[Region, Gender]` and `share_within = 1` every count is
/// divided by the size of its region. Zero divides by all counted rows.
pub fn composition<T: Stratify>(
    rows: &[T],
    fields: &[GroupField],
    share_within: usize,
) -> Vec<CompositionRow> {
    let counts: BTreeMap<GroupKey, usize> = partition(rows, fields)
        .into_iter()
        .map(|(key, members)| (key, members.len()))
        .collect();
    let mut totals: BTreeMap<GroupKey, usize> = BTreeMap::new();
    for (key, count) in &counts {
        *totals.entry(key.prefix(share_within)).or_default() += count;
    }
    counts
        .into_iter()
        .map(|(key, count)| {
            let total = totals.get(&key.prefix(share_within)).copied().unwrap_or(count);
            CompositionRow {
                proportion: round_to(count as f64 / total as f64, 4),
                key,
                count,
            }
        })
        .collect()
}

/// Numeric attribute of a demographic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericMeasure {
    Age,
    Bmi,
}

impl NumericMeasure {
    pub fn value(self, record: &DemographicRecord) -> Option<f64> {
        match self {
            Self::Age => record.age,
            Self::Bmi => record.bmi,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Bmi => "BMI",
        }
    }
}

/// Five-number summary of `measure` per group. Rows without a value are
/// skipped, and groups left with no values are omitted.
pub fn distributions(
    records: &[DemographicRecord],
    group_by: &[GroupField],
    measure: NumericMeasure,
) -> Vec<Distribution> {
    partition(records, group_by)
        .into_iter()
        .filter_map(|(group, members)| {
            let values: Vec<f64> = members
                .iter()
                .filter_map(|record| measure.value(record))
                .collect();
            five_number_summary(group, &values)
        })
        .collect()
}

fn five_number_summary(group: GroupKey, values: &[f64]) -> Option<Distribution> {
    let sorted = sorted_copy(values);
    Some(Distribution {
        count: sorted.len(),
        min: quantile_sorted(&sorted, 0.0)?,
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        max: quantile_sorted(&sorted, 1.0)?,
        group,
    })
}
