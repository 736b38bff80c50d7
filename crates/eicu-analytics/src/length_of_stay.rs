//! Average time spent in the ICU and in hospital.

use eicu_model::{GroupField, LengthOfStayMean, LengthOfStayRecord, StayLocation};
use tracing::debug;

use crate::partition::partition;
use crate::stats::{mean, round_to};

/// Mean actual ICU and hospital LOS per group, in long form.
///
/// Groups are ordered by key and numbered from 1; each group emits its ICU row
/// then its hospital row. Means are rounded to two decimals.
pub fn mean_length_of_stay(
    records: &[LengthOfStayRecord],
    group_by: &[GroupField],
) -> Vec<LengthOfStayMean> {
    let groups = partition(records, group_by);
    let mut rows = Vec::with_capacity(groups.len() * 2);
    for (ordinal, (group, members)) in groups.into_iter().enumerate() {
        let icu: Vec<f64> = members.iter().map(|record| record.actual_icu_los).collect();
        let hospital: Vec<f64> = members
            .iter()
            .map(|record| record.actual_hospital_los)
            .collect();
        for (location, values) in [(StayLocation::Icu, icu), (StayLocation::Hospital, hospital)] {
            let Some(value) = mean(&values) else {
                continue;
            };
            rows.push(LengthOfStayMean {
                group: group.clone(),
                ordinal: ordinal + 1,
                location,
                mean_days: round_to(value, 2),
                stays: members.len(),
            });
        }
    }
    debug!(records = records.len(), rows = rows.len(), "computed length of stay means");
    rows
}
