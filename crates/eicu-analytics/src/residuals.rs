//! Length-of-stay prediction residuals.

use eicu_model::{GroupField, PatientStay, Residual, ResidualSummary};

use crate::partition::partition;
use crate::stats::median;

/// Residual of a single stay, `actual - predicted` for each LOS type.
pub fn residual(stay: &PatientStay) -> Residual {
    Residual {
        hospital_los_residual: stay.actual_hospital_los - stay.predicted_hospital_los,
        icu_los_residual: stay.actual_icu_los - stay.predicted_icu_los,
    }
}

/// One residual per stay, in input order.
pub fn compute_residuals(stays: &[PatientStay]) -> Vec<Residual> {
    stays.iter().map(residual).collect()
}

/// Median residuals per group, ordered by key.
pub fn summarize_residuals(
    stays: &[PatientStay],
    group_by: &[GroupField],
) -> Vec<ResidualSummary> {
    partition(stays, group_by)
        .into_iter()
        .filter_map(|(group, members)| {
            let (hospital, icu): (Vec<f64>, Vec<f64>) = members
                .iter()
                .map(|stay| {
                    let residual = residual(stay);
                    (residual.hospital_los_residual, residual.icu_los_residual)
                })
                .unzip();
            Some(ResidualSummary {
                group,
                stays: members.len(),
                median_hospital_los_residual: median(&hospital)?,
                median_icu_los_residual: median(&icu)?,
            })
        })
        .collect()
}
