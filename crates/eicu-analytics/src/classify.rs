//! Binarization of the mortality score and row selection.

use eicu_model::{GroupField, GroupValue, PatientStay, RegionFilter, Stratify};

/// Predicts death when the score reaches the threshold.
pub fn binarize(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// A stay paired with its binarized mortality prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedStay<'a> {
    pub stay: &'a PatientStay,
    pub predicted_mortality: bool,
}

impl ClassifiedStay<'_> {
    pub fn actual_mortality(&self) -> bool {
        self.stay.actual_mortality
    }

    pub fn is_correct(&self) -> bool {
        self.stay.actual_mortality == self.predicted_mortality
    }
}

impl Stratify for ClassifiedStay<'_> {
    fn group_value(&self, field: GroupField) -> Option<GroupValue> {
        self.stay.group_value(field)
    }
}

/// Binarizes every stay at `threshold`.
pub fn classify(stays: &[PatientStay], threshold: f64) -> Vec<ClassifiedStay<'_>> {
    stays
        .iter()
        .map(|stay| ClassifiedStay {
            stay,
            predicted_mortality: binarize(stay.predicted_mortality_score, threshold),
        })
        .collect()
}

/// Rows admitted by the region selection, in input order.
pub fn filter_region<T>(rows: &[T], region: &RegionFilter) -> Vec<T>
where
    T: Stratify + Clone,
{
    rows.iter()
        .filter(|row| region.admits(*row))
        .cloned()
        .collect()
}
