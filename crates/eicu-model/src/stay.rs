//! Row types produced by the loader.
//!
//! Each page of the dashboard works from its own projection of the patient
//! table, so each projection carries only the columns it was filtered on.

use serde::{Deserialize, Serialize};

use crate::bmi::bmi_group;
use crate::group::{GroupField, GroupValue, Stratify};

/// One ICU stay eligible for mortality and length-of-stay performance analysis.
///
/// The loader guarantees that the mortality label, the risk score and all
/// four LOS values are present, and that the score is not negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientStay {
    pub region: String,
    pub hospital_id: String,
    pub gender: Option<String>,
    pub ethnicity: String,
    /// Hour of hospital admission (0-23). `None` when the admit time could not be read.
    pub admit_hour: Option<u8>,
    /// Patient died during the hospitalization.
    pub actual_mortality: bool,
    /// Model-estimated hospital mortality risk.
    pub predicted_mortality_score: f64,
    pub actual_hospital_los: f64,
    pub predicted_hospital_los: f64,
    pub actual_icu_los: f64,
    pub predicted_icu_los: f64,
}

impl Stratify for PatientStay {
    fn group_value(&self, field: GroupField) -> Option<GroupValue> {
        match field {
            GroupField::Region => Some(GroupValue::text(&self.region)),
            GroupField::HospitalId => Some(GroupValue::identifier(&self.hospital_id)),
            GroupField::Gender => self.gender.as_deref().map(GroupValue::text),
            GroupField::Ethnicity => Some(GroupValue::text(&self.ethnicity)),
            GroupField::AdmitHour => self.admit_hour.map(|hour| GroupValue::Number(hour.into())),
            GroupField::AgeGroup | GroupField::BmiGroup | GroupField::PrimaryDiagnosis => None,
        }
    }
}

/// A stay with observed ICU and hospital length of stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthOfStayRecord {
    pub region: String,
    pub hospital_id: String,
    pub ethnicity: String,
    pub actual_icu_los: f64,
    pub actual_hospital_los: f64,
}

impl Stratify for LengthOfStayRecord {
    fn group_value(&self, field: GroupField) -> Option<GroupValue> {
        match field {
            GroupField::Region => Some(GroupValue::text(&self.region)),
            GroupField::HospitalId => Some(GroupValue::identifier(&self.hospital_id)),
            GroupField::Ethnicity => Some(GroupValue::text(&self.ethnicity)),
            _ => None,
        }
    }
}

/// Demographic and diagnosis attributes of a stay. Nothing is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemographicRecord {
    pub region: Option<String>,
    pub hospital_id: Option<String>,
    pub gender: Option<String>,
    pub age_group: Option<String>,
    pub ethnicity: Option<String>,
    pub primary_diagnosis: Option<String>,
    /// Age in years; the de-identified `> 89` bucket is stored as 90.
    pub age: Option<f64>,
    /// Body mass index, missing when implausible (> 100) or not computable.
    pub bmi: Option<f64>,
}

impl DemographicRecord {
    /// Returns the BMI category label for this record.
    pub fn bmi_group(&self) -> Option<&'static str> {
        self.bmi.and_then(bmi_group)
    }
}

impl Stratify for DemographicRecord {
    fn group_value(&self, field: GroupField) -> Option<GroupValue> {
        match field {
            GroupField::Region => self.region.as_deref().map(GroupValue::text),
            GroupField::HospitalId => self.hospital_id.as_deref().map(GroupValue::identifier),
            GroupField::Gender => self.gender.as_deref().map(GroupValue::text),
            GroupField::AgeGroup => self.age_group.as_deref().map(GroupValue::text),
            GroupField::Ethnicity => self.ethnicity.as_deref().map(GroupValue::text),
            GroupField::BmiGroup => self.bmi_group().map(GroupValue::text),
            GroupField::PrimaryDiagnosis => self.primary_diagnosis.as_deref().map(GroupValue::text),
            GroupField::AdmitHour => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demographic_record_groups_by_bmi_category() {
        let record = DemographicRecord {
            bmi: Some(27.3),
            ..DemographicRecord::default()
        };
        assert_eq!(
            record.group_value(GroupField::BmiGroup),
            Some(GroupValue::Text("3-Overweight".to_string()))
        );
        assert_eq!(record.group_value(GroupField::Region), None);
    }

    #[test]
    fn numeric_hospital_ids_group_as_numbers() {
        let record = LengthOfStayRecord {
            region: "South".to_string(),
            hospital_id: "73".to_string(),
            ethnicity: "Caucasian".to_string(),
            actual_icu_los: 1.0,
            actual_hospital_los: 2.0,
        };
        assert_eq!(
            record.group_value(GroupField::HospitalId),
            Some(GroupValue::Number(73))
        );
        assert_eq!(record.group_value(GroupField::Gender), None);
    }
}
