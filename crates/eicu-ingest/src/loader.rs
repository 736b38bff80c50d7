//! Projections of the patient table used by each dashboard view.
//!
//! Each projection filters on the columns its view needs, so the same export
//! yields a different number of rows per view.

use eicu_model::{DemographicRecord, LengthOfStayRecord, MAX_PLAUSIBLE_BMI, PatientStay};
use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::admit_time::parse_admit_hour;
use crate::columns::{
    ACTUAL_HOSPITAL_LOS, ACTUAL_ICU_LOS, ACTUAL_MORTALITY, ADMISSION_HEIGHT, ADMISSION_WEIGHT,
    AGE, AGE_GROUP, ETHNICITY, GENDER, HOSPITAL_ADMIT_TIME, HOSPITAL_ID, PREDICTED_HOSPITAL_LOS,
    PREDICTED_ICU_LOS, PREDICTED_MORTALITY, PRIMARY_DIAGNOSIS, REGION, float_column, text_column,
};
use crate::error::Result;

/// Discharge status marking an in-hospital death.
pub const EXPIRED_STATUS: &str = "EXPIRED";

/// Age recorded for the de-identified `> 89` bucket.
pub const OLDEST_AGE_BUCKET: f64 = 90.0;

/// Stays usable for mortality and LOS performance analysis.
///
/// Keeps rows with a mortality status, a mortality score, all four LOS
/// values, a region and an ethnicity, then drops rows whose score is negative
/// (the export's "not computed" sentinel). Rows with an unreadable admit time
/// are kept without an admit hour.
pub fn performance_stays(df: &DataFrame) -> Result<Vec<PatientStay>> {
    let regions = text_column(df, REGION)?;
    let hospital_ids = text_column(df, HOSPITAL_ID)?;
    let genders = text_column(df, GENDER)?;
    let ethnicities = text_column(df, ETHNICITY)?;
    let admit_times = text_column(df, HOSPITAL_ADMIT_TIME)?;
    let statuses = text_column(df, ACTUAL_MORTALITY)?;
    let scores = float_column(df, PREDICTED_MORTALITY)?;
    let actual_hospital = float_column(df, ACTUAL_HOSPITAL_LOS)?;
    let predicted_hospital = float_column(df, PREDICTED_HOSPITAL_LOS)?;
    let actual_icu = float_column(df, ACTUAL_ICU_LOS)?;
    let predicted_icu = float_column(df, PREDICTED_ICU_LOS)?;

    let mut stays = Vec::with_capacity(df.height());
    let mut incomplete = 0usize;
    let mut unscored = 0usize;
    let mut without_hour = 0usize;
    for idx in 0..df.height() {
        let (
            Some(region),
            Some(ethnicity),
            Some(status),
            Some(score),
            Some(actual_hospital_los),
            Some(predicted_hospital_los),
            Some(actual_icu_los),
            Some(predicted_icu_los),
        ) = (
            regions[idx].clone(),
            ethnicities[idx].clone(),
            statuses[idx].as_deref(),
            scores[idx],
            actual_hospital[idx],
            predicted_hospital[idx],
            actual_icu[idx],
            predicted_icu[idx],
        )
        else {
            incomplete += 1;
            continue;
        };
        if score < 0.0 {
            unscored += 1;
            continue;
        }
        let admit_hour = admit_times[idx].as_deref().and_then(parse_admit_hour);
        if admit_hour.is_none() {
            without_hour += 1;
        }
        stays.push(PatientStay {
            region,
            hospital_id: hospital_ids[idx].clone().unwrap_or_default(),
            gender: genders[idx].clone(),
            ethnicity,
            admit_hour,
            actual_mortality: is_expired(status),
            predicted_mortality_score: score,
            actual_hospital_los,
            predicted_hospital_los,
            actual_icu_los,
            predicted_icu_los,
        });
    }

    if without_hour > 0 {
        warn!(
            stays = without_hour,
            "stays without a readable admit time are left out of hourly metrics"
        );
    }
    info!(
        rows = df.height(),
        stays = stays.len(),
        incomplete,
        unscored,
        "loaded performance stays"
    );
    Ok(stays)
}

/// Stays with observed ICU and hospital LOS, region and ethnicity.
pub fn length_of_stay_records(df: &DataFrame) -> Result<Vec<LengthOfStayRecord>> {
    let region = text_column(df, REGION)?;
    let hospital_id = text_column(df, HOSPITAL_ID)?;
    let ethnicity = text_column(df, ETHNICITY)?;
    let actual_icu = float_column(df, ACTUAL_ICU_LOS)?;
    let actual_hospital = float_column(df, ACTUAL_HOSPITAL_LOS)?;

    let records: Vec<LengthOfStayRecord> = (0..df.height())
        .filter_map(|idx| {
            Some(LengthOfStayRecord {
                region: region[idx].clone()?,
                hospital_id: hospital_id[idx].clone().unwrap_or_default(),
                ethnicity: ethnicity[idx].clone()?,
                actual_icu_los: actual_icu[idx]?,
                actual_hospital_los: actual_hospital[idx]?,
            })
        })
        .collect();
    info!(
        rows = df.height(),
        records = records.len(),
        "loaded length of stay records"
    );
    Ok(records)
}

/// Every row's demographic attributes, with age parsed and BMI derived.
pub fn demographic_records(df: &DataFrame) -> Result<Vec<DemographicRecord>> {
    let region = text_column(df, REGION)?;
    let hospital_id = text_column(df, HOSPITAL_ID)?;
    let gender = text_column(df, GENDER)?;
    let age_group = text_column(df, AGE_GROUP)?;
    let ethnicity = text_column(df, ETHNICITY)?;
    let diagnosis = text_column(df, PRIMARY_DIAGNOSIS)?;
    let age = text_column(df, AGE)?;
    let weight = float_column(df, ADMISSION_WEIGHT)?;
    let height = float_column(df, ADMISSION_HEIGHT)?;

    let records: Vec<DemographicRecord> = (0..df.height())
        .map(|idx| DemographicRecord {
            region: region[idx].clone(),
            hospital_id: hospital_id[idx].clone(),
            gender: gender[idx].clone(),
            age_group: age_group[idx].clone(),
            ethnicity: ethnicity[idx].clone(),
            primary_diagnosis: diagnosis[idx].clone(),
            age: age[idx].as_deref().and_then(parse_age),
            bmi: body_mass_index(weight[idx], height[idx]),
        })
        .collect();
    let with_bmi = records.iter().filter(|record| record.bmi.is_some()).count();
    info!(records = records.len(), with_bmi, "loaded demographic records");
    Ok(records)
}

fn is_expired(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case(EXPIRED_STATUS)
}

/// Parses an age cell, reading the `> 89` bucket as 90.
pub fn parse_age(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.starts_with('>') {
        return Some(OLDEST_AGE_BUCKET);
    }
    trimmed.parse::<f64>().ok().filter(|age| age.is_finite())
}

/// BMI from weight (kg) and height (cm), missing when implausible.
pub fn body_mass_index(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let (weight, height) = (weight_kg?, height_cm?);
    if height <= 0.0 {
        return None;
    }
    let bmi = weight / (height / 100.0).powi(2);
    (bmi.is_finite() && bmi <= MAX_PLAUSIBLE_BMI).then_some(bmi)
}
