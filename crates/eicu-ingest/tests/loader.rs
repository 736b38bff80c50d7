//! Integration tests for loading the patient export.

use std::io::Write;

use eicu_ingest::{
    DatasetCache, IngestError, demographic_records, length_of_stay_records, performance_stays,
    read_patient_table,
};
use tempfile::NamedTempFile;

const HEADER: &str = "patientunitstayid,region,hospitalid,gender,ethnicity,agegroup,age,\
admissionweight,admissionheight,primarydiagnosis,hospitaladmittime24,actualhospitalmortality,\
predictedhospitalmortality,actualhospitallos,predictedhospitallos,actualiculos,predictediculos";

fn fixture() -> String {
    [
        HEADER,
        // complete, died
        "1,Midwest,167,Female,Caucasian,70-79,74,60,160,Sepsis,14:36:00,EXPIRED,0.62,9.5,8.1,3.2,2.9",
        // complete, survived, unreadable admit time
        "2,South,73,Male,Hispanic,40-49,45,95,180,Stroke,,ALIVE,0.08,4,5.5,1.1,1.6",
        // unscored sentinel
        "3,South,73,Male,Caucasian,> 89,> 89,70,170,Sepsis,02:10:00,ALIVE,-1,6,5,2,2",
        // missing predicted ICU LOS
        "4,West,264,Female,Caucasian,50-59,52,,,CHF,08:00:00,ALIVE,0.3,3,3,1,",
        // missing region
        "5,,300,Male,Asian,60-69,61,80,50,Sepsis,09:00:00,EXPIRED,0.7,12,11,4,3",
    ]
    .join("\n")
        + "\n"
}

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn performance_stays_apply_exclusions() {
    let file = create_temp_csv(&fixture());
    let df = read_patient_table(file.path()).unwrap();
    let stays = performance_stays(&df).unwrap();

    assert_eq!(stays.len(), 2);
    let first = &stays[0];
    assert_eq!(first.region, "Midwest");
    assert_eq!(first.hospital_id, "167");
    assert_eq!(first.gender.as_deref(), Some("Female"));
    assert_eq!(first.admit_hour, Some(14));
    assert!(first.actual_mortality);
    assert_eq!(first.predicted_mortality_score, 0.62);
    assert_eq!(first.actual_icu_los, 3.2);

    let second = &stays[1];
    assert!(!second.actual_mortality);
    assert_eq!(second.admit_hour, None);
    assert_eq!(second.actual_hospital_los, 4.0);
}

#[test]
fn length_of_stay_records_need_region_and_ethnicity() {
    let file = create_temp_csv(&fixture());
    let df = read_patient_table(file.path()).unwrap();
    let records = length_of_stay_records(&df).unwrap();

    // Only the row without a region is dropped.
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].region, "West");
    assert_eq!(records[3].actual_icu_los, 1.0);
}

#[test]
fn demographic_records_keep_every_row() {
    let file = create_temp_csv(&fixture());
    let df = read_patient_table(file.path()).unwrap();
    let records = demographic_records(&df).unwrap();

    assert_eq!(records.len(), 5);
    assert_eq!(records[2].age, Some(90.0));
    assert_eq!(records[3].bmi, None);
    // 80 kg at 50 cm is not a plausible BMI.
    assert_eq!(records[4].bmi, None);
    assert_eq!(records[4].region, None);
    assert_eq!(records[0].bmi_group(), Some("2-Normal"));
}

#[test]
fn missing_required_column_is_an_error() {
    let file = create_temp_csv("region,ethnicity\nSouth,Caucasian\n");
    let df = read_patient_table(file.path()).unwrap();
    let err = performance_stays(&df).unwrap_err();
    assert!(matches!(err, IngestError::ColumnNotFound { .. }));
}

#[test]
fn cache_reuses_unchanged_files_and_reloads_edits() {
    let mut file = create_temp_csv(&fixture());
    let mut cache = DatasetCache::new();

    let first = cache.load(file.path()).unwrap();
    let second = cache.load(file.path()).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.parse_count(), 1);
    let digest = cache.digest(file.path()).unwrap().to_string();

    write!(
        file,
        "6,Northeast,400,Female,Caucasian,30-39,33,55,165,Asthma,10:00:00,ALIVE,0.02,2,2,1,1\n"
    )
    .unwrap();
    file.flush().unwrap();
    let third = cache.load(file.path()).unwrap();
    assert_eq!(third.height(), first.height() + 1);
    assert_eq!(cache.parse_count(), 2);
    assert_ne!(cache.digest(file.path()).unwrap(), digest);

    assert!(cache.invalidate(file.path()));
    assert!(cache.is_empty());
    cache.load(file.path()).unwrap();
    assert_eq!(cache.parse_count(), 3);
    cache.clear();
    assert_eq!(cache.len(), 0);
}
