//! Integration tests for page assembly and rendering.

use std::io::Write;

use eicu_analytics::NumericMeasure;
use eicu_cli::pages::{demographics_page, length_of_stay_page, performance_page, report};
use eicu_cli::render::{OutputFormat, Sections, render};
use eicu_ingest::read_patient_table;
use eicu_model::{GroupField, GroupKey, GroupMetrics, GroupValue, MetricName, RegionFilter};
use polars::prelude::DataFrame;
use tempfile::NamedTempFile;

const PATIENTS: &str = "\
region,hospitalid,gender,ethnicity,agegroup,age,admissionweight,admissionheight,primarydiagnosis,\
hospitaladmittime24,actualhospitalmortality,predictedhospitalmortality,actualhospitallos,\
predictedhospitallos,actualiculos,predictediculos
Midwest,1,Female,Caucasian,70-79,70,64,160,Sepsis,08:00:00,EXPIRED,0.9,10,8,3,2
Midwest,1,Male,Caucasian,40-49,40,90,180,Stroke,08:30:00,ALIVE,0.2,4,5,1,1.5
South,2,Female,Hispanic,50-59,55,70,165,Sepsis,20:00:00,EXPIRED,0.7,6,6,2,2
South,2,Male,Caucasian,> 89,> 89,75,170,CHF,20:15:00,ALIVE,0.4,3,2,1,0.5
";

fn load_fixture() -> DataFrame {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", PATIENTS).unwrap();
    read_patient_table(file.path()).unwrap()
}

fn text_key(value: &str) -> GroupKey {
    GroupKey(vec![GroupValue::text(value)])
}

fn rate(metrics: &[GroupMetrics], group: &GroupKey, metric: MetricName) -> f64 {
    metrics
        .iter()
        .find(|row| &row.group == group && row.metric == metric)
        .map(|row| row.rate)
        .unwrap()
}

fn midwest() -> RegionFilter {
    RegionFilter::Only("Midwest".to_string())
}

#[test]
fn performance_page_over_all_regions() {
    let table = load_fixture();
    let page = performance_page(&table, &RegionFilter::All, GroupField::Gender).unwrap();

    assert_eq!(page.stays, 4);
    assert_eq!(page.threshold.threshold, 0.7);
    assert_eq!(page.threshold.auc_score, 1.0);

    let hours: Vec<GroupKey> = page
        .hourly_metrics
        .iter()
        .map(|row| row.group.clone())
        .collect();
    assert_eq!(hours.len(), 6);
    assert_eq!(hours[0], GroupKey(vec![GroupValue::Number(8)]));
    assert_eq!(hours[5], GroupKey(vec![GroupValue::Number(20)]));

    let female = text_key("Female");
    let male = text_key("Male");
    let metrics = &page.stratified_metrics;
    assert_eq!(rate(metrics, &female, MetricName::Accuracy), 1.0);
    assert_eq!(rate(metrics, &female, MetricName::Recall), 1.0);
    assert_eq!(rate(metrics, &male, MetricName::Accuracy), 1.0);
    // No deaths among the male stays: recall and precision fall back to zero.
    assert_eq!(rate(metrics, &male, MetricName::Recall), 0.0);
    assert_eq!(rate(metrics, &male, MetricName::Precision), 0.0);

    assert_eq!(page.residuals.len(), 2);
    assert_eq!(page.residuals[0].group, female);
    assert_eq!(page.residuals[0].median_hospital_los_residual, 1.0);
    assert_eq!(page.residuals[0].median_icu_los_residual, 0.5);
    assert_eq!(page.residuals[1].median_hospital_los_residual, 0.0);
}

#[test]
fn performance_threshold_ignores_region_selection() {
    let table = load_fixture();
    let page = performance_page(&table, &midwest(), GroupField::Ethnicity).unwrap();

    assert_eq!(page.stays, 2);
    assert_eq!(page.threshold.threshold, 0.7);
    assert_eq!(page.residuals.len(), 1);
    assert_eq!(page.residuals[0].group, text_key("Caucasian"));
}

#[test]
fn length_of_stay_page_for_region() {
    let table = load_fixture();
    let page = length_of_stay_page(&table, &midwest()).unwrap();

    assert_eq!(page.by_region.len(), 4);
    assert_eq!(page.by_hospital.len(), 2);
    assert_eq!(page.by_hospital[0].ordinal, 1);
    assert_eq!(page.by_hospital[0].mean_days, 2.0);
    assert_eq!(page.by_hospital[1].mean_days, 7.0);

    let csv = render(&page, OutputFormat::Csv).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
    section,Region,Location,Mean (days),Stays
    Mean length of stay by region,Midwest,ICU,2,2
    Mean length of stay by region,Midwest,Hospital,7,2
    Mean length of stay by region,South,ICU,1.5,2
    Mean length of stay by region,South,Hospital,4.5,2

    section,#,Hospital ID,Location,Mean (days),Stays
    Mean length of stay by hospital in Midwest,1,1,ICU,2,2
    Mean length of stay by hospital in Midwest,1,1,Hospital,7,2

    section,Ethnicity,Location,Mean (days),Stays
    Mean length of stay by ethnicity in Midwest,Caucasian,ICU,2,2
    Mean length of stay by ethnicity in Midwest,Caucasian,Hospital,7,2
    ");
}

#[test]
fn demographics_page_for_region() {
    let table = load_fixture();
    let page = demographics_page(&table, &midwest(), GroupField::Gender, NumericMeasure::Age)
        .unwrap();

    assert_eq!(page.measure, "Age");
    assert_eq!(page.overview.len(), 4);
    assert!(page.overview.iter().all(|row| row.proportion == 0.5));
    assert_eq!(page.hospital_mix.len(), 2);
    assert_eq!(page.hospital_diagnoses.len(), 2);

    assert_eq!(page.distributions.len(), 1);
    let ages = &page.distributions[0];
    assert_eq!(ages.group, GroupKey(vec![GroupValue::Number(1)]));
    assert_eq!(ages.count, 2);
    assert_eq!(ages.min, 40.0);
    assert_eq!(ages.q1, 47.5);
    assert_eq!(ages.median, 55.0);
    assert_eq!(ages.max, 70.0);
}

#[test]
fn report_renders_every_page() {
    let table = load_fixture();
    let pages = report(&table).unwrap();
    assert_eq!(pages.sections().len(), 11);

    let tables = render(&pages, OutputFormat::Table).unwrap();
    assert!(tables.contains("Mortality threshold"));
    assert!(tables.contains("Mean length of stay by hospital in Midwest"));
    assert!(tables.contains("Age by hospital in Midwest"));

    let json: serde_json::Value =
        serde_json::from_str(&render(&pages, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json["performance"]["threshold"]["threshold"], 0.7);
    assert_eq!(json["length_of_stay"]["by_hospital"][0]["location"], "ICU");
    assert_eq!(json["demographics"]["demographic"], "gender");
}

#[test]
fn missing_column_fails_the_page() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "region,ethnicity\nSouth,Caucasian\n").unwrap();
    let table = read_patient_table(file.path()).unwrap();
    let err = performance_page(&table, &RegionFilter::All, GroupField::Gender).unwrap_err();
    assert!(format!("{err:#}").contains("load performance stays"));
}

#[test]
fn unknown_region_is_rejected_with_known_choices() {
    let table = load_fixture();
    let nowhere = RegionFilter::Only("Nowhere".to_string());

    let err = performance_page(&table, &nowhere, GroupField::Gender).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown region 'Nowhere' (known regions: All, Midwest, South)"
    );
    assert!(length_of_stay_page(&table, &nowhere).is_err());
    assert!(
        demographics_page(&table, &nowhere, GroupField::Gender, NumericMeasure::Age).is_err()
    );
}

#[test]
fn region_selection_ignores_case() {
    let table = load_fixture();
    let page = length_of_stay_page(&table, &RegionFilter::Only("midwest".to_string())).unwrap();
    assert_eq!(page.by_hospital.len(), 2);
}
