//! Dashboard pages assembled from a loaded patient table.
//!
//! Each page runs its own loader projection, so the row counts behind the
//! performance, length-of-stay and demographics views differ on the same
//! export.

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, info_span};

use eicu_analytics::{
    NumericMeasure, classify, composition, compute_metrics, distributions, filter_region,
    mean_length_of_stay, select_threshold, summarize_residuals,
};
use eicu_ingest::columns::{REGION, text_column};
use eicu_ingest::{demographic_records, length_of_stay_records, performance_stays};
use eicu_model::{
    ALL_GROUP_LABEL, CompositionRow, Distribution, GroupField, GroupMetrics, LengthOfStayMean,
    RegionFilter, ResidualSummary, ThresholdResult,
};

/// Fails when `region` names no region present in `table`.
///
/// Matching is case-insensitive, like the region filter itself.
pub fn ensure_known_region(table: &DataFrame, region: &RegionFilter) -> Result<()> {
    let RegionFilter::Only(name) = region else {
        return Ok(());
    };
    let known: BTreeSet<String> = text_column(table, REGION)
        .context("read regions")?
        .into_iter()
        .flatten()
        .collect();
    if known.iter().any(|value| value.eq_ignore_ascii_case(name)) {
        return Ok(());
    }
    let choices: Vec<&str> = std::iter::once(ALL_GROUP_LABEL)
        .chain(known.iter().map(String::as_str))
        .collect();
    bail!("unknown region '{name}' (known regions: {})", choices.join(", "))
}

/// Mortality and LOS model performance.
#[derive(Debug, Clone, Serialize)]
pub struct PerformancePage {
    pub region: RegionFilter,
    pub stratify: GroupField,
    /// Stays in the selected region.
    pub stays: usize,
    /// Chosen over every scored stay, before the region filter.
    pub threshold: ThresholdResult,
    pub hourly_metrics: Vec<GroupMetrics>,
    pub stratified_metrics: Vec<GroupMetrics>,
    pub residuals: Vec<ResidualSummary>,
}

pub fn performance_page(
    table: &DataFrame,
    region: &RegionFilter,
    stratify: GroupField,
) -> Result<PerformancePage> {
    let span = info_span!("performance", region = %region, stratify = %stratify);
    let _guard = span.enter();
    ensure_known_region(table, region)?;

    let stays = performance_stays(table).context("load performance stays")?;
    let threshold = select_threshold(&stays).context("select mortality threshold")?;
    let selected = filter_region(&stays, region);
    let classified = classify(&selected, threshold.threshold);
    let hourly_metrics = compute_metrics(&classified, &[GroupField::AdmitHour])
        .context("metrics by hour of admission")?;
    let stratified_metrics = compute_metrics(&classified, &[stratify])
        .with_context(|| format!("metrics by {stratify}"))?;
    let residuals = summarize_residuals(&selected, &[stratify]);

    info!(
        stays = selected.len(),
        threshold = threshold.threshold,
        auc = threshold.auc_score,
        "performance page ready"
    );
    Ok(PerformancePage {
        region: region.clone(),
        stratify,
        stays: selected.len(),
        threshold,
        hourly_metrics,
        stratified_metrics,
        residuals,
    })
}

/// Mean ICU and hospital stay across regions, and within one region.
#[derive(Debug, Clone, Serialize)]
pub struct LengthOfStayPage {
    pub region: RegionFilter,
    pub by_region: Vec<LengthOfStayMean>,
    pub by_hospital: Vec<LengthOfStayMean>,
    pub by_ethnicity: Vec<LengthOfStayMean>,
}

pub fn length_of_stay_page(table: &DataFrame, region: &RegionFilter) -> Result<LengthOfStayPage> {
    let span = info_span!("length_of_stay", region = %region);
    let _guard = span.enter();
    ensure_known_region(table, region)?;

    let records = length_of_stay_records(table).context("load length of stay records")?;
    let selected = filter_region(&records, region);
    let page = LengthOfStayPage {
        region: region.clone(),
        by_region: mean_length_of_stay(&records, &[GroupField::Region]),
        by_hospital: mean_length_of_stay(&selected, &[GroupField::HospitalId]),
        by_ethnicity: mean_length_of_stay(&selected, &[GroupField::Ethnicity]),
    };
    info!(
        records = records.len(),
        selected = selected.len(),
        "length of stay page ready"
    );
    Ok(page)
}

/// Patient mix overall and per hospital of one region.
#[derive(Debug, Clone, Serialize)]
pub struct DemographicsPage {
    pub region: RegionFilter,
    pub demographic: GroupField,
    pub measure: &'static str,
    /// Counts per region, demographic and diagnosis, shared within region.
    pub overview: Vec<CompositionRow>,
    pub hospital_mix: Vec<CompositionRow>,
    pub hospital_diagnoses: Vec<CompositionRow>,
    pub distributions: Vec<Distribution>,
}

pub fn demographics_page(
    table: &DataFrame,
    region: &RegionFilter,
    demographic: GroupField,
    measure: NumericMeasure,
) -> Result<DemographicsPage> {
    let span = info_span!("demographics", region = %region, demographic = %demographic);
    let _guard = span.enter();
    ensure_known_region(table, region)?;

    let records = demographic_records(table).context("load demographic records")?;
    let selected = filter_region(&records, region);
    let page = DemographicsPage {
        region: region.clone(),
        demographic,
        measure: measure.label(),
        overview: composition(
            &records,
            &[GroupField::Region, demographic, GroupField::PrimaryDiagnosis],
            1,
        ),
        hospital_mix: composition(&selected, &[GroupField::HospitalId, demographic], 1),
        hospital_diagnoses: composition(
            &selected,
            &[GroupField::HospitalId, GroupField::PrimaryDiagnosis],
            1,
        ),
        distributions: distributions(&selected, &[GroupField::HospitalId], measure),
    };
    info!(
        records = records.len(),
        selected = selected.len(),
        "demographics page ready"
    );
    Ok(page)
}

/// Every page rendered from one load of the export.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub performance: PerformancePage,
    pub length_of_stay: LengthOfStayPage,
    pub demographics: DemographicsPage,
}

/// Region the length-of-stay and demographics views open on.
pub const DEFAULT_REGION: &str = "Midwest";

/// Builds all pages with their default selections.
pub fn report(table: &DataFrame) -> Result<Report> {
    let default_region = RegionFilter::Only(DEFAULT_REGION.to_string());
    Ok(Report {
        performance: performance_page(table, &RegionFilter::All, GroupField::Gender)?,
        length_of_stay: length_of_stay_page(table, &default_region)?,
        demographics: demographics_page(
            table,
            &default_region,
            GroupField::Gender,
            NumericMeasure::Age,
        )?,
    })
}
