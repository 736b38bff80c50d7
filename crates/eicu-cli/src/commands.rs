//! Subcommand handlers: load the export, build pages, render them.

use std::sync::Arc;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use eicu_cli::pages::{demographics_page, length_of_stay_page, performance_page, report};
use eicu_cli::render::render;
use eicu_ingest::DatasetCache;

use crate::cli::{DataArgs, DemographicsArgs, LengthOfStayArgs, PerformanceArgs, ReportArgs};

fn load(cache: &mut DatasetCache, input: &DataArgs) -> Result<Arc<DataFrame>> {
    let span = info_span!("load", path = %input.data.display());
    let _guard = span.enter();
    let table = cache
        .load(&input.data)
        .with_context(|| format!("load {}", input.data.display()))?;
    debug!(
        digest = cache.digest(&input.data).unwrap_or_default(),
        parses = cache.parse_count(),
        "patient table ready"
    );
    Ok(table)
}

pub fn run_performance(cache: &mut DatasetCache, args: &PerformanceArgs) -> Result<String> {
    let table = load(cache, &args.input)?;
    let page = performance_page(&table, &args.region, args.stratify.into())?;
    render(&page, args.input.format.into())
}

pub fn run_length_of_stay(cache: &mut DatasetCache, args: &LengthOfStayArgs) -> Result<String> {
    let table = load(cache, &args.input)?;
    let page = length_of_stay_page(&table, &args.region)?;
    render(&page, args.input.format.into())
}

pub fn run_demographics(cache: &mut DatasetCache, args: &DemographicsArgs) -> Result<String> {
    let table = load(cache, &args.input)?;
    let page = demographics_page(
        &table,
        &args.region,
        args.demographic.into(),
        args.measure.into(),
    )?;
    render(&page, args.input.format.into())
}

pub fn run_report(cache: &mut DatasetCache, args: &ReportArgs) -> Result<String> {
    let table = load(cache, &args.input)?;
    let pages = report(&table)?;
    render(&pages, args.input.format.into())
}

