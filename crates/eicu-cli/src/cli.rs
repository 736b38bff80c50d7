//! CLI argument definitions for the eICU dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use eicu_analytics::NumericMeasure;
use eicu_cli::pages::DEFAULT_REGION;
use eicu_cli::render::OutputFormat;
use eicu_model::{GroupField, RegionFilter};

#[derive(Parser)]
#[command(
    name = "eicu-dashboard",
    version,
    about = "eICU outcome dashboard - patient mix, length of stay, and model performance",
    long_about = "Summarize an eICU patient export.\n\n\
                  Reports the mortality model's ROC threshold and AUC, accuracy, recall and\n\
                  precision by admit hour and demographic, length-of-stay residuals and means,\n\
                  and the patient mix by region and hospital."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Mortality threshold, classification metrics, and LOS residuals.
    Performance(PerformanceArgs),

    /// Mean ICU and hospital length of stay.
    LengthOfStay(LengthOfStayArgs),

    /// Patient mix by region, hospital, and diagnosis.
    Demographics(DemographicsArgs),

    /// Every page with its default selections, from one load of the data.
    Report(ReportArgs),
}

#[derive(Args)]
pub struct DataArgs {
    /// Path to the eICU `patient.csv` export.
    #[arg(long = "data", value_name = "PATH")]
    pub data: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct PerformanceArgs {
    #[command(flatten)]
    pub input: DataArgs,

    /// Region to report on ("All" for every region).
    #[arg(long = "region", default_value = "All")]
    pub region: RegionFilter,

    /// Demographic the metrics and residuals are broken down by.
    #[arg(long = "stratify", value_enum, default_value = "gender")]
    pub stratify: StratifyArg,
}

#[derive(Args)]
pub struct LengthOfStayArgs {
    #[command(flatten)]
    pub input: DataArgs,

    /// Region whose hospitals and ethnicities are summarized.
    #[arg(long = "region", default_value = DEFAULT_REGION)]
    pub region: RegionFilter,
}

#[derive(Args)]
pub struct DemographicsArgs {
    #[command(flatten)]
    pub input: DataArgs,

    /// Demographic to break the patient mix down by.
    #[arg(long = "demographic", value_enum, default_value = "gender")]
    pub demographic: DemographicArg,

    /// Region whose hospitals are summarized.
    #[arg(long = "region", default_value = DEFAULT_REGION)]
    pub region: RegionFilter,

    /// Measure summarized per hospital.
    #[arg(long = "measure", value_enum, default_value = "age")]
    pub measure: MeasureArg,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: DataArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
    Csv,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Table => Self::Table,
            OutputFormatArg::Json => Self::Json,
            OutputFormatArg::Csv => Self::Csv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StratifyArg {
    Gender,
    Ethnicity,
}

impl From<StratifyArg> for GroupField {
    fn from(arg: StratifyArg) -> Self {
        match arg {
            StratifyArg::Gender => Self::Gender,
            StratifyArg::Ethnicity => Self::Ethnicity,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DemographicArg {
    Gender,
    AgeGroup,
    Ethnicity,
    BmiGroup,
}

impl From<DemographicArg> for GroupField {
    fn from(arg: DemographicArg) -> Self {
        match arg {
            DemographicArg::Gender => Self::Gender,
            DemographicArg::AgeGroup => Self::AgeGroup,
            DemographicArg::Ethnicity => Self::Ethnicity,
            DemographicArg::BmiGroup => Self::BmiGroup,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MeasureArg {
    Age,
    Bmi,
}

impl From<MeasureArg> for NumericMeasure {
    fn from(arg: MeasureArg) -> Self {
        match arg {
            MeasureArg::Age => Self::Age,
            MeasureArg::Bmi => Self::Bmi,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
