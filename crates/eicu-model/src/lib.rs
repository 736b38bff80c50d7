//! Data model for eICU outcome analytics.
//!
//! Row types produced by the loader, grouping keys shared by every
//! stratified summary, and the plain records each summary returns.

pub mod bmi;
pub mod group;
pub mod outcome;
pub mod stay;
pub mod summary;

pub use bmi::{BMI_GROUPS, MAX_PLAUSIBLE_BMI, bmi_group};
pub use group::{ALL_GROUP_LABEL, GroupField, GroupKey, GroupValue, RegionFilter, Stratify};
pub use outcome::{ConfusionCounts, GroupMetrics, MetricName, Residual, RocPoint, ThresholdResult};
pub use stay::{DemographicRecord, LengthOfStayRecord, PatientStay};
pub use summary::{CompositionRow, Distribution, LengthOfStayMean, ResidualSummary, StayLocation};
