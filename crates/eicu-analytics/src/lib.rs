//! Outcome analytics for eICU patient stays.
//!
//! This crate is the computational core behind the dashboard views. Every
//! function is pure: it takes rows already cleaned by the loader and returns
//! plain records, leaving rendering to the caller.
//!
//! # Performance monitoring
//!
//! - [`select_threshold`]: ROC curve, AUC, and the Youden-optimal cutoff of
//!   the predicted mortality score
//! - [`binarize`] / [`classify`]: turn scores into predictions at that cutoff
//! - [`compute_metrics`]: accuracy, recall and precision per group
//! - [`compute_residuals`] / [`summarize_residuals`]: length-of-stay errors
//!
//! # Descriptive summaries
//!
//! - [`mean_length_of_stay`]: average ICU and hospital stay per group
//! - [`composition`]: category counts and within-group proportions
//! - [`distributions`]: five-number summaries of age or BMI
//!
//! # Example
//!
//! ```
//! use eicu_analytics::{classify, compute_metrics, select_threshold};
//! use eicu_model::PatientStay;
//!
//! fn stay(actual: bool, score: f64) -> PatientStay {
//!     PatientStay {
//!         region: "South".to_string(),
//!         hospital_id: "1".to_string(),
//!         gender: None,
//!         ethnicity: "Caucasian".to_string(),
//!         admit_hour: None,
//!         actual_mortality: actual,
//!         predicted_mortality_score: score,
//!         actual_hospital_los: 5.0,
//!         predicted_hospital_los: 4.0,
//!         actual_icu_los: 2.0,
//!         predicted_icu_los: 2.5,
//!     }
//! }
//!
//! let stays = vec![stay(true, 0.9), stay(false, 0.2)];
//! let result = select_threshold(&stays)?;
//! let metrics = compute_metrics(&classify(&stays, result.threshold), &[])?;
//! assert_eq!(metrics.len(), 3);
//! # Ok::<(), eicu_analytics::AnalyticsError>(())
//! ```

mod classify;
mod demographics;
mod error;
mod length_of_stay;
mod metrics;
mod partition;
mod residuals;
pub mod stats;
mod threshold;

// === Error Types ===
pub use error::{AnalyticsError, Result};

// === Performance Monitoring ===
pub use classify::{ClassifiedStay, binarize, classify, filter_region};
pub use metrics::{compute_metrics, metric_rates};
pub use residuals::{compute_residuals, residual, summarize_residuals};
pub use threshold::{roc_auc, roc_curve, select_threshold, youden_optimal};

// === Descriptive Summaries ===
pub use demographics::{NumericMeasure, composition, distributions};
pub use length_of_stay::mean_length_of_stay;
pub use partition::partition;
