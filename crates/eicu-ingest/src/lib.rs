//! eICU patient export ingestion.
//!
//! This crate loads the `patient.csv` export into a Polars DataFrame and
//! projects it into the row types each dashboard view works from.
//!
//! # Features
//!
//! - **CSV Loading**: Read the export with full-file schema inference
//! - **Cleaning**: Drop incomplete rows, decode the mortality status, skip
//!   unscored stays, derive admit hour, age and BMI
//! - **Caching**: Reuse parsed tables across views while the file is unchanged
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use eicu_ingest::{DatasetCache, performance_stays};
//!
//! let mut cache = DatasetCache::new();
//! let table = cache.load(Path::new("data/patient.csv"))?;
//! let stays = performance_stays(&table)?;
//! ```

mod admit_time;
mod cache;
pub mod columns;
mod error;
mod loader;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{parse_patient_table, read_patient_table};

// === Projections ===
pub use admit_time::parse_admit_hour;
pub use loader::{
    EXPIRED_STATUS, OLDEST_AGE_BUCKET, body_mass_index, demographic_records,
    length_of_stay_records, parse_age, performance_stays,
};

// === Caching ===
pub use cache::{DatasetCache, content_digest};
