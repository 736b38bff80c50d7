//! Column names of the eICU `patient.csv` export and typed column access.

use polars::prelude::{DataFrame, DataType};

use crate::error::{IngestError, Result};

pub const REGION: &str = "region";
pub const HOSPITAL_ID: &str = "hospitalid";
pub const GENDER: &str = "gender";
pub const ETHNICITY: &str = "ethnicity";
pub const AGE_GROUP: &str = "agegroup";
pub const AGE: &str = "age";
pub const ADMISSION_WEIGHT: &str = "admissionweight";
pub const ADMISSION_HEIGHT: &str = "admissionheight";
pub const PRIMARY_DIAGNOSIS: &str = "primarydiagnosis";
pub const HOSPITAL_ADMIT_TIME: &str = "hospitaladmittime24";
pub const ACTUAL_MORTALITY: &str = "actualhospitalmortality";
pub const PREDICTED_MORTALITY: &str = "predictedhospitalmortality";
pub const ACTUAL_HOSPITAL_LOS: &str = "actualhospitallos";
pub const PREDICTED_HOSPITAL_LOS: &str = "predictedhospitallos";
pub const ACTUAL_ICU_LOS: &str = "actualiculos";
pub const PREDICTED_ICU_LOS: &str = "predictediculos";

fn column_as(df: &DataFrame, name: &str, dtype: &DataType) -> Result<polars::prelude::Series> {
    let column = df
        .column(name)
        .map_err(|_| IngestError::ColumnNotFound {
            column: name.to_string(),
        })?;
    Ok(column.cast(dtype)?.take_materialized_series())
}

/// Trimmed text values; blank cells are missing.
pub fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column_as(df, name, &DataType::String)?;
    let values = series
        .str()?
        .iter()
        .map(|value| {
            value
                .map(str::trim)
                .filter(|trimmed| !trimmed.is_empty())
                .map(str::to_string)
        })
        .collect();
    Ok(values)
}

/// Numeric values; unparseable, missing and NaN cells are missing.
pub fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column_as(df, name, &DataType::Float64)?;
    let values = series
        .f64()?
        .iter()
        .map(|value| value.filter(|number| !number.is_nan()))
        .collect();
    Ok(values)
}
