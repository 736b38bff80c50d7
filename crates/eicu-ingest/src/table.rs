//! Reading the patient export into a DataFrame.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Reads the patient CSV at `path`.
///
/// # Errors
///
/// Fails when the file is missing, unreadable, empty, or not valid CSV.
pub fn read_patient_table(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    parse_patient_table(path, bytes)
}

/// Parses CSV content already read from `path`.
///
/// The schema is inferred over every row, since score and LOS columns may hold
/// integers for many rows before the first fractional value.
pub fn parse_patient_table(path: &Path, mut bytes: Vec<u8>) -> Result<DataFrame> {
    if bytes.starts_with(&UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.height() == 0 {
        warn!(path = %path.display(), "patient table has a header but no rows");
    }
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read patient table"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_patient_table() {
        let file = create_temp_csv("region,actualiculos\nSouth,1.5\nWest,2\n");
        let df = read_patient_table(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_read_patient_table_with_bom() {
        let file = create_temp_csv("\u{feff}region,actualiculos\nSouth,1.5\n");
        let df = read_patient_table(file.path()).unwrap();
        assert!(df.column("region").is_ok());
    }

    #[test]
    fn test_read_patient_table_empty_file() {
        let file = create_temp_csv("");
        let result = read_patient_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_patient_table_missing_file() {
        let result = read_patient_table(Path::new("/nonexistent/patient.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
