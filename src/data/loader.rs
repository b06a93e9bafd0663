//! CSV loading utilities

use crate::error::{Result, SweepError};
use polars::prelude::*;
use std::fs::File;

/// Loader for headered CSV files
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row
    pub fn load_csv(path: &str) -> Result<DataFrame> {
        let file = File::open(path)
            .map_err(|e| SweepError::DataError(format!("{path}: {e}")))?;

        let reader = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .into_reader_with_file_handle(file);

        reader
            .finish()
            .map_err(|e| SweepError::DataError(e.to_string()))
    }

    /// Load a CSV file with a custom delimiter and leading rows to skip
    pub fn load_csv_with_options(
        path: &str,
        delimiter: u8,
        has_header: bool,
        skip_rows: usize,
    ) -> Result<DataFrame> {
        let file = File::open(path)
            .map_err(|e| SweepError::DataError(format!("{path}: {e}")))?;

        let parse_opts = CsvParseOptions::default().with_separator(delimiter);

        let reader = CsvReadOptions::default()
            .with_has_header(has_header)
            .with_skip_rows(skip_rows)
            .with_infer_schema_length(Some(100))
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file);

        reader
            .finish()
            .map_err(|e| SweepError::DataError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1.0,2.0,3.0").unwrap();
        writeln!(file, "4.0,5.0,6.0").unwrap();
        writeln!(file, "7.0,8.0,9.0").unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = create_test_csv();
        let df = DataLoader::load_csv(file.path().to_str().unwrap()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = DataLoader::load_csv("does/not/exist.csv");
        assert!(matches!(result, Err(SweepError::DataError(_))));
    }

    #[test]
    fn test_load_csv_with_options() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(file, "x;y").unwrap();
        writeln!(file, "1.0;2.0").unwrap();

        let df =
            DataLoader::load_csv_with_options(file.path().to_str().unwrap(), b';', true, 0)
                .unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 1);
    }
}
