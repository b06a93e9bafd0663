//! Feature/target extraction from a DataFrame

use crate::error::{Result, SweepError};
use ndarray::{Array1, Array2};
use polars::prelude::*;

/// Column selection for a binary classification table.
///
/// Feature columns must be purely numeric; the target column must carry
/// exactly two distinct class codes.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    feature_columns: Vec<String>,
    target_column: String,
}

impl ClassificationTable {
    pub fn new(feature_columns: &[&str], target_column: &str) -> Self {
        Self {
            feature_columns: feature_columns.iter().map(|s| s.to_string()).collect(),
            target_column: target_column.to_string(),
        }
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// Extract the feature matrix and target vector from `df`.
    ///
    /// Features come back as an `(n_samples, n_features)` matrix in the
    /// configured column order; the target as class codes 0.0/1.0.
    pub fn extract(&self, df: &DataFrame) -> Result<(Array2<f64>, Array1<f64>)> {
        let n_rows = df.height();
        let n_cols = self.feature_columns.len();
        let mut x_data = Vec::with_capacity(n_rows * n_cols);

        for col_name in &self.feature_columns {
            let values = numeric_column(df, col_name)?;
            x_data.extend(values);
        }

        let x = Array2::from_shape_vec((n_cols, n_rows), x_data)
            .map_err(|e| SweepError::ShapeError {
                expected: format!("({}, {})", n_cols, n_rows),
                actual: e.to_string(),
            })?
            .t()
            .to_owned();

        let y = Array1::from_vec(numeric_column(df, &self.target_column)?);

        let mut classes: Vec<i64> = y.iter().map(|v| v.round() as i64).collect();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() != 2 {
            return Err(SweepError::ValidationError(format!(
                "target column '{}' must have exactly 2 classes, found {}",
                self.target_column,
                classes.len()
            )));
        }

        Ok((x, y))
    }
}

/// Read one column as f64 values, rejecting non-numeric dtypes and nulls
fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| SweepError::FeatureNotFound(name.to_string()))?;
    let series = column.as_materialized_series();

    match series.dtype() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => {}
        other => {
            return Err(SweepError::DataError(format!(
                "column '{name}' has non-numeric dtype {other}"
            )));
        }
    }

    if series.null_count() > 0 {
        return Err(SweepError::DataError(format!(
            "column '{name}' contains {} null values",
            series.null_count()
        )));
    }

    let casted = series
        .cast(&DataType::Float64)
        .map_err(|e| SweepError::DataError(e.to_string()))?;
    let ca = casted
        .f64()
        .map_err(|e| SweepError::DataError(e.to_string()))?;

    Ok(ca.into_iter().map(|v| v.unwrap_or(0.0)).collect())
}
