//! Feature scaling implementations

use crate::error::{Result, SweepError};
use crate::params::{ParamSet, ParamValue};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of rescaling applied to each feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalerKind {
    /// Rescale to a fixed output range: lo + (x - min) / (max - min) * (hi - lo)
    MinMax,
    /// Z-score standardization: (x - mean) / std
    Standard,
}

impl ScalerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalerKind::MinMax => "minmax",
            ScalerKind::Standard => "standard",
        }
    }
}

/// Per-column parameters of a fitted scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnParams {
    center: f64, // min or mean
    scale: f64,  // range or std
}

/// Feature scaler over `(n_samples, n_features)` matrices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    kind: ScalerKind,
    range: (f64, f64),
    params: Vec<ColumnParams>,
    is_fitted: bool,
}

impl Default for Scaler {
    fn default() -> Self {
        Self::new(ScalerKind::MinMax)
    }
}

impl Scaler {
    /// Create a new scaler; min-max output defaults to `[0, 1]`
    pub fn new(kind: ScalerKind) -> Self {
        Self {
            kind,
            range: (0.0, 1.0),
            params: Vec::new(),
            is_fitted: false,
        }
    }

    /// Set the min-max output range
    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.range = (lo, hi);
        self
    }

    pub fn kind(&self) -> ScalerKind {
        self.kind
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// Learn per-column parameters from training data
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        if x.nrows() < 2 {
            return Err(SweepError::ValidationError(format!(
                "scaler requires at least 2 samples, got {}",
                x.nrows()
            )));
        }
        if self.kind == ScalerKind::MinMax && self.range.0 >= self.range.1 {
            return Err(SweepError::ValidationError(format!(
                "scaler range ({}, {}) is empty",
                self.range.0, self.range.1
            )));
        }

        self.params = (0..x.ncols())
            .map(|j| {
                let col = x.column(j);
                match self.kind {
                    ScalerKind::MinMax => {
                        let min = col.iter().copied().fold(f64::INFINITY, f64::min);
                        let max = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                        let range = max - min;
                        ColumnParams {
                            center: min,
                            scale: if range == 0.0 { 1.0 } else { range },
                        }
                    }
                    ScalerKind::Standard => {
                        let mean = col.mean().unwrap_or(0.0);
                        let std = col.std(1.0);
                        ColumnParams {
                            center: mean,
                            scale: if std == 0.0 { 1.0 } else { std },
                        }
                    }
                }
            })
            .collect();

        self.is_fitted = true;
        Ok(self)
    }

    /// Apply the fitted parameters to a matrix of the same width
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(SweepError::ModelNotFitted);
        }
        if x.ncols() != self.params.len() {
            return Err(SweepError::ShapeError {
                expected: format!("{} columns", self.params.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let (lo, hi) = self.range;
        let mut result = x.clone();
        for (j, params) in self.params.iter().enumerate() {
            let mut col = result.column_mut(j);
            match self.kind {
                ScalerKind::MinMax => {
                    col.mapv_inplace(|v| lo + (v - params.center) / params.scale * (hi - lo));
                }
                ScalerKind::Standard => {
                    col.mapv_inplace(|v| (v - params.center) / params.scale);
                }
            }
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Map scaled values back to the original units
    pub fn inverse_transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(SweepError::ModelNotFitted);
        }
        if x.ncols() != self.params.len() {
            return Err(SweepError::ShapeError {
                expected: format!("{} columns", self.params.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let (lo, hi) = self.range;
        let mut result = x.clone();
        for (j, params) in self.params.iter().enumerate() {
            let mut col = result.column_mut(j);
            match self.kind {
                ScalerKind::MinMax => {
                    col.mapv_inplace(|v| params.center + (v - lo) / (hi - lo) * params.scale);
                }
                ScalerKind::Standard => {
                    col.mapv_inplace(|v| v * params.scale + params.center);
                }
            }
        }

        Ok(result)
    }

    fn clear_fit(&mut self) {
        self.params.clear();
        self.is_fitted = false;
    }
}

impl ParamSet for Scaler {
    fn params(&self) -> BTreeMap<String, ParamValue> {
        let mut map = BTreeMap::new();
        map.insert("kind".to_string(), ParamValue::Str(self.kind.as_str().to_string()));
        map.insert("range_min".to_string(), ParamValue::Float(self.range.0));
        map.insert("range_max".to_string(), ParamValue::Float(self.range.1));
        map
    }

    fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "kind" => {
                let kind = match value.as_str() {
                    Some("minmax") => ScalerKind::MinMax,
                    Some("standard") => ScalerKind::Standard,
                    _ => {
                        return Err(SweepError::InvalidParameter {
                            name: name.to_string(),
                            value: value.to_string(),
                            reason: "expected \"minmax\" or \"standard\"".to_string(),
                        });
                    }
                };
                self.kind = kind;
            }
            "range_min" | "range_max" => {
                let v = value.as_f64().ok_or_else(|| SweepError::InvalidParameter {
                    name: name.to_string(),
                    value: value.to_string(),
                    reason: "expected a number".to_string(),
                })?;
                if !v.is_finite() {
                    return Err(SweepError::InvalidParameter {
                        name: name.to_string(),
                        value: value.to_string(),
                        reason: "must be finite".to_string(),
                    });
                }
                if name == "range_min" {
                    self.range.0 = v;
                } else {
                    self.range.1 = v;
                }
            }
            _ => return Err(SweepError::UnknownParameter(name.to_string())),
        }

        self.clear_fit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_minmax_scaler() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0], [5.0, 50.0]];

        let mut scaler = Scaler::new(ScalerKind::MinMax);
        let result = scaler.fit_transform(&x).unwrap();

        for j in 0..2 {
            let col = result.column(j);
            let min = col.iter().copied().fold(f64::INFINITY, f64::min);
            let max = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!((min - 0.0).abs() < 1e-12);
            assert!((max - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_minmax_custom_range() {
        let x = array![[0.0], [5.0], [10.0]];
        let mut scaler = Scaler::new(ScalerKind::MinMax).with_range(-1.0, 1.0);
        let result = scaler.fit_transform(&x).unwrap();

        assert!((result[[0, 0]] + 1.0).abs() < 1e-12);
        assert!((result[[1, 0]] - 0.0).abs() < 1e-12);
        assert!((result[[2, 0]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_standard_scaler() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let mut scaler = Scaler::new(ScalerKind::Standard);
        let result = scaler.fit_transform(&x).unwrap();

        let mean = result.column(0).mean().unwrap();
        assert!(mean.abs() < 1e-10);
    }

    #[test]
    fn test_constant_column() {
        let x = array![[3.0, 1.0], [3.0, 2.0], [3.0, 3.0]];
        let mut scaler = Scaler::new(ScalerKind::MinMax);
        let result = scaler.fit_transform(&x).unwrap();

        // Zero range scales by 1 instead of dividing by zero
        for v in result.column(0) {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_inverse_transform() {
        let x = array![[1.0, -4.0], [2.0, 0.5], [3.0, 7.0], [4.0, 2.0]];
        let mut scaler = Scaler::new(ScalerKind::MinMax);
        let scaled = scaler.fit_transform(&x).unwrap();
        let restored = scaler.inverse_transform(&scaled).unwrap();

        for (o, r) in x.iter().zip(restored.iter()) {
            assert!((o - r).abs() < 1e-10);
        }
    }

    #[test]
    fn test_transform_before_fit() {
        let x = array![[1.0], [2.0]];
        let scaler = Scaler::new(ScalerKind::MinMax);
        assert!(matches!(scaler.transform(&x), Err(SweepError::ModelNotFitted)));
    }

    #[test]
    fn test_width_mismatch() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let mut scaler = Scaler::new(ScalerKind::MinMax);
        scaler.fit(&x).unwrap();

        let narrow = array![[1.0], [2.0]];
        assert!(matches!(scaler.transform(&narrow), Err(SweepError::ShapeError { .. })));
    }

    #[test]
    fn test_param_surface() {
        let mut scaler = Scaler::new(ScalerKind::MinMax);
        assert_eq!(
            scaler.param_names(),
            vec!["kind".to_string(), "range_max".to_string(), "range_min".to_string()]
        );

        scaler.set_param("kind", ParamValue::Str("standard".into())).unwrap();
        assert_eq!(scaler.param("kind").unwrap(), ParamValue::Str("standard".into()));

        let err = scaler.set_param("kind", ParamValue::Str("log".into()));
        assert!(matches!(err, Err(SweepError::InvalidParameter { .. })));

        let err = scaler.set_param("gamma", ParamValue::Float(1.0));
        assert!(matches!(err, Err(SweepError::UnknownParameter(_))));
    }

    #[test]
    fn test_set_param_clears_fit() {
        let x = array![[1.0], [2.0], [3.0]];
        let mut scaler = Scaler::new(ScalerKind::MinMax);
        scaler.fit(&x).unwrap();
        assert!(scaler.is_fitted());

        scaler.set_param("range_max", ParamValue::Float(2.0)).unwrap();
        assert!(!scaler.is_fitted());
    }
}
