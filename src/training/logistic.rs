//! Binary logistic regression

use crate::error::{Result, SweepError};
use crate::params::{ParamSet, ParamValue};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Logistic regression for binary classification.
///
/// Trained by gradient descent with an L2 penalty controlled by the inverse
/// regularization strength `c`: larger `c` means weaker regularization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    coefficients: Option<Array1<f64>>,
    intercept: Option<f64>,
    /// Inverse regularization strength
    pub c: f64,
    /// Maximum gradient descent iterations
    pub max_iter: usize,
    /// Convergence tolerance on the gradient norm
    pub tol: f64,
    /// Gradient descent step size
    pub learning_rate: f64,
    /// Whether to fit an intercept term
    pub fit_intercept: bool,
    is_fitted: bool,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            c: 1.0,
            max_iter: 1000,
            tol: 1e-6,
            learning_rate: 0.5,
            fit_intercept: true,
            is_fitted: false,
        }
    }

    /// Set inverse regularization strength
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set learning rate
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    pub fn intercept(&self) -> Option<f64> {
        self.intercept
    }

    /// Sigmoid function
    fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }

    /// Fit the model using gradient descent
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(SweepError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(SweepError::ValidationError("empty training data".to_string()));
        }
        if self.c <= 0.0 {
            return Err(SweepError::InvalidParameter {
                name: "c".to_string(),
                value: self.c.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let mut weights = Array1::zeros(n_features);
        let mut bias = 0.0;

        // L2 penalty gradient is w / (c * n); small c shrinks weights hard
        let penalty = 1.0 / (self.c * n_samples as f64);
        // The shrink step must stay contractive: lr * penalty > 2 diverges
        let lr = self.learning_rate.min(1.0 / penalty);

        for iter in 0..self.max_iter {
            let linear = x.dot(&weights) + bias;
            let predictions = Self::sigmoid(&linear);

            let errors = &predictions - y;
            let dw = (x.t().dot(&errors) / n_samples as f64) + penalty * &weights;
            let db = if self.fit_intercept {
                errors.mean().unwrap_or(0.0)
            } else {
                0.0
            };

            let grad_norm = (dw.mapv(|v| v * v).sum() + db * db).sqrt();
            if grad_norm < self.tol {
                debug!(iter, grad_norm, "gradient descent converged");
                break;
            }

            weights = weights - lr * dw;
            bias -= lr * db;
        }

        self.coefficients = Some(weights);
        self.intercept = Some(bias);
        self.is_fitted = true;

        Ok(self)
    }

    /// Predict class-1 probabilities
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(SweepError::ModelNotFitted)?;
        let intercept = self.intercept.unwrap_or(0.0);

        if x.ncols() != coefficients.len() {
            return Err(SweepError::ShapeError {
                expected: format!("{} columns", coefficients.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let linear = x.dot(coefficients) + intercept;
        Ok(Self::sigmoid(&linear))
    }

    /// Predict class labels with a 0.5 threshold
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba(x)?;
        Ok(proba.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }

    /// Accuracy on the given data
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;

        let correct = y_pred
            .iter()
            .zip(y.iter())
            .filter(|(pred, actual)| (*pred - *actual).abs() < 0.5)
            .count();

        Ok(correct as f64 / y.len() as f64)
    }

    fn clear_fit(&mut self) {
        self.coefficients = None;
        self.intercept = None;
        self.is_fitted = false;
    }

    fn float_param(name: &str, value: &ParamValue) -> Result<f64> {
        value.as_f64().ok_or_else(|| SweepError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            reason: "expected a number".to_string(),
        })
    }
}

impl ParamSet for LogisticRegression {
    fn params(&self) -> BTreeMap<String, ParamValue> {
        let mut map = BTreeMap::new();
        map.insert("c".to_string(), ParamValue::Float(self.c));
        map.insert("max_iter".to_string(), ParamValue::Int(self.max_iter as i64));
        map.insert("tol".to_string(), ParamValue::Float(self.tol));
        map.insert(
            "learning_rate".to_string(),
            ParamValue::Float(self.learning_rate),
        );
        map.insert(
            "fit_intercept".to_string(),
            ParamValue::Bool(self.fit_intercept),
        );
        map
    }

    fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()> {
        match name {
            "c" => {
                let v = Self::float_param(name, &value)?;
                if !v.is_finite() || v <= 0.0 {
                    return Err(SweepError::InvalidParameter {
                        name: name.to_string(),
                        value: value.to_string(),
                        reason: "must be positive".to_string(),
                    });
                }
                self.c = v;
            }
            "tol" => {
                let v = Self::float_param(name, &value)?;
                if !v.is_finite() || v < 0.0 {
                    return Err(SweepError::InvalidParameter {
                        name: name.to_string(),
                        value: value.to_string(),
                        reason: "must be non-negative".to_string(),
                    });
                }
                self.tol = v;
            }
            "learning_rate" => {
                let v = Self::float_param(name, &value)?;
                if !v.is_finite() || v <= 0.0 {
                    return Err(SweepError::InvalidParameter {
                        name: name.to_string(),
                        value: value.to_string(),
                        reason: "must be positive".to_string(),
                    });
                }
                self.learning_rate = v;
            }
            "max_iter" => {
                let v = value.as_int().ok_or_else(|| SweepError::InvalidParameter {
                    name: name.to_string(),
                    value: value.to_string(),
                    reason: "expected an integer".to_string(),
                })?;
                if v < 1 {
                    return Err(SweepError::InvalidParameter {
                        name: name.to_string(),
                        value: value.to_string(),
                        reason: "must be at least 1".to_string(),
                    });
                }
                self.max_iter = v as usize;
            }
            "fit_intercept" => {
                self.fit_intercept =
                    value.as_bool().ok_or_else(|| SweepError::InvalidParameter {
                        name: name.to_string(),
                        value: value.to_string(),
                        reason: "expected a bool".to_string(),
                    })?;
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

    fn separable_data() -> (Array2<f64>, Array1<f64>) {
        let x = array![
            [0.0, 0.1],
            [0.1, 0.0],
            [0.2, 0.2],
            [0.1, 0.3],
            [0.9, 1.0],
            [1.0, 0.9],
            [0.8, 0.8],
            [0.9, 0.7],
        ];
        let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_fit_separable() {
        let (x, y) = separable_data();
        let mut model = LogisticRegression::new().with_c(10.0).with_max_iter(2000);
        model.fit(&x, &y).unwrap();
        assert!(model.is_fitted());

        let accuracy = model.score(&x, &y).unwrap();
        assert!(accuracy >= 0.8, "accuracy should be >= 0.8, got {}", accuracy);
    }

    #[test]
    fn test_predict_proba_ordering() {
        let (x, y) = separable_data();
        let mut model = LogisticRegression::new().with_c(10.0).with_max_iter(2000);
        model.fit(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        assert!(proba[0] < proba[4]);
        for p in proba.iter() {
            assert!((0.0..=1.0).contains(p));
        }
    }

    #[test]
    fn test_strong_regularization_shrinks_weights() {
        let (x, y) = separable_data();

        let mut weak = LogisticRegression::new().with_c(10.0).with_max_iter(2000);
        weak.fit(&x, &y).unwrap();
        let mut strong = LogisticRegression::new().with_c(0.001).with_max_iter(2000);
        strong.fit(&x, &y).unwrap();

        let norm = |m: &LogisticRegression| {
            m.coefficients().unwrap().mapv(|v| v * v).sum().sqrt()
        };
        assert!(norm(&strong) < norm(&weak));
    }

    #[test]
    fn test_predict_before_fit() {
        let model = LogisticRegression::new();
        let x = array![[0.0, 0.0]];
        assert!(matches!(model.predict(&x), Err(SweepError::ModelNotFitted)));
    }

    #[test]
    fn test_non_positive_c_rejected() {
        let (x, y) = separable_data();
        let mut model = LogisticRegression::new().with_c(0.0);
        assert!(matches!(
            model.fit(&x, &y),
            Err(SweepError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_param_round_trip() {
        let mut model = LogisticRegression::new();
        model.set_param("c", ParamValue::Float(0.01)).unwrap();
        assert_eq!(model.param("c").unwrap(), ParamValue::Float(0.01));

        model.set_param("max_iter", ParamValue::Int(500)).unwrap();
        assert_eq!(model.param("max_iter").unwrap(), ParamValue::Int(500));

        model.set_param("fit_intercept", ParamValue::Bool(false)).unwrap();
        assert_eq!(model.param("fit_intercept").unwrap(), ParamValue::Bool(false));
    }

    #[test]
    fn test_int_widens_for_float_param() {
        let mut model = LogisticRegression::new();
        model.set_param("c", ParamValue::Int(10)).unwrap();
        assert_eq!(model.param("c").unwrap(), ParamValue::Float(10.0));
    }

    #[test]
    fn test_set_param_rejects_bad_values() {
        let mut model = LogisticRegression::new();
        assert!(matches!(
            model.set_param("c", ParamValue::Float(-1.0)),
            Err(SweepError::InvalidParameter { .. })
        ));
        assert!(matches!(
            model.set_param("c", ParamValue::Str("big".into())),
            Err(SweepError::InvalidParameter { .. })
        ));
        assert!(matches!(
            model.set_param("gamma", ParamValue::Float(1.0)),
            Err(SweepError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_set_param_clears_fit() {
        let (x, y) = separable_data();
        let mut model = LogisticRegression::new();
        model.fit(&x, &y).unwrap();
        assert!(model.is_fitted());

        model.set_param("c", ParamValue::Float(0.1)).unwrap();
        assert!(!model.is_fitted());
        assert!(matches!(model.predict(&x), Err(SweepError::ModelNotFitted)));
    }
}
