//! Two-stage pipeline: feature rescaling followed by a linear classifier
//!
//! Both stages share one parameter namespace. Stage-level entries appear
//! under the bare stage name; each stage's own parameters appear as
//! `stage__param`, joined with [`crate::params::PARAM_SEP`].

use crate::error::{Result, SweepError};
use crate::params::{split_nested, ParamSet, ParamValue, PARAM_SEP};
use crate::preprocessing::Scaler;
use crate::training::{ClassificationMetrics, LogisticRegression};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// An ordered scaler + classifier pair with a unified parameter namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    scaler_name: String,
    clf_name: String,
    scaler: Scaler,
    classifier: LogisticRegression,
    is_fitted: bool,
}

impl Pipeline {
    /// Create a pipeline with the default stage names `scaler` and `clf`
    pub fn new(scaler: Scaler, classifier: LogisticRegression) -> Self {
        Self {
            scaler_name: "scaler".to_string(),
            clf_name: "clf".to_string(),
            scaler,
            classifier,
            is_fitted: false,
        }
    }

    /// Rename the stages. Names must be unique, non-empty, and must not
    /// contain the parameter separator.
    pub fn with_stage_names(mut self, scaler_name: &str, clf_name: &str) -> Result<Self> {
        for name in [scaler_name, clf_name] {
            if name.is_empty() {
                return Err(SweepError::ValidationError(
                    "stage names must be non-empty".to_string(),
                ));
            }
            if name.contains(PARAM_SEP) {
                return Err(SweepError::ValidationError(format!(
                    "stage name '{name}' must not contain '{PARAM_SEP}'"
                )));
            }
        }
        if scaler_name == clf_name {
            return Err(SweepError::ValidationError(format!(
                "stage names must be unique, both are '{scaler_name}'"
            )));
        }

        self.scaler_name = scaler_name.to_string();
        self.clf_name = clf_name.to_string();
        Ok(self)
    }

    pub fn stage_names(&self) -> (&str, &str) {
        (&self.scaler_name, &self.clf_name)
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// Fit the scaler on the training data, then the classifier on the
    /// scaled features
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let x_scaled = self.scaler.fit_transform(x)?;
        self.classifier.fit(&x_scaled, y)?;
        self.is_fitted = true;
        debug!(
            n_samples = x.nrows(),
            n_features = x.ncols(),
            "pipeline fitted"
        );
        Ok(self)
    }

    /// Predict class labels for new data
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(SweepError::ModelNotFitted);
        }
        let x_scaled = self.scaler.transform(x)?;
        self.classifier.predict(&x_scaled)
    }

    /// Predict class-1 probabilities for new data
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(SweepError::ModelNotFitted);
        }
        let x_scaled = self.scaler.transform(x)?;
        self.classifier.predict_proba(&x_scaled)
    }

    /// Accuracy on the given data
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64> {
        if !self.is_fitted {
            return Err(SweepError::ModelNotFitted);
        }
        let x_scaled = self.scaler.transform(x)?;
        self.classifier.score(&x_scaled, y)
    }

    /// Full classification metrics on the given data
    pub fn evaluate(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<ClassificationMetrics> {
        let y_pred = self.predict(x)?;
        Ok(ClassificationMetrics::compute(y, &y_pred))
    }

    /// Save the pipeline to a JSON file
    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a pipeline from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let pipeline: Self = serde_json::from_str(&json)?;
        Ok(pipeline)
    }

    fn stage_kind(&self, stage: &str) -> &'static str {
        if stage == self.scaler_name {
            self.scaler.kind().as_str()
        } else {
            "logistic"
        }
    }
}

impl ParamSet for Pipeline {
    fn params(&self) -> BTreeMap<String, ParamValue> {
        let mut map = BTreeMap::new();

        // Stage-level entries, valued by stage kind
        map.insert(
            self.scaler_name.clone(),
            ParamValue::Str(self.stage_kind(&self.scaler_name).to_string()),
        );
        map.insert(
            self.clf_name.clone(),
            ParamValue::Str(self.stage_kind(&self.clf_name).to_string()),
        );

        for (name, value) in self.scaler.params() {
            map.insert(format!("{}{}{}", self.scaler_name, PARAM_SEP, name), value);
        }
        for (name, value) in self.classifier.params() {
            map.insert(format!("{}{}{}", self.clf_name, PARAM_SEP, name), value);
        }

        map
    }

    fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let Some((stage, rest)) = split_nested(name) else {
            if name == self.scaler_name || name == self.clf_name {
                return Err(SweepError::InvalidParameter {
                    name: name.to_string(),
                    value: value.to_string(),
                    reason: "stage slots cannot be reassigned".to_string(),
                });
            }
            return Err(SweepError::UnknownParameter(name.to_string()));
        };

        if stage == self.scaler_name {
            self.scaler.set_param(rest, value)?;
        } else if stage == self.clf_name {
            self.classifier.set_param(rest, value)?;
        } else {
            return Err(SweepError::UnknownParameter(name.to_string()));
        }

        self.is_fitted = false;
        Ok(())
    }
}
