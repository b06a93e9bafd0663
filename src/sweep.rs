//! Manual hyperparameter scans over a fixed candidate list

use crate::error::{Result, SweepError};
use crate::params::{ParamSet, ParamValue};
use crate::pipeline::Pipeline;
use crate::training::{cross_validate, CrossValidator, CvResults};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Cross-validated result for one candidate value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: ParamValue,
    pub result: CvResults,
}

/// A scan of one pipeline parameter over a finite list of candidate values.
///
/// Every candidate is evaluated against the same splits, so the points are
/// directly comparable.
#[derive(Debug, Clone)]
pub struct ParamSweep {
    param_name: String,
    candidates: Vec<ParamValue>,
}

impl ParamSweep {
    pub fn new(param_name: &str, candidates: Vec<ParamValue>) -> Self {
        Self {
            param_name: param_name.to_string(),
            candidates,
        }
    }

    /// Convenience constructor for float candidate lists
    pub fn over_floats(param_name: &str, candidates: &[f64]) -> Self {
        Self::new(
            param_name,
            candidates.iter().map(|&v| ParamValue::Float(v)).collect(),
        )
    }

    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    pub fn candidates(&self) -> &[ParamValue] {
        &self.candidates
    }

    /// Evaluate every candidate: set it on a clone of `base`, cross-validate,
    /// and collect one point per value, in candidate order.
    pub fn run(
        &self,
        base: &Pipeline,
        x: &Array2<f64>,
        y: &Array1<f64>,
        cv: &CrossValidator,
    ) -> Result<Vec<SweepPoint>> {
        if self.candidates.is_empty() {
            return Err(SweepError::ValidationError(
                "sweep needs at least one candidate value".to_string(),
            ));
        }

        let splits = cv.split(x.nrows(), Some(y))?;

        let mut points = Vec::with_capacity(self.candidates.len());
        for candidate in &self.candidates {
            let mut pipeline = base.clone();
            pipeline.set_param(&self.param_name, candidate.clone())?;

            let result = cross_validate(&pipeline, x, y, &splits)?;
            info!(
                param = %self.param_name,
                value = %candidate,
                mean = result.mean_score,
                std = result.std_score,
                "candidate evaluated"
            );

            points.push(SweepPoint {
                value: candidate.clone(),
                result,
            });
        }

        Ok(points)
    }
}
