//! paramsweep - Hyperparameter inspection for a two-stage tabular pipeline
//!
//! This crate builds a feature-rescaling + linear-classifier pipeline over a
//! CSV dataset and demonstrates how its hyperparameters are enumerated, read,
//! and written through one unified namespace, then scanned across seeded
//! cross-validation runs.
//!
//! # Modules
//!
//! - [`data`] - CSV loading and feature/target extraction
//! - [`preprocessing`] - The feature-rescaling stage
//! - [`training`] - The logistic classifier, metrics, and cross-validation
//! - [`pipeline`] - The two-stage pipeline and its parameter namespace
//! - [`sweep`] - Manual scans of one parameter over a candidate list
//! - [`params`] - Parameter values and the `stage__param` naming convention

pub mod data;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod preprocessing;
pub mod sweep;
pub mod training;

pub use error::{Result, SweepError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::data::{ClassificationTable, DataLoader};
    pub use crate::error::{Result, SweepError};
    pub use crate::params::{ParamSet, ParamValue, PARAM_SEP};
    pub use crate::pipeline::Pipeline;
    pub use crate::preprocessing::{Scaler, ScalerKind};
    pub use crate::sweep::{ParamSweep, SweepPoint};
    pub use crate::training::{
        cross_validate, ClassificationMetrics, CrossValidator, CvResults, CvStrategy,
        LogisticRegression,
    };
}
