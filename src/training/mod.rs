//! Classifier training and evaluation
//!
//! The linear classifier stage, classification metrics, and the seeded
//! cross-validation machinery used by the parameter sweep.

pub mod cross_validation;
pub mod logistic;
pub mod metrics;

pub use cross_validation::{cross_validate, CrossValidator, CvResults, CvSplit, CvStrategy};
pub use logistic::LogisticRegression;
pub use metrics::ClassificationMetrics;
