//! Classification metrics

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Metrics for binary classifier evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    /// None when no positives were predicted
    pub precision: Option<f64>,
    /// None when no positives exist in the target
    pub recall: Option<f64>,
    pub f1_score: Option<f64>,
    pub n_samples: usize,
}

impl ClassificationMetrics {
    /// Compute metrics from true and predicted class labels
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        let n_samples = y_true.len();

        let correct: usize = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| (*t - *p).abs() < 0.5)
            .count();
        let accuracy = if n_samples == 0 {
            0.0
        } else {
            correct as f64 / n_samples as f64
        };

        let (tp, fp, _tn, fn_) = Self::confusion_counts(y_true, y_pred);

        let precision = if tp + fp > 0 {
            Some(tp as f64 / (tp + fp) as f64)
        } else {
            None
        };
        let recall = if tp + fn_ > 0 {
            Some(tp as f64 / (tp + fn_) as f64)
        } else {
            None
        };
        let f1_score = match (precision, recall) {
            (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
            _ => None,
        };

        Self {
            accuracy,
            precision,
            recall,
            f1_score,
            n_samples,
        }
    }

    /// (tp, fp, tn, fn) with class 1 as positive
    fn confusion_counts(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> (usize, usize, usize, usize) {
        let mut tp = 0;
        let mut fp = 0;
        let mut tn = 0;
        let mut fn_ = 0;

        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            let actual = *t >= 0.5;
            let predicted = *p >= 0.5;
            match (actual, predicted) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (false, false) => tn += 1,
                (true, false) => fn_ += 1,
            }
        }

        (tp, fp, tn, fn_)
    }
}
