//! Cross-validation implementations

use crate::error::{Result, SweepError};
use crate::pipeline::Pipeline;
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cross-validation strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CvStrategy {
    /// K-Fold cross-validation
    KFold { n_splits: usize, shuffle: bool },
    /// Stratified K-Fold (maintains class distribution)
    StratifiedKFold { n_splits: usize, shuffle: bool },
}

impl Default for CvStrategy {
    fn default() -> Self {
        CvStrategy::KFold {
            n_splits: 5,
            shuffle: true,
        }
    }
}

/// A single train/test split
#[derive(Debug, Clone)]
pub struct CvSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// Cross-validation splitter
#[derive(Debug, Clone)]
pub struct CrossValidator {
    strategy: CvStrategy,
    random_state: Option<u64>,
}

impl CrossValidator {
    /// Create a new cross-validator
    pub fn new(strategy: CvStrategy) -> Self {
        Self {
            strategy,
            random_state: None,
        }
    }

    /// Set random state for reproducibility
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Generate train/test splits
    pub fn split(&self, n_samples: usize, y: Option<&Array1<f64>>) -> Result<Vec<CvSplit>> {
        match &self.strategy {
            CvStrategy::KFold { n_splits, shuffle } => {
                self.k_fold_split(n_samples, *n_splits, *shuffle)
            }
            CvStrategy::StratifiedKFold { n_splits, shuffle } => {
                let y = y.ok_or_else(|| {
                    SweepError::ValidationError(
                        "StratifiedKFold requires target array".to_string(),
                    )
                })?;
                self.stratified_k_fold_split(y, *n_splits, *shuffle)
            }
        }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.random_state {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    fn k_fold_split(&self, n_samples: usize, n_splits: usize, shuffle: bool) -> Result<Vec<CvSplit>> {
        if n_splits < 2 {
            return Err(SweepError::ValidationError(
                "n_splits must be at least 2".to_string(),
            ));
        }
        if n_samples < n_splits {
            return Err(SweepError::ValidationError(format!(
                "n_samples ({}) must be >= n_splits ({})",
                n_samples, n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();

        if shuffle {
            indices.shuffle(&mut self.rng());
        }

        // First (n_samples % n_splits) folds get one extra sample
        let fold_sizes: Vec<usize> = (0..n_splits)
            .map(|i| {
                let base = n_samples / n_splits;
                let remainder = n_samples % n_splits;
                if i < remainder {
                    base + 1
                } else {
                    base
                }
            })
            .collect();

        let mut splits = Vec::with_capacity(n_splits);
        let mut current = 0;

        for fold_idx in 0..n_splits {
            let fold_size = fold_sizes[fold_idx];
            let test_indices: Vec<usize> = indices[current..current + fold_size].to_vec();
            let train_indices: Vec<usize> = indices[..current]
                .iter()
                .chain(indices[current + fold_size..].iter())
                .copied()
                .collect();

            splits.push(CvSplit {
                train_indices,
                test_indices,
                fold_idx,
            });

            current += fold_size;
        }

        Ok(splits)
    }

    fn stratified_k_fold_split(
        &self,
        y: &Array1<f64>,
        n_splits: usize,
        shuffle: bool,
    ) -> Result<Vec<CvSplit>> {
        if n_splits < 2 {
            return Err(SweepError::ValidationError(
                "n_splits must be at least 2".to_string(),
            ));
        }

        // Group samples by class code
        let mut class_indices: std::collections::BTreeMap<i64, Vec<usize>> =
            std::collections::BTreeMap::new();
        for (idx, &val) in y.iter().enumerate() {
            let class = val.round() as i64;
            class_indices.entry(class).or_default().push(idx);
        }

        if shuffle {
            let mut rng = self.rng();
            for indices in class_indices.values_mut() {
                indices.shuffle(&mut rng);
            }
        }

        // Distribute samples from each class round-robin over folds
        let mut folds: Vec<Vec<usize>> = vec![Vec::new(); n_splits];
        for indices in class_indices.values() {
            for (i, &idx) in indices.iter().enumerate() {
                folds[i % n_splits].push(idx);
            }
        }

        let mut splits = Vec::with_capacity(n_splits);
        for fold_idx in 0..n_splits {
            let test_indices = folds[fold_idx].clone();
            let train_indices: Vec<usize> = folds
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != fold_idx)
                .flat_map(|(_, f)| f.iter().copied())
                .collect();

            splits.push(CvSplit {
                train_indices,
                test_indices,
                fold_idx,
            });
        }

        Ok(splits)
    }
}

/// Cross-validation results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvResults {
    /// Accuracy for each fold, in fold order
    pub scores: Vec<f64>,
    /// Mean score across folds
    pub mean_score: f64,
    /// Population standard deviation of scores
    pub std_score: f64,
    /// Number of folds
    pub n_folds: usize,
}

impl CvResults {
    /// Create CV results from fold scores
    pub fn from_scores(scores: Vec<f64>) -> Self {
        let n_folds = scores.len();
        let mean_score = scores.iter().sum::<f64>() / n_folds as f64;
        let variance = scores
            .iter()
            .map(|s| (s - mean_score).powi(2))
            .sum::<f64>()
            / n_folds as f64;
        let std_score = variance.sqrt();

        Self {
            scores,
            mean_score,
            std_score,
            n_folds,
        }
    }
}

/// Fit a clone of `pipeline` on each training fold and score accuracy on the
/// held-out fold.
///
/// The scaler refits on the training fold only, so no test information leaks
/// into the transform. Folds evaluate in parallel; scores keep fold order, so
/// results are deterministic for a fixed splitter seed.
pub fn cross_validate(
    pipeline: &Pipeline,
    x: &Array2<f64>,
    y: &Array1<f64>,
    splits: &[CvSplit],
) -> Result<CvResults> {
    if splits.is_empty() {
        return Err(SweepError::ValidationError("no CV splits given".to_string()));
    }
    let n_samples = x.nrows();
    for split in splits {
        let in_range = split
            .train_indices
            .iter()
            .chain(split.test_indices.iter())
            .all(|&i| i < n_samples);
        if !in_range {
            return Err(SweepError::ValidationError(format!(
                "fold {} indexes past {} samples",
                split.fold_idx, n_samples
            )));
        }
    }

    let scores: Vec<f64> = splits
        .par_iter()
        .map(|split| -> Result<f64> {
            let x_train = x.select(Axis(0), &split.train_indices);
            let y_train = y.select(Axis(0), &split.train_indices);
            let x_test = x.select(Axis(0), &split.test_indices);
            let y_test = y.select(Axis(0), &split.test_indices);

            let mut fold_pipeline = pipeline.clone();
            fold_pipeline.fit(&x_train, &y_train)?;
            let score = fold_pipeline.score(&x_test, &y_test)?;
            debug!(fold = split.fold_idx, score, "fold evaluated");
            Ok(score)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CvResults::from_scores(scores))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_fold() {
        let cv = CrossValidator::new(CvStrategy::KFold {
            n_splits: 5,
            shuffle: false,
        });
        let splits = cv.split(100, None).unwrap();

        assert_eq!(splits.len(), 5);

        for split in &splits {
            assert_eq!(split.test_indices.len(), 20);
            assert_eq!(split.train_indices.len(), 80);
        }

        // All indices covered exactly once across test sets
        let mut all_test: Vec<usize> = splits.iter().flat_map(|s| s.test_indices.clone()).collect();
        all_test.sort();
        assert_eq!(all_test, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_k_fold_remainder() {
        let cv = CrossValidator::new(CvStrategy::KFold {
            n_splits: 3,
            shuffle: false,
        });
        let splits = cv.split(10, None).unwrap();

        let sizes: Vec<usize> = splits.iter().map(|s| s.test_indices.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn test_k_fold_seeded_is_deterministic() {
        let cv = CrossValidator::new(CvStrategy::KFold {
            n_splits: 4,
            shuffle: true,
        })
        .with_random_state(7);

        let a = cv.split(40, None).unwrap();
        let b = cv.split(40, None).unwrap();

        for (sa, sb) in a.iter().zip(b.iter()) {
            assert_eq!(sa.train_indices, sb.train_indices);
            assert_eq!(sa.test_indices, sb.test_indices);
        }
    }

    #[test]
    fn test_stratified_k_fold() {
        let y = Array1::from_vec(vec![
            0.0, 0.0, 0.0, 0.0, 0.0, // 5 samples of class 0
            1.0, 1.0, 1.0, 1.0, 1.0, // 5 samples of class 1
        ]);

        let cv = CrossValidator::new(CvStrategy::StratifiedKFold {
            n_splits: 5,
            shuffle: false,
        });
        let splits = cv.split(10, Some(&y)).unwrap();

        assert_eq!(splits.len(), 5);

        // Each fold has one sample from each class
        for split in &splits {
            assert_eq!(split.test_indices.len(), 2);
            let classes: Vec<f64> = split.test_indices.iter().map(|&i| y[i]).collect();
            assert!(classes.contains(&0.0));
            assert!(classes.contains(&1.0));
        }
    }

    #[test]
    fn test_stratified_requires_target() {
        let cv = CrossValidator::new(CvStrategy::StratifiedKFold {
            n_splits: 3,
            shuffle: false,
        });
        assert!(matches!(
            cv.split(30, None),
            Err(SweepError::ValidationError(_))
        ));
    }

    #[test]
    fn test_too_few_samples() {
        let cv = CrossValidator::new(CvStrategy::KFold {
            n_splits: 5,
            shuffle: false,
        });
        assert!(matches!(
            cv.split(3, None),
            Err(SweepError::ValidationError(_))
        ));
    }

    #[test]
    fn test_cv_results_summary() {
        let results = CvResults::from_scores(vec![0.8, 0.9, 1.0]);
        assert_eq!(results.n_folds, 3);
        assert!((results.mean_score - 0.9).abs() < 1e-12);
        // Population std of [0.8, 0.9, 1.0]
        let expected = (0.02f64 / 3.0).sqrt();
        assert!((results.std_score - expected).abs() < 1e-12);
    }
}
