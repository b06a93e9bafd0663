//! Walkthrough of pipeline hyperparameter inspection and sweeping.
//!
//! Loads the banknote dataset, builds a min-max + logistic pipeline, runs
//! seeded 10-fold cross-validation, then shows the three parameter
//! operations: set one value, enumerate everything, and scan the
//! regularization strength across a fixed candidate list.

use paramsweep::prelude::*;

const DATA_PATH: &str = "data/banknote.csv";
const FEATURE_COLUMNS: [&str; 4] = ["variance", "skewness", "curtosis", "entropy"];
const TARGET_COLUMN: &str = "class";
const RANDOM_STATE: u64 = 7;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paramsweep=warn".into()),
        )
        .init();

    // Load the dataset and pull out features and target
    let df = DataLoader::load_csv(DATA_PATH)?;
    let table = ClassificationTable::new(&FEATURE_COLUMNS, TARGET_COLUMN);
    let (x, y) = table.extract(&df)?;
    println!(
        "Dataset: {} samples, {} features, target '{}'",
        x.nrows(),
        x.ncols(),
        TARGET_COLUMN
    );

    // Two-stage pipeline: rescale to [0, 1], then logistic regression
    let mut pipeline = Pipeline::new(
        Scaler::new(ScalerKind::MinMax),
        LogisticRegression::new(),
    );

    let cv = CrossValidator::new(CvStrategy::KFold {
        n_splits: 10,
        shuffle: true,
    })
    .with_random_state(RANDOM_STATE);

    // Baseline cross-validated accuracy with default parameters
    let splits = cv.split(x.nrows(), Some(&y))?;
    let baseline = cross_validate(&pipeline, &x, &y, &splits)?;
    println!("\nBaseline accuracy: {:.3}", baseline.mean_score);

    // Write one parameter through the nested-name convention and re-run
    pipeline.set_param("clf__c", ParamValue::Float(0.1))?;
    println!("clf__c set to {}", pipeline.param("clf__c")?);

    let adjusted = cross_validate(&pipeline, &x, &y, &splits)?;
    println!("Adjusted accuracy: {:.3}", adjusted.mean_score);

    // Enumerate the full parameter namespace
    println!("\nPipeline parameters:");
    for (name, value) in pipeline.params() {
        println!("  {} = {}", name, value);
    }

    // Scan the regularization strength across the fixed candidate list
    println!("\nSweeping clf__c:");
    let sweep = ParamSweep::over_floats("clf__c", &[0.001, 0.01, 0.1, 1.0, 10.0]);
    for point in sweep.run(&pipeline, &x, &y, &cv)? {
        println!(
            "  c = {:<6} accuracy {:.3} (+/- {:.3})",
            point.value.to_string(),
            point.result.mean_score,
            point.result.std_score
        );
    }

    Ok(())
}
