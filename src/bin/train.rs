use anyhow::Result;
use dotenvy::dotenv;
use log::{info, warn};
use std::time::Instant;

use aide::core::Config;
use aide::features::classifier::training::{accuracy, cross_validate, train, TrainingOptions};
use aide::features::classifier::training_data::TRAINING_DATA;

/// Below this the example set or the options need attention
const MIN_TRAINING_ACCURACY: f64 = 0.9;

const CV_FOLDS: usize = 5;

fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let options = TrainingOptions::default();
    info!(
        "Training intent model on {} examples (C={}, {} epochs)",
        TRAINING_DATA.len(),
        options.c,
        options.epochs
    );

    let started = Instant::now();
    let model = train(TRAINING_DATA, &options);
    info!(
        "Trained {} labels over {} terms in {:.1?}",
        model.labels.len(),
        model.vocabulary.len(),
        started.elapsed()
    );

    let fit = accuracy(&model, TRAINING_DATA);
    if fit < MIN_TRAINING_ACCURACY {
        warn!("Training accuracy is only {:.1}%", fit * 100.0);
    } else {
        info!("Training accuracy: {:.1}%", fit * 100.0);
    }

    let scores = cross_validate(TRAINING_DATA, &options, CV_FOLDS);
    if !scores.is_empty() {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let spread = (scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>()
            / scores.len() as f64)
            .sqrt();
        info!(
            "{CV_FOLDS}-fold CV accuracy: {:.1}% (± {:.1}%)",
            mean * 100.0,
            spread * 100.0
        );
    }

    model.save(&config.model_path)?;
    info!("✅ Model saved to {}", config.model_path.display());
    Ok(())
}
