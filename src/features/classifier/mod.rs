//! # Feature: Intent Classification
//!
//! Maps a free-text utterance to one of the assistant's intent labels with a
//! confidence score. The model is a TF-IDF vectorizer plus a multinomial
//! linear classifier, produced offline by `aide-train` and loaded from a JSON
//! artifact the first time it is needed.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Built-in trainer and example set (`aide-train`)
//! - 1.0.0: Initial release with lazy artifact loading

pub mod model;
pub mod training;
pub mod training_data;
pub mod vectorizer;

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use model::IntentModel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: String,
    /// Highest posterior probability across all labels, in [0, 1]
    pub confidence: f64,
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("intent model not found at {path}; run `aide-train` first")]
    ModelUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("intent model is malformed: {0}")]
    InvalidModel(String),
}

/// Anything that can label an utterance
pub trait IntentClassify: Send + Sync {
    fn classify(&self, utterance: &str) -> Result<Classification, ClassifierError>;
}

/// Classifier backed by a model artifact on disk
pub struct IntentClassifier {
    model_path: PathBuf,
    model: OnceCell<IntentModel>,
}

impl IntentClassifier {
    /// Point at an artifact without reading it yet
    pub fn new(model_path: impl AsRef<Path>) -> Self {
        Self {
            model_path: model_path.as_ref().to_path_buf(),
            model: OnceCell::new(),
        }
    }

    /// Wrap an already-built model
    pub fn from_model(model: IntentModel) -> Self {
        Self {
            model_path: PathBuf::new(),
            model: OnceCell::with_value(model),
        }
    }

    /// Load the artifact once; later calls return the cached model
    pub fn load(&self) -> Result<&IntentModel, ClassifierError> {
        self.model.get_or_try_init(|| {
            let model = IntentModel::load(&self.model_path)?;
            log::info!(
                "Loaded intent model from {} ({} labels, {} features)",
                self.model_path.display(),
                model.labels.len(),
                model.idf.len()
            );
            Ok(model)
        })
    }

    pub fn labels(&self) -> Result<&[String], ClassifierError> {
        Ok(&self.load()?.labels)
    }
}

impl IntentClassify for IntentClassifier {
    fn classify(&self, utterance: &str) -> Result<Classification, ClassifierError> {
        Ok(self.load()?.predict(&utterance.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_is_model_unavailable() {
        let classifier = IntentClassifier::new("/nonexistent/aide/intent_model.json");
        let err = classifier.classify("hello").unwrap_err();
        assert!(matches!(err, ClassifierError::ModelUnavailable { .. }));
        assert!(err.to_string().contains("aide-train"));
    }

    #[test]
    fn test_malformed_artifact_is_invalid_model() {
        let path = std::env::temp_dir().join(format!("aide-model-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "{\"labels\": 3}").unwrap();

        let classifier = IntentClassifier::new(&path);
        assert!(matches!(
            classifier.classify("hello"),
            Err(ClassifierError::InvalidModel(_))
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_artifact_loads_once_and_classifies() {
        let path = std::env::temp_dir().join(format!("aide-model-{}.json", uuid::Uuid::new_v4()));
        model::tests::greeting_or_exit().save(&path).unwrap();

        let classifier = IntentClassifier::new(&path);
        assert_eq!(classifier.classify("HELLO").unwrap().label, "greeting");

        // Cached: removing the file does not affect later calls
        std::fs::remove_file(&path).unwrap();
        assert_eq!(classifier.classify("bye").unwrap().label, "exit");
        assert_eq!(classifier.labels().unwrap().len(), 2);
    }
}
