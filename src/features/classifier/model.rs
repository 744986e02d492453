//! Serialized TF-IDF + linear classifier artifact

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::vectorizer::{l2_normalize, terms};
use super::{Classification, ClassifierError};

/// Everything needed to score an utterance, as written by `aide-train`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentModel {
    pub labels: Vec<String>,
    /// Term -> feature column
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    /// One weight row per label
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl IntentModel {
    /// Read and validate an artifact from disk
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ClassifierError::ModelUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        let model: IntentModel = serde_json::from_str(&contents)
            .map_err(|e| ClassifierError::InvalidModel(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Check that every dimension lines up
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.labels.is_empty() {
            return Err(ClassifierError::InvalidModel("model has no labels".into()));
        }
        if self.coefficients.len() != self.labels.len()
            || self.intercepts.len() != self.labels.len()
        {
            return Err(ClassifierError::InvalidModel(format!(
                "{} labels but {} weight rows and {} intercepts",
                self.labels.len(),
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        let features = self.idf.len();
        if let Some(row) = self.coefficients.iter().find(|row| row.len() != features) {
            return Err(ClassifierError::InvalidModel(format!(
                "weight row has {} columns, expected {features}",
                row.len()
            )));
        }
        if let Some((term, _)) = self.vocabulary.iter().find(|(_, col)| **col >= features) {
            return Err(ClassifierError::InvalidModel(format!(
                "term {term:?} points past the last feature column"
            )));
        }
        Ok(())
    }

    /// Sparse, L2-normalised tf-idf vector for `text`
    pub fn vectorize(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms(text) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, count)| (col, count * self.idf[col]))
            .collect();
        vector.sort_by_key(|(col, _)| *col);
        l2_normalize(&mut vector);
        vector
    }

    /// Posterior probability for every label, in `labels` order
    pub fn predict_proba(&self, text: &str) -> Vec<f64> {
        let x = self.vectorize(text);
        let scores: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, bias)| bias + x.iter().map(|(col, v)| row[*col] * v).sum::<f64>())
            .collect();
        softmax(&scores)
    }

    pub fn predict(&self, text: &str) -> Classification {
        let probabilities = self.predict_proba(text);
        let (best, confidence) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, p)| if p > acc.1 { (i, p) } else { acc });

        Classification {
            label: self.labels[best].clone(),
            confidence,
        }
    }
}

pub(crate) fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
