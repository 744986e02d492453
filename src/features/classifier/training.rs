//! Offline trainer for the intent model
//!
//! Fits the tf-idf vocabulary and a multinomial logistic regression with L2
//! regularisation by full-batch gradient descent. Only `aide-train` and tests
//! call this; the runtime just loads the resulting artifact.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::model::{softmax, IntentModel};
use super::vectorizer::{l2_normalize, terms};

#[derive(Debug, Clone)]
pub struct TrainingOptions {
    /// Inverse regularisation strength
    pub c: f64,
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            c: 5.0,
            learning_rate: 1.0,
            epochs: 3000,
        }
    }
}

/// Train a model on `(utterance, label)` pairs
pub fn train(examples: &[(&str, &str)], options: &TrainingOptions) -> IntentModel {
    let labels: Vec<String> = examples
        .iter()
        .map(|(_, label)| label.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let label_index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    let documents: Vec<Vec<String>> = examples.iter().map(|(text, _)| terms(text)).collect();

    // Document frequency per term; BTreeMap keeps columns alphabetical
    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in &documents {
        let unique: BTreeSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    let n = examples.len() as f64;
    let vocabulary: HashMap<String, usize> = document_frequency
        .keys()
        .enumerate()
        .map(|(col, term)| (term.to_string(), col))
        .collect();
    let idf: Vec<f64> = document_frequency
        .values()
        .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let features: Vec<Vec<(usize, f64)>> = documents
        .iter()
        .map(|doc| {
            let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
            for term in doc {
                *counts.entry(vocabulary[term]).or_insert(0.0) += 1.0;
            }
            let mut vector: Vec<(usize, f64)> = counts
                .into_iter()
                .map(|(col, count)| (col, count * idf[col]))
                .collect();
            l2_normalize(&mut vector);
            vector
        })
        .collect();
    let targets: Vec<usize> = examples
        .iter()
        .map(|(_, label)| label_index[label])
        .collect();

    let k = labels.len();
    let v = idf.len();
    let mut weights = vec![vec![0.0; v]; k];
    let mut intercepts = vec![0.0; k];
    let penalty = 1.0 / (options.c * n);

    for _ in 0..options.epochs {
        let mut grad_w = vec![vec![0.0; v]; k];
        let mut grad_b = vec![0.0; k];

        for (x, &target) in features.iter().zip(&targets) {
            let scores: Vec<f64> = weights
                .iter()
                .zip(&intercepts)
                .map(|(row, b)| b + x.iter().map(|(col, val)| row[*col] * val).sum::<f64>())
                .collect();
            let probabilities = softmax(&scores);

            for (class, p) in probabilities.iter().enumerate() {
                let error = p - if class == target { 1.0 } else { 0.0 };
                grad_b[class] += error;
                for (col, val) in x {
                    grad_w[class][*col] += error * val;
                }
            }
        }

        for class in 0..k {
            for col in 0..v {
                let gradient = grad_w[class][col] / n + penalty * weights[class][col];
                weights[class][col] -= options.learning_rate * gradient;
            }
            intercepts[class] -= options.learning_rate * grad_b[class] / n;
        }
    }

    IntentModel {
        labels,
        vocabulary,
        idf,
        coefficients: weights,
        intercepts,
    }
}

/// Share of `examples` the model labels correctly
pub fn accuracy(model: &IntentModel, examples: &[(&str, &str)]) -> f64 {
    if examples.is_empty() {
        return 0.0;
    }
    let correct = examples
        .iter()
        .filter(|(text, label)| model.predict(text).label == *label)
        .count();
    correct as f64 / examples.len() as f64
}

/// Fold index for every example. Each label's examples are dealt round-robin
/// so every fold sees roughly the same label mix.
pub fn stratified_folds(examples: &[(&str, &str)], folds: usize) -> Vec<usize> {
    let folds = folds.max(1);
    let mut seen: HashMap<&str, usize> = HashMap::new();
    examples
        .iter()
        .map(|(_, label)| {
            let count = seen.entry(*label).or_insert(0);
            let fold = *count % folds;
            *count += 1;
            fold
        })
        .collect()
}

/// Held-out accuracy of each fold: train on the rest, score on the fold.
/// Folds left empty by a small example set are skipped.
pub fn cross_validate(
    examples: &[(&str, &str)],
    options: &TrainingOptions,
    folds: usize,
) -> Vec<f64> {
    let assignment = stratified_folds(examples, folds);
    (0..folds.max(1))
        .filter_map(|fold| {
            let (held_out, rest): (Vec<_>, Vec<_>) = examples
                .iter()
                .zip(&assignment)
                .partition(|(_, f)| **f == fold);
            if held_out.is_empty() || rest.is_empty() {
                return None;
            }
            let held_out: Vec<(&str, &str)> = held_out.into_iter().map(|(e, _)| *e).collect();
            let rest: Vec<(&str, &str)> = rest.into_iter().map(|(e, _)| *e).collect();
            Some(accuracy(&train(&rest, options), &held_out))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::training_data::TRAINING_DATA;
    use super::*;

    #[test]
    fn test_vocabulary_and_labels_are_sorted() {
        let model = train(
            &[("hello there", "greeting"), ("bye now", "exit")],
            &TrainingOptions {
                epochs: 10,
                ..TrainingOptions::default()
            },
        );
        assert_eq!(model.labels, vec!["exit", "greeting"]);
        assert_eq!(model.vocabulary["bye"], 0);
        assert_eq!(model.vocabulary["bye now"], 1);
        assert_eq!(model.idf.len(), 6);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_trained_model_fits_the_example_set() {
        let model = train(TRAINING_DATA, &TrainingOptions::default());
        assert_eq!(model.labels.len(), 14);
        assert!(accuracy(&model, TRAINING_DATA) > 0.9);

        assert_eq!(model.predict("what time is it").label, "tell_time");
        assert_eq!(model.predict("add contact dad 9876543210").label, "add_contact");
        assert_eq!(model.predict("start pomodoro").label, "study_mode");
    }

    #[test]
    fn test_stratified_folds_spread_each_label() {
        let examples = [
            ("a", "x"),
            ("b", "y"),
            ("c", "x"),
            ("d", "x"),
            ("e", "y"),
        ];
        assert_eq!(stratified_folds(&examples, 2), vec![0, 0, 1, 0, 1]);
        assert_eq!(stratified_folds(&examples, 0), vec![0; 5]);
    }

    #[test]
    fn test_cross_validation_generalises() {
        let scores = cross_validate(TRAINING_DATA, &TrainingOptions::default(), 5);
        assert_eq!(scores.len(), 5);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        // well above the 1-in-14 chance level
        assert!(mean > 0.4, "cross-validated accuracy {mean}");
    }

    #[test]
    fn test_cross_validation_skips_empty_folds() {
        let examples = [
            ("hello there", "greeting"),
            ("hi friend", "greeting"),
            ("bye now", "exit"),
            ("see you", "exit"),
        ];
        let options = TrainingOptions {
            epochs: 10,
            ..TrainingOptions::default()
        };
        // two examples per label never reach the third fold
        assert_eq!(cross_validate(&examples, &options, 3).len(), 2);
    }
}
