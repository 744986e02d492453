//! Word n-gram extraction shared by training and inference

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of two or more word characters; single letters like "i" are dropped
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token regex"));

/// Unigrams followed by space-joined bigrams of the lowercased text
pub fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

/// Scale a sparse vector to unit length in place
pub fn l2_normalize(vector: &mut [(usize, f64)]) {
    let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, value) in vector.iter_mut() {
            *value /= norm;
        }
    }
}
