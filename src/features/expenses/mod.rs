//! # Feature: Expense Tracking
//!
//! Pulls an amount and a spending category out of a sentence like
//! "I spent 50 dollars on food".
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use once_cell::sync::Lazy;
use regex::Regex;

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+(?:\.\d{1,2})?)\b").expect("amount regex"));

pub const DEFAULT_CATEGORY: &str = "miscellaneous";

/// Checked top to bottom; the first category with a matching keyword wins
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "food",
        &[
            "food", "lunch", "dinner", "breakfast", "coffee", "restaurant", "snack", "meal", "eat",
            "pizza", "burger", "tea", "drink", "cafe",
        ],
    ),
    (
        "transport",
        &[
            "transport", "bus", "uber", "taxi", "cab", "auto", "metro", "travel", "fuel", "petrol",
            "gas", "train", "flight",
        ],
    ),
    (
        "groceries",
        &[
            "grocery", "groceries", "supermarket", "vegetables", "fruits", "milk", "bread", "rice",
            "store",
        ],
    ),
    (
        "utilities",
        &[
            "electricity", "water", "internet", "wifi", "phone", "bill", "recharge", "utility",
            "gas bill",
        ],
    ),
    (
        "entertainment",
        &[
            "movie", "entertainment", "game", "concert", "netflix", "spotify", "subscription",
            "show", "ticket",
        ],
    ),
    (
        "health",
        &[
            "medicine", "doctor", "hospital", "pharmacy", "gym", "fitness", "health", "clinic",
            "medical",
        ],
    ),
    (
        "shopping",
        &[
            "shopping", "clothes", "shoes", "amazon", "flipkart", "online", "bought", "purchase",
        ],
    ),
];

/// First integer or decimal in the text, ignoring thousands separators.
/// Numbers too large to represent are treated as no amount.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    AMOUNT_PATTERN
        .captures(&cleaned)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|amount| amount.is_finite())
}

/// Keyword match against [`CATEGORY_KEYWORDS`], substring-based
pub fn detect_category(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("I spent 50 dollars on food"), Some(50.0));
        assert_eq!(parse_amount("paid 1,200.50 for rent"), Some(1200.5));
        assert_eq!(parse_amount("coffee for 3.75 and 2 cookies"), Some(3.75));
        assert_eq!(parse_amount("bought lunch"), None);
    }

    #[test]
    fn test_parse_amount_rejects_overflowing_numbers() {
        let text = format!("spent {} on food", "9".repeat(400));
        assert_eq!(parse_amount(&text), None);
    }

    #[test]
    fn test_detect_category() {
        assert_eq!(detect_category("I spent 50 dollars on food"), "food");
        assert_eq!(detect_category("uber to the airport"), "transport");
        assert_eq!(detect_category("paid the electricity BILL"), "utilities");
        assert_eq!(detect_category("paid 900 rent"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_first_matching_category_wins() {
        // "gas" is a transport keyword and is checked before "gas bill"
        assert_eq!(detect_category("gas bill 40"), "transport");
        assert_eq!(detect_category("drink water 20"), "food");
    }
}
