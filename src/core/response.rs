//! Reply type and shared response text
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serde::Serialize;

/// Answer for utterances the classifier is not confident about
pub const CLARIFICATION: &str = "I'm not sure I understood that. Could you rephrase?";
/// Answer for labels no handler is registered for
pub const FALLBACK: &str = "I don't know how to handle that yet. Could you try rephrasing?";
/// Answer for blank input
pub const EMPTY_INPUT: &str = "Please say something.";
/// Answer when a handler fails with a storage or launcher error
pub const INTERNAL_ERROR: &str = "Sorry, I ran into a problem handling that. Please try again.";

/// What the assistant says back for one utterance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    /// Detected intent label, `None` when nothing was classified
    pub intent: Option<String>,
    pub confidence: Option<f64>,
    /// Set by the exit intent so the console loop can stop
    pub exit: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            intent: None,
            confidence: None,
            exit: false,
        }
    }

    pub fn farewell(text: impl Into<String>) -> Self {
        Reply {
            exit: true,
            ..Reply::text(text)
        }
    }

    pub fn with_intent(mut self, intent: &str, confidence: f64) -> Self {
        self.intent = Some(intent.to_string());
        self.confidence = Some(confidence);
        self
    }
}

/// Uppercase the first character and lowercase the rest ("dAD" -> "Dad")
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("dad"), "Dad");
        assert_eq!(capitalize("mOM"), "Mom");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élodie"), "Élodie");
    }

    #[test]
    fn test_farewell_sets_exit() {
        let reply = Reply::farewell("Goodbye!");
        assert!(reply.exit);
        assert_eq!(reply.intent, None);

        let reply = Reply::text("hi").with_intent("greeting", 0.9);
        assert!(!reply.exit);
        assert_eq!(reply.intent.as_deref(), Some("greeting"));
        assert_eq!(reply.confidence, Some(0.9));
    }
}
