//! Natural-language reminder parsing
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// "at 3", "at 3pm", "at 10:30 am"
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)at\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?").expect("reminder time regex")
});

/// Filler stripped from the message; earlier alternatives win
static FILLER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)remind me to|set a reminder for|remind me about|set reminder|remind me")
        .expect("reminder filler regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// No "at <hour>" expression in the text
    Missing,
    /// The expression resolves to something that is not a 24h time
    OutOfRange { hour: u32, minute: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReminder {
    pub message: String,
    /// 24-hour "HH:MM"
    pub remind_at: String,
}

/// Parse the due time and message out of a sentence
pub fn parse_reminder(text: &str) -> Result<ParsedReminder, TimeError> {
    let remind_at = parse_time(text)?;
    Ok(ParsedReminder {
        message: extract_message(text),
        remind_at,
    })
}

/// Resolve the first "at <hour>[:<minute>] [am|pm]" to "HH:MM".
///
/// With am/pm: 12pm is 12 and 12am is 0. Without: 1-7 are read as
/// afternoon (+12), 0 and 8-12 are kept as-is.
pub fn parse_time(text: &str) -> Result<String, TimeError> {
    let caps = TIME_PATTERN.captures(text).ok_or(TimeError::Missing)?;

    let mut hour: u32 = caps[1].parse().map_err(|_| TimeError::Missing)?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| TimeError::Missing)?,
        None => 0,
    };
    let meridiem = caps.get(3).map(|m| m.as_str().to_lowercase());

    match meridiem.as_deref() {
        Some("pm") if hour != 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        None if (1..8).contains(&hour) => hour += 12,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
        .map(|t| t.format("%H:%M").to_string())
        .ok_or(TimeError::OutOfRange { hour, minute })
}

/// The reminder subject: the sentence minus the time and filler phrases
pub fn extract_message(text: &str) -> String {
    let without_time = TIME_PATTERN.replace_all(text, "");
    let cleaned = FILLER_PATTERN.replace_all(&without_time, "");
    let message = cleaned.trim_matches(|c| c == ' ' || c == ',' || c == '.');
    if message.is_empty() {
        text.to_string()
    } else {
        message.to_string()
    }
}
