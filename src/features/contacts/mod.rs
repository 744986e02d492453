//! # Feature: Contacts
//!
//! Best-effort extraction of contact names and phone numbers from phrases
//! like "add contact dad 9876543210", "what's mom's number" or
//! "remove john from contacts". There is no grammar; anything that does not
//! fit degrades to a clarification in the handler.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: "forget" removes contacts; trailing punctuation ignored in lookups
//! - 1.0.0: Initial release

use crate::core::capitalize;

const ADD_TRIGGERS: &[&str] = &[
    "add contact",
    "save contact",
    "remember contact",
    "add my contact",
];
const LOOKUP_TRIGGERS: &[&str] = &["what's", "call", "show me", "number", "contact", "phone"];
const LOOKUP_STOP_WORDS: &[&str] = &[
    "what's", "call", "show", "me", "contact", "number", "phone", "for", "of", "is", "the",
];
const DELETE_TRIGGERS: &[&str] = &["delete", "remove", "forget"];
const DELETE_NOISE: &[&str] = &[" from contacts", " contact", "contact ", "from contacts"];

/// Fewest digits/punctuation characters a phone number may have
pub const MIN_PHONE_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactParseError {
    /// None of the trigger phrasings were used
    NoTrigger,
    /// Not enough left after the trigger (name, or name and phone)
    MissingFields,
    /// The last word does not look like a phone number
    InvalidPhone(String),
}

/// "<trigger> <name> ... <phone>": first word is the name, last is the phone
pub fn parse_new_contact(text: &str) -> Result<NewContact, ContactParseError> {
    let text = text.to_lowercase();
    let remainder = ADD_TRIGGERS
        .iter()
        .find_map(|trigger| text.split_once(trigger).map(|(_, rest)| rest.trim()))
        .ok_or(ContactParseError::NoTrigger)?;

    let parts: Vec<&str> = remainder.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(ContactParseError::MissingFields);
    }

    let raw_phone = parts[parts.len() - 1];
    let phone: String = raw_phone
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | ' ' | '(' | ')'))
        .collect();
    if phone.len() < MIN_PHONE_LEN {
        return Err(ContactParseError::InvalidPhone(raw_phone.to_string()));
    }

    Ok(NewContact {
        name: capitalize(parts[0]),
        phone,
    })
}

/// The contact someone is asking about: the last word that is not filler,
/// without a trailing "?" or possessive "'s"
pub fn extract_lookup_name(text: &str) -> Option<String> {
    let text = text.to_lowercase();
    if !LOOKUP_TRIGGERS.iter().any(|t| text.contains(t)) {
        return None;
    }

    text.split_whitespace()
        .rev()
        .map(|word| word.trim_end_matches(['?', '.', '!', ',']))
        .filter(|word| !word.is_empty() && !LOOKUP_STOP_WORDS.contains(word))
        .map(|word| {
            word.strip_suffix("'s")
                .or_else(|| word.strip_suffix("’s"))
                .unwrap_or(word)
        })
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

/// The contact to delete: whatever follows the trigger, minus "contact(s)"
pub fn extract_delete_name(text: &str) -> Result<String, ContactParseError> {
    let text = text.to_lowercase();
    let mut remainder = DELETE_TRIGGERS
        .iter()
        .find_map(|trigger| text.split_once(trigger).map(|(_, rest)| rest.trim().to_string()))
        .ok_or(ContactParseError::NoTrigger)?;

    for noise in DELETE_NOISE {
        remainder = remainder.replace(noise, "").trim().to_string();
    }
    let name = capitalize(remainder.trim_end_matches(['?', '.', '!']).trim());

    if name.is_empty() || name == "Contact" {
        Err(ContactParseError::MissingFields)
    } else {
        Ok(name)
    }
}
