//! Boundary checks for collaborators, run before any core call.

use vaani_types::Language;

use crate::normalize::{NormalizedText, normalize_opt};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingText { field: &'static str },

    #[error("Invalid {field} language: {code}")]
    UnsupportedLanguage { field: &'static str, code: String },
}

/// Normalize a required text field, rejecting input that normalizes to nothing
pub fn require_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<NormalizedText, ValidationError> {
    let text = normalize_opt(value);
    if text.is_empty() {
        return Err(ValidationError::MissingText { field });
    }
    Ok(text)
}

pub fn parse_language(field: &'static str, code: &str) -> Result<Language, ValidationError> {
    Language::from_code(code).ok_or_else(|| ValidationError::UnsupportedLanguage {
        field,
        code: code.to_string(),
    })
}
