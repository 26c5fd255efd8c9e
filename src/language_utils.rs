use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating ISO 639-1 (2-letter) and
/// ISO 639-3 (3-letter) language codes and resolving human-readable names
/// for use in translation prompts.
/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(());
        }
    } else if normalized_code.len() == 3 && Language::from_639_3(&normalized_code).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name for a language code
///
/// Prompts name languages in full ("Japanese", not "ja") so the model never
/// has to guess what a bare code means.
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let language = if normalized_code.len() == 2 {
        Language::from_639_1(&normalized_code)
    } else if normalized_code.len() == 3 {
        Language::from_639_3(&normalized_code)
    } else {
        None
    };

    language
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Check if two language codes refer to the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    let resolve = |code: &str| -> Option<Language> {
        let normalized = code.trim().to_lowercase();
        if normalized.len() == 2 {
            Language::from_639_1(&normalized)
        } else {
            Language::from_639_3(&normalized)
        }
    };

    match (resolve(code1), resolve(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
