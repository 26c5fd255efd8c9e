/*!
 * Safety classification for candidate strings.
 *
 * Decides, per string pulled out of a game document, whether it is
 * translatable prose or code/markup/plugin noise that must be left alone.
 * The policy is a fixed battery of named predicates evaluated in order with
 * short-circuit on the first match, so each rule is testable on its own.
 *
 * Note fields get the strictest treatment: they are overloaded as both
 * designer comments and machine-readable plugin configuration, and a
 * mistranslated plugin tag silently breaks game mechanics.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::{Config, SafeMode};

/// Strings with no letters at all (digits, whitespace, punctuation only)
static NO_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s\W]*$").unwrap());

/// Letters across the scripts the engine ships games in
static LETTER_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z\u{3040}-\u{30FF}\u{4E00}-\u{9FFF}\u{AC00}-\u{D7AF}]").unwrap()
});

/// Code punctuation used for the code-likeness score
static CODE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}();]").unwrap());

/// JS-like keywords used for the code-likeness score
static CODE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:if|else|for|while|function|var|let|const|return)\b").unwrap()
});

/// Patterns that mark a note as plugin configuration rather than prose
///
/// Evaluated in order; the first hit disqualifies the note.
static DANGEROUS_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        // HTML/XML-like tags, the classic notetag syntax
        ("angle_tag", Regex::new(r"<[^>]*>").unwrap()),
        // Bracket tags
        ("bracket_tag", Regex::new(r"\[[^\]]*\]").unwrap()),
        // Brace tags
        ("brace_tag", Regex::new(r"\{[^}]*\}").unwrap()),
        // Script variable references ($gameVariables and friends)
        ("script_variable", Regex::new(r"\$[A-Za-z_][A-Za-z0-9_.]*").unwrap()),
        // Inline function definitions
        ("js_function", Regex::new(r"function\s*\(").unwrap()),
        // Eval calls
        ("eval_call", Regex::new(r"(?i)eval\s*\(").unwrap()),
        // URLs
        ("url", Regex::new(r"(?i)https?://\S*").unwrap()),
        // Asset path prefixes
        ("asset_prefix", Regex::new(r"(?i)(?:img|audio|data|js|plugins)/").unwrap()),
    ]
});

/// Plugin vendor names that only ever appear in machine-readable notes
const PLUGIN_KEYWORDS: &[&str] = &[
    "plugin", "script", "eval", "yanfly", "mog", "galv", "hime", "srd", "sumrndmdde",
];

/// Smart-filtering predicates for non-prose shapes
///
/// Only consulted when `smart_filtering` is enabled; these reject strings
/// that are grammatically harmless but worthless or risky to translate.
static SMART_FILTERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        ("url", Regex::new(r"(?i)^https?://").unwrap()),
        (
            "asset_path",
            Regex::new(
                r"(?i)^(?:img|audio|data|js|plugins)/|\.(?:png|jpg|jpeg|gif|webp|ogg|m4a|wav|mp3|json|txt)$",
            )
            .unwrap(),
        ),
        ("version", Regex::new(r"^[vV]?\d+(?:\.\d+)+$").unwrap()),
        (
            "uuid",
            Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
                .unwrap(),
        ),
        (
            "identifier",
            // snake_case, SCREAMING_CASE constants, camelCase
            Regex::new(r"^(?:[A-Za-z][A-Za-z0-9]*(?:_[A-Za-z0-9]+)+|[A-Z][A-Z0-9_]{2,}|[a-z]+(?:[A-Z][a-z0-9]*)+)$").unwrap(),
        ),
    ]
});

/// One- or two-letter-ish stat abbreviations shown in menus
const STAT_ABBREVIATIONS: &[&str] = &[
    "hp", "mp", "tp", "sp", "atk", "def", "mat", "mdf", "agi", "luk", "exp", "lv", "lvl", "cri",
    "eva", "hit",
];

/// Engine/tech vocabulary that reads as English config values, not prose
const TECH_VOCABULARY: &[&str] = &[
    "true", "false", "null", "none", "on", "off", "ok", "yes", "no", "max", "min", "item",
    "skill", "weapon", "armor", "actor", "enemy", "troop", "state", "switch", "variable",
    "common", "event", "battle", "menu", "shop", "title", "game", "over", "new", "save", "load",
    "start", "end", "exit", "option", "options", "config", "window", "default", "auto", "test",
    "debug",
];

/// Decide whether a string is worth sending to the translator at all
///
/// This is the light check applied to every candidate regardless of field
/// type. Note fields additionally go through [`is_safe_note`].
pub fn is_candidate(text: &str, config: &Config) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    if NO_LETTERS.is_match(text) {
        return false;
    }

    if config.skip_translated && has_target_script(text, &config.target_language) {
        return false;
    }

    if config.smart_filtering && smart_filter_match(text, config).is_some() {
        return false;
    }

    true
}

/// Decide whether a note field is safe to translate
///
/// Strictly stronger than [`is_candidate`]: strict mode forbids notes
/// outright, and otherwise the note must clear the dangerous-pattern
/// battery, the code-likeness score, the plugin vendor list, the candidate
/// check and the actual-text ratio.
pub fn is_safe_note(text: &str, config: &Config) -> bool {
    if config.safe_mode == SafeMode::Strict {
        return false;
    }

    if dangerous_pattern_match(text).is_some() {
        return false;
    }

    if looks_like_code(text) {
        return false;
    }

    if contains_plugin_keywords(text) {
        return false;
    }

    is_candidate(text, config) && is_actual_text(text)
}

/// Name of the first dangerous pattern a note matches, if any
pub fn dangerous_pattern_match(text: &str) -> Option<&'static str> {
    DANGEROUS_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(name, _)| *name)
}

/// Name of the first smart filter a string matches, if any
pub fn smart_filter_match(text: &str, config: &Config) -> Option<&'static str> {
    let trimmed = text.trim();

    if let Some(name) = SMART_FILTERS
        .iter()
        .find(|(_, pattern)| pattern.is_match(trimmed))
        .map(|(name, _)| *name)
    {
        return Some(name);
    }

    if STAT_ABBREVIATIONS.contains(&trimmed.to_lowercase().as_str()) {
        return Some("stat_abbreviation");
    }

    // English engine vocabulary is config data when the game itself is not
    // in English.
    if config.source_language != "en" && is_tech_vocabulary(trimmed) {
        return Some("tech_vocabulary");
    }

    None
}

/// Ratio-based check for strings that are mostly code syntax
pub fn looks_like_code(text: &str) -> bool {
    let score = CODE_PUNCTUATION.find_iter(text).count() + CODE_KEYWORDS.find_iter(text).count();
    score as f64 > text.chars().count() as f64 * 0.2
}

/// Case-insensitive substring match against the plugin vendor list
pub fn contains_plugin_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    PLUGIN_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// At least one letter, and letters make up more than 30% of the string
pub fn is_actual_text(text: &str) -> bool {
    let letters = LETTER_CHARS.find_iter(text).count();
    if letters == 0 {
        return false;
    }
    letters as f64 / text.chars().count() as f64 > 0.3
}

/// Heuristic detection of target-language script already in a string
///
/// Per-language character-class test for the target languages the tool
/// supports; unknown codes never match.
pub fn has_target_script(text: &str, target_language: &str) -> bool {
    static VIETNAMESE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)[àáạảãâăđêôơư]").unwrap());
    static JAPANESE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{3040}-\u{30FF}]").unwrap());
    static CHINESE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{4E00}-\u{9FFF}]").unwrap());
    static KOREAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{AC00}-\u{D7AF}]").unwrap());

    match target_language {
        "vi" => VIETNAMESE.is_match(text),
        "ja" => JAPANESE.is_match(text),
        "zh" => CHINESE.is_match(text),
        "ko" => KOREAN.is_match(text),
        _ => false,
    }
}

fn is_tech_vocabulary(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || words.len() > 2 {
        return false;
    }
    words.iter().all(|word| {
        let cleaned = word.trim_matches(|c: char| !c.is_alphanumeric());
        !cleaned.is_empty() && TECH_VOCABULARY.contains(&cleaned.to_lowercase().as_str())
    })
}
