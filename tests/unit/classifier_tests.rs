/*!
 * Tests for the safety classifier
 */

use autotrans::app_config::{Config, SafeMode};
use autotrans::classifier;

use crate::common::test_config;

/// Test rejection of empty and whitespace-only strings
#[test]
fn test_is_candidate_withEmptyInput_shouldReject() {
    let config = test_config();
    assert!(!classifier::is_candidate("", &config));
    assert!(!classifier::is_candidate("   ", &config));
    assert!(!classifier::is_candidate("\n\t", &config));
}

/// Test rejection of strings without any letters
#[test]
fn test_is_candidate_withNoLetters_shouldReject() {
    let config = test_config();
    assert!(!classifier::is_candidate("123", &config));
    assert!(!classifier::is_candidate("---===---", &config));
    assert!(!classifier::is_candidate("42 + 7", &config));
}

/// Test acceptance of ordinary Japanese prose
#[test]
fn test_is_candidate_withJapaneseProse_shouldAccept() {
    let config = test_config();
    assert!(classifier::is_candidate("こんにちは、旅の方。", &config));
    assert!(classifier::is_candidate("始まりの村", &config));
}

/// Test the skip-translated heuristic against Vietnamese text
#[test]
fn test_is_candidate_withSkipTranslatedAndTargetScript_shouldReject() {
    let mut config = test_config();
    config.skip_translated = true;

    assert!(!classifier::is_candidate("Xin chào", &config));
    // Japanese source text still goes through
    assert!(classifier::is_candidate("こんにちは", &config));
}

/// Test that skip-translated is off by default
#[test]
fn test_is_candidate_withSkipTranslatedDisabled_shouldAcceptTargetScript() {
    let config = test_config();
    assert!(classifier::is_candidate("Xin chào", &config));
}

/// Test each named smart filter
#[test]
fn test_smart_filter_match_withNonProseShapes_shouldNameTheRule() {
    let config = test_config();

    assert_eq!(
        classifier::smart_filter_match("https://example.com/wiki", &config),
        Some("url")
    );
    assert_eq!(
        classifier::smart_filter_match("img/characters/Actor1.png", &config),
        Some("asset_path")
    );
    assert_eq!(
        classifier::smart_filter_match("portrait.png", &config),
        Some("asset_path")
    );
    assert_eq!(
        classifier::smart_filter_match("v1.2.3", &config),
        Some("version")
    );
    assert_eq!(
        classifier::smart_filter_match("550e8400-e29b-41d4-a716-446655440000", &config),
        Some("uuid")
    );
    assert_eq!(
        classifier::smart_filter_match("snake_case_name", &config),
        Some("identifier")
    );
    assert_eq!(
        classifier::smart_filter_match("MAX_VALUE", &config),
        Some("identifier")
    );
    assert_eq!(
        classifier::smart_filter_match("camelCaseValue", &config),
        Some("identifier")
    );
    assert_eq!(classifier::smart_filter_match("atk", &config), Some("stat_abbreviation"));
    assert_eq!(
        classifier::smart_filter_match("Game Over", &config),
        Some("tech_vocabulary")
    );
    assert_eq!(classifier::smart_filter_match("こんにちは", &config), None);
}

/// Test that tech vocabulary is only filtered for non-English sources
#[test]
fn test_smart_filter_match_withEnglishSource_shouldKeepTechVocabulary() {
    let mut config = test_config();
    config.source_language = "en".to_string();
    assert_eq!(classifier::smart_filter_match("Game Over", &config), None);
}

/// Test that strict mode forbids notes outright
#[test]
fn test_is_safe_note_withStrictMode_shouldAlwaysReject() {
    let mut config = test_config();
    config.safe_mode = SafeMode::Strict;

    assert!(!classifier::is_safe_note("ただのメモです", &config));
    assert!(!classifier::is_safe_note("a harmless designer comment", &config));
}

/// Test that notetag syntax is never safe
#[test]
fn test_is_safe_note_withNotetagSyntax_shouldReject() {
    let config = test_config();
    assert!(!classifier::is_safe_note("<Passive: 12>", &config));
    assert!(!classifier::is_safe_note("強い敵 <SomeTag: 5>", &config));
    assert!(!classifier::is_safe_note("[custom effect]", &config));
    assert!(!classifier::is_safe_note("{formula}", &config));
    assert!(!classifier::is_safe_note("damage: $gameVariables.value(3)", &config));
}

/// Test that plain prose notes pass in balanced mode
#[test]
fn test_is_safe_note_withPlainProse_shouldAccept() {
    let config = test_config();
    assert!(classifier::is_safe_note("伝説の剣についてのメモ", &config));
}

/// Test the dangerous pattern battery names
#[test]
fn test_dangerous_pattern_match_withEachPattern_shouldNameIt() {
    assert_eq!(classifier::dangerous_pattern_match("<tag>"), Some("angle_tag"));
    assert_eq!(classifier::dangerous_pattern_match("[tag]"), Some("bracket_tag"));
    assert_eq!(classifier::dangerous_pattern_match("{tag}"), Some("brace_tag"));
    assert_eq!(
        classifier::dangerous_pattern_match("$gameSwitches"),
        Some("script_variable")
    );
    assert_eq!(
        classifier::dangerous_pattern_match("function (x)"),
        Some("js_function")
    );
    // A function body with braces trips the earlier brace rule instead
    assert_eq!(
        classifier::dangerous_pattern_match("function() { }"),
        Some("brace_tag")
    );
    assert_eq!(classifier::dangerous_pattern_match("eval(code)"), Some("eval_call"));
    assert_eq!(
        classifier::dangerous_pattern_match("see https://example.com"),
        Some("url")
    );
    assert_eq!(
        classifier::dangerous_pattern_match("audio/bgm/theme"),
        Some("asset_prefix")
    );
    assert_eq!(classifier::dangerous_pattern_match("ただのメモ"), None);
}

/// Test the code-likeness score boundary
#[test]
fn test_looks_like_code_withSyntaxHeavyString_shouldDetect() {
    assert!(classifier::looks_like_code("if(x){y();}"));
    assert!(!classifier::looks_like_code("return value;"));
    assert!(!classifier::looks_like_code("ここでセーブできます。"));
}

/// Test the plugin vendor keyword check
#[test]
fn test_contains_plugin_keywords_withVendorNames_shouldDetect() {
    assert!(classifier::contains_plugin_keywords("Yanfly Engine note"));
    assert!(classifier::contains_plugin_keywords("MOG_BattleHud setting"));
    assert!(classifier::contains_plugin_keywords("run script here"));
    assert!(!classifier::contains_plugin_keywords("ただのメモ"));
}

/// Test the actual-text letter ratio
#[test]
fn test_is_actual_text_withLetterRatios_shouldApplyThreshold() {
    assert!(classifier::is_actual_text("こんにちは"));
    assert!(classifier::is_actual_text("Hello there"));
    assert!(!classifier::is_actual_text("a-1-2-3-4-5-6-7"));
    assert!(!classifier::is_actual_text("12345"));
}

/// Test per-language target script detection
#[test]
fn test_has_target_script_withEachLanguage_shouldMatchItsScript() {
    assert!(classifier::has_target_script("Đã dịch", "vi"));
    assert!(classifier::has_target_script("ひらがな", "ja"));
    assert!(classifier::has_target_script("汉字", "zh"));
    assert!(classifier::has_target_script("한글", "ko"));

    assert!(!classifier::has_target_script("plain latin", "vi"));
    // Unknown target codes never match
    assert!(!classifier::has_target_script("Äußerung", "de"));
}

/// Test that the classifier works on a config built from scratch
#[test]
fn test_is_candidate_withDefaultConfig_shouldAcceptProse() {
    let config = Config::default();
    assert!(classifier::is_candidate("それでは、また明日。", &config));
}
