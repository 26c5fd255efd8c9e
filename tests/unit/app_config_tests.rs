/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use autotrans::app_config::{Config, SafeMode};

/// Test default configuration values
#[test]
fn test_default_config_withNoOverrides_shouldMatchExpectedDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "ja");
    assert_eq!(config.target_language, "vi");
    assert_eq!(config.safe_mode, SafeMode::Balanced);
    assert_eq!(config.batch_size, 10);
    assert!(config.translate_dialogue);
    assert!(config.translate_names);
    assert!(config.translate_descriptions);
    assert!(config.smart_filtering);
    assert!(!config.skip_translated);
    assert!(config.preserve_formatting);
    assert_eq!(config.provider.model, "deepseek-chat");
    assert_eq!(
        config.provider.endpoint,
        "https://api.deepseek.com/v1/chat/completions"
    );
    assert_eq!(config.provider.temperature, 0.3);
    assert_eq!(config.provider.max_tokens, 4000);
    assert_eq!(config.provider.input_price_per_million, 0.14);
    assert_eq!(config.provider.output_price_per_million, 0.28);
}

/// Test validation with a valid configuration
#[test]
fn test_validate_withDefaultConfig_shouldSucceed() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

/// Test validation with a zero batch size
#[test]
fn test_validate_withZeroBatchSize_shouldFail() {
    let mut config = Config::default();
    config.batch_size = 0;
    assert!(config.validate().is_err());
}

/// Test validation with an invalid language code
#[test]
fn test_validate_withInvalidLanguageCode_shouldFail() {
    let mut config = Config::default();
    config.target_language = "xx".to_string();
    assert!(config.validate().is_err());
}

/// Test validation with an empty endpoint
#[test]
fn test_validate_withEmptyEndpoint_shouldFail() {
    let mut config = Config::default();
    config.provider.endpoint = String::new();
    assert!(config.validate().is_err());
}

/// Test safe mode parsing and display round trip
#[test]
fn test_safe_mode_withFromStrAndDisplay_shouldRoundTrip() {
    for mode in [SafeMode::Strict, SafeMode::Balanced, SafeMode::Aggressive] {
        let rendered = mode.to_string();
        assert_eq!(SafeMode::from_str(&rendered).unwrap(), mode);
    }
    assert!(SafeMode::from_str("paranoid").is_err());
}

/// Test serde representation of safe mode
#[test]
fn test_safe_mode_withSerde_shouldUseLowercase() {
    assert_eq!(
        serde_json::to_string(&SafeMode::Strict).unwrap(),
        "\"strict\""
    );
    let parsed: SafeMode = serde_json::from_str("\"aggressive\"").unwrap();
    assert_eq!(parsed, SafeMode::Aggressive);
}

/// Test that a minimal config file picks up serde defaults
#[test]
fn test_config_withMinimalJson_shouldFillDefaults() {
    let parsed: Config =
        serde_json::from_str(r#"{"source_language":"ja","target_language":"en"}"#).unwrap();

    assert_eq!(parsed.source_language, "ja");
    assert_eq!(parsed.target_language, "en");
    assert_eq!(parsed.batch_size, 10);
    assert_eq!(parsed.safe_mode, SafeMode::Balanced);
    assert!(parsed.preserve_formatting);
    assert_eq!(parsed.provider.model, "deepseek-chat");
}
