/*!
 * Tests for the translation service: reply parsing, cost telemetry and
 * batch translation against the mock provider
 */

use autotrans::game_data::TextKind;
use autotrans::providers::mock::{MOCK_PREFIX, MockTranslator};
use autotrans::translation::{CostTracker, TranslationService, parse_numbered_reply};

use crate::common::{test_config, unit};

/// Test parsing a well-formed numbered reply
#[test]
fn test_parse_numbered_reply_withNumberedLines_shouldStripPrefixes() {
    let parsed = parse_numbered_reply("1. Xin chào\n2. Thế giới", 2);
    assert_eq!(parsed, vec!["Xin chào", "Thế giới"]);
}

/// Test the tolerated prefix punctuation variants
#[test]
fn test_parse_numbered_reply_withPrefixVariants_shouldAcceptAll() {
    let parsed = parse_numbered_reply("1) một\n2: hai\n3- ba\n4. bốn", 4);
    assert_eq!(parsed, vec!["một", "hai", "ba", "bốn"]);
}

/// Test the unlabeled-line fallback
#[test]
fn test_parse_numbered_reply_withUnlabeledLines_shouldCountThem() {
    let parsed = parse_numbered_reply("Xin chào\nThế giới", 2);
    assert_eq!(parsed, vec!["Xin chào", "Thế giới"]);
}

/// Test that purely numeric lines and blank lines are skipped
#[test]
fn test_parse_numbered_reply_withNoiseLines_shouldSkipThem() {
    let parsed = parse_numbered_reply("1. một\n\n42\n2. hai", 2);
    assert_eq!(parsed, vec!["một", "hai"]);
}

/// Test padding when the reply is short
#[test]
fn test_parse_numbered_reply_withShortReply_shouldPadWithEmpty() {
    let parsed = parse_numbered_reply("1. một", 3);
    assert_eq!(parsed, vec!["một", "", ""]);
}

/// Test truncation when the reply is long
#[test]
fn test_parse_numbered_reply_withLongReply_shouldTruncate() {
    let parsed = parse_numbered_reply("1. một\n2. hai\n3. ba", 2);
    assert_eq!(parsed, vec!["một", "hai"]);
}

/// Test an entirely empty reply
#[test]
fn test_parse_numbered_reply_withEmptyReply_shouldPadEverything() {
    let parsed = parse_numbered_reply("", 2);
    assert_eq!(parsed, vec!["", ""]);
}

/// Test cost accumulation against the published prices
#[test]
fn test_cost_tracker_withReportedUsage_shouldPriceTokens() {
    let mut tracker = CostTracker::new(0.14, 0.28);

    tracker.add_usage(Some(1_000_000), None);
    assert!((tracker.estimated_cost - 0.14).abs() < 1e-9);

    tracker.add_usage(None, Some(1_000_000));
    assert!((tracker.estimated_cost - 0.42).abs() < 1e-9);

    assert_eq!(tracker.prompt_tokens, 1_000_000);
    assert_eq!(tracker.completion_tokens, 1_000_000);
    assert_eq!(tracker.total_tokens(), 2_000_000);
}

/// Test that missing usage leaves the tracker untouched
#[test]
fn test_cost_tracker_withMissingUsage_shouldStayZero() {
    let mut tracker = CostTracker::new(0.14, 0.28);
    tracker.add_usage(None, None);

    assert_eq!(tracker.total_tokens(), 0);
    assert_eq!(tracker.estimated_cost, 0.0);
}

/// Test the one-line summary format
#[test]
fn test_cost_tracker_withSomeActivity_shouldSummarize() {
    let mut tracker = CostTracker::new(0.14, 0.28);
    tracker.add_usage(Some(100), Some(50));
    tracker.add_translated(7);

    let summary = tracker.summary();
    assert!(summary.contains("7 texts translated"));
    assert!(summary.contains("150 tokens"));
    assert!(summary.contains("100 in / 50 out"));
}

/// Test a working batch round trip through the mock provider
#[tokio::test]
async fn test_translate_batch_withWorkingMock_shouldTranslateEveryUnit() {
    let service = TranslationService::with_mock(test_config(), MockTranslator::working());
    let units = vec![
        unit(TextKind::Dialogue, "events[0].pages[0].list[0].parameters[0]", "こんにちは"),
        unit(TextKind::Name, "displayName", "始まりの村"),
    ];

    let translated = service.translate_batch(&units).await.unwrap();

    assert_eq!(translated.len(), 2);
    assert_eq!(
        translated[0].translated,
        format!("{} こんにちは", MOCK_PREFIX)
    );
    assert_eq!(translated[0].unit, units[0]);
    assert_eq!(
        translated[1].translated,
        format!("{} 始まりの村", MOCK_PREFIX)
    );

    let cost = service.cost_snapshot();
    assert_eq!(cost.texts_translated, 2);
    assert!(cost.total_tokens() > 0);
    assert!(cost.estimated_cost > 0.0);
}

/// Test that control codes are stripped before and restored after the call
#[tokio::test]
async fn test_translate_batch_withControlCodes_shouldRestoreThem() {
    let service = TranslationService::with_mock(test_config(), MockTranslator::working());
    let units = vec![unit(
        TextKind::Dialogue,
        "events[0].pages[0].list[0].parameters[0]",
        r"\C[2]こんにちは\N[1]です\!",
    )];

    let translated = service.translate_batch(&units).await.unwrap();

    assert_eq!(
        translated[0].translated,
        format!(r"{} \C[2]こんにちは\N[1]です\!", MOCK_PREFIX)
    );
    assert!(!translated[0].translated.contains("{{CODE}}"));
}

/// Test that disabling formatting preservation sends codes through verbatim
#[tokio::test]
async fn test_translate_batch_withPreserveFormattingDisabled_shouldSendRawText() {
    let mut config = test_config();
    config.preserve_formatting = false;
    let service = TranslationService::with_mock(config, MockTranslator::working());
    let units = vec![unit(
        TextKind::Dialogue,
        "events[0].pages[0].list[0].parameters[0]",
        r"\C[2]こんにちは",
    )];

    let translated = service.translate_batch(&units).await.unwrap();
    assert_eq!(
        translated[0].translated,
        format!(r"{} \C[2]こんにちは", MOCK_PREFIX)
    );
}

/// Test that an empty batch never touches the provider
#[tokio::test]
async fn test_translate_batch_withNoUnits_shouldSkipTheRequest() {
    let mock = MockTranslator::working();
    let counter = mock.request_counter();
    let service = TranslationService::with_mock(test_config(), mock);

    let translated = service.translate_batch(&[]).await.unwrap();

    assert!(translated.is_empty());
    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 0);
}

/// Test that an empty reply falls back to the original per unit
#[tokio::test]
async fn test_translate_batch_withEmptyReply_shouldKeepOriginals() {
    let service = TranslationService::with_mock(test_config(), MockTranslator::empty());
    let units = vec![
        unit(TextKind::Dialogue, "a[0]", "こんにちは"),
        unit(TextKind::Dialogue, "a[1]", "さようなら"),
    ];

    let translated = service.translate_batch(&units).await.unwrap();

    assert_eq!(translated[0].translated, "こんにちは");
    assert_eq!(translated[1].translated, "さようなら");
}

/// Test partial fallback on a truncated reply
#[tokio::test]
async fn test_translate_batch_withTruncatedReply_shouldFallBackPerUnit() {
    let service = TranslationService::with_mock(test_config(), MockTranslator::truncated());
    let units = vec![
        unit(TextKind::Dialogue, "a[0]", "こんにちは"),
        unit(TextKind::Dialogue, "a[1]", "さようなら"),
    ];

    let translated = service.translate_batch(&units).await.unwrap();

    assert_eq!(
        translated[0].translated,
        format!("{} こんにちは", MOCK_PREFIX)
    );
    // Missing reply lines keep the source text
    assert_eq!(translated[1].translated, "さようなら");
}

/// Test that unnumbered replies still line up positionally
#[tokio::test]
async fn test_translate_batch_withUnnumberedReply_shouldAlignByPosition() {
    let service = TranslationService::with_mock(test_config(), MockTranslator::unnumbered());
    let units = vec![
        unit(TextKind::Dialogue, "a[0]", "こんにちは"),
        unit(TextKind::Dialogue, "a[1]", "さようなら"),
    ];

    let translated = service.translate_batch(&units).await.unwrap();

    assert_eq!(
        translated[0].translated,
        format!("{} こんにちは", MOCK_PREFIX)
    );
    assert_eq!(
        translated[1].translated,
        format!("{} さようなら", MOCK_PREFIX)
    );
}

/// Test that a provider failure surfaces as an error for this batch
#[test]
fn test_translate_batch_withFailingMock_shouldReturnError() {
    let service = TranslationService::with_mock(test_config(), MockTranslator::failing());
    let units = vec![unit(TextKind::Dialogue, "a[0]", "こんにちは")];

    let result = tokio_test::block_on(async { service.translate_batch(&units).await });
    assert!(result.is_err());
}

/// Test credentials checks for both provider kinds
#[test]
fn test_check_credentials_withMissingApiKey_shouldFail() {
    let config = test_config();
    assert!(config.provider.api_key.is_empty());

    let service = TranslationService::new(config.clone()).unwrap();
    assert!(service.check_credentials().is_err());

    let mut with_key = config;
    with_key.provider.api_key = "sk-test".to_string();
    let service = TranslationService::new(with_key).unwrap();
    assert!(service.check_credentials().is_ok());

    let mock = TranslationService::with_mock(test_config(), MockTranslator::working());
    assert!(mock.check_credentials().is_ok());
}
