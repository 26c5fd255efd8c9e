use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// How conservatively plugin-prone note fields are treated
    #[serde(default)]
    pub safe_mode: SafeMode,

    /// Number of text units sent per API request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Translate dialogue and choice commands
    #[serde(default = "default_true")]
    pub translate_dialogue: bool,

    /// Translate names and nicknames
    #[serde(default = "default_true")]
    pub translate_names: bool,

    /// Translate profiles, descriptions, notes and skill messages
    #[serde(default = "default_true")]
    pub translate_descriptions: bool,

    /// Reject non-prose strings (paths, identifiers, stat abbreviations)
    #[serde(default = "default_true")]
    pub smart_filtering: bool,

    /// Skip strings that already contain target-language script
    #[serde(default)]
    pub skip_translated: bool,

    /// Strip engine control codes before translation and restore them after
    #[serde(default = "default_true")]
    pub preserve_formatting: bool,

    /// Add game-localization tone guidance to the system prompt
    #[serde(default = "default_true")]
    pub context_aware: bool,

    /// Add a quality self-check instruction to the system prompt
    #[serde(default = "default_true")]
    pub quality_check: bool,

    /// Translation API settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Note-field safety policy
///
/// RPG Maker note fields double as plugin configuration, so translating them
/// can break game mechanics. Strict never touches them, balanced translates
/// only notes that clear the full classifier battery, aggressive uses the
/// same battery but is reserved for future loosening of individual rules.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SafeMode {
    Strict,
    #[default]
    Balanced,
    Aggressive,
}

impl SafeMode {
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Strict => "strict".to_string(),
            Self::Balanced => "balanced".to_string(),
            Self::Aggressive => "aggressive".to_string(),
        }
    }
}

impl std::fmt::Display for SafeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for SafeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "balanced" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(anyhow!("Invalid safe mode: {}", s)),
        }
    }
}

/// Translation API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Chat-completions endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Temperature for text generation (low for deterministic output)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum completion tokens per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay in milliseconds between consecutive batch requests
    #[serde(default)]
    pub rate_limit_delay_ms: u64,

    /// Price per million input tokens in USD, for the running cost estimate
    #[serde(default = "default_input_price")]
    pub input_price_per_million: f64,

    /// Price per million output tokens in USD, for the running cost estimate
    #[serde(default = "default_output_price")]
    pub output_price_per_million: f64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            rate_limit_delay_ms: 0,
            input_price_per_million: default_input_price(),
            output_price_per_million: default_output_price(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_batch_size() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_endpoint() -> String {
    "https://api.deepseek.com/v1/chat/completions".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_input_price() -> f64 {
    0.14
}

fn default_output_price() -> f64 {
    0.28
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        if self.batch_size == 0 {
            return Err(anyhow!("batch_size must be at least 1"));
        }

        if self.provider.endpoint.is_empty() {
            return Err(anyhow!("Translation endpoint must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "ja".to_string(),
            target_language: "vi".to_string(),
            safe_mode: SafeMode::default(),
            batch_size: default_batch_size(),
            translate_dialogue: true,
            translate_names: true,
            translate_descriptions: true,
            smart_filtering: true,
            skip_translated: false,
            preserve_formatting: true,
            context_aware: true,
            quality_check: true,
            provider: ProviderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
