/*!
 * Core translation service implementation.
 *
 * One request per batch: the service numbers the cleaned strings, sends a
 * single chat completion, parses the numbered reply back into per-unit
 * translations, and keeps a running cost estimate from the reported token
 * usage. Batches arrive pre-chunked and in extraction order; chunking is
 * the orchestrator's job.
 */

use anyhow::{Result, anyhow};
use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;

use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::game_data::{TextUnit, TranslatedUnit};
use crate::providers::Provider;
use crate::providers::deepseek::{ChatRequest, DeepSeek};
use crate::providers::mock::{MockRequest, MockTranslator};

use super::control_codes;
use super::prompts::PromptBuilder;

/// Running cost and volume telemetry for a translation run
///
/// Advisory only: computed from whatever usage data the API reports and
/// silently unchanged when usage is missing. Never billing-accurate.
#[derive(Debug, Clone)]
pub struct CostTracker {
    /// Total prompt tokens reported by the API
    pub prompt_tokens: u64,

    /// Total completion tokens reported by the API
    pub completion_tokens: u64,

    /// Estimated cost in USD
    pub estimated_cost: f64,

    /// Number of texts that went through a successful batch
    pub texts_translated: u64,

    /// Price per million input tokens
    input_price_per_million: f64,

    /// Price per million output tokens
    output_price_per_million: f64,
}

impl CostTracker {
    /// Create a tracker with the given per-million-token prices
    pub fn new(input_price_per_million: f64, output_price_per_million: f64) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            estimated_cost: 0.0,
            texts_translated: 0,
            input_price_per_million,
            output_price_per_million,
        }
    }

    /// Add token usage from one API reply; missing values are no-ops
    pub fn add_usage(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>) {
        if let Some(pt) = prompt_tokens {
            self.prompt_tokens += pt;
            self.estimated_cost += pt as f64 / 1_000_000.0 * self.input_price_per_million;
        }
        if let Some(ct) = completion_tokens {
            self.completion_tokens += ct;
            self.estimated_cost += ct as f64 / 1_000_000.0 * self.output_price_per_million;
        }
    }

    /// Count texts translated by a successful batch
    pub fn add_translated(&mut self, count: usize) {
        self.texts_translated += count as u64;
    }

    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }

    /// Generate a one-line summary of the run so far
    pub fn summary(&self) -> String {
        format!(
            "{} texts translated, {} tokens ({} in / {} out), estimated cost ${:.4}",
            self.texts_translated,
            self.total_tokens(),
            self.prompt_tokens,
            self.completion_tokens,
            self.estimated_cost
        )
    }
}

/// Outcome of one batch, kept explicit so callers can tell fully
/// translated, untranslated-due-to-error and partial file results apart
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// The batch went through the API
    Translated(Vec<TranslatedUnit>),
    /// The batch failed; units carry identity translations
    Failed {
        /// Identity-translated units for the failed batch
        units: Vec<TranslatedUnit>,
        /// Why the batch failed
        reason: String,
    },
}

impl BatchOutcome {
    pub fn units(&self) -> &[TranslatedUnit] {
        match self {
            Self::Translated(units) => units,
            Self::Failed { units, .. } => units,
        }
    }

    pub fn into_units(self) -> Vec<TranslatedUnit> {
        match self {
            Self::Translated(units) => units,
            Self::Failed { units, .. } => units,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Provider implementation variants
enum ProviderImpl {
    /// DeepSeek chat-completions API
    DeepSeek {
        /// Client instance
        client: DeepSeek,
    },

    /// In-process mock for tests
    Mock {
        /// Mock instance
        client: MockTranslator,
    },
}

/// Main translation service for batch game-text translation
pub struct TranslationService {
    /// Provider implementation
    provider: ProviderImpl,

    /// Prompt builder derived from the run configuration
    prompts: PromptBuilder,

    /// Configuration for the translation run
    pub config: Config,

    /// Running cost telemetry; updated after each batch completes
    cost: Mutex<CostTracker>,
}

impl TranslationService {
    /// Create a new translation service backed by the DeepSeek API
    pub fn new(config: Config) -> Result<Self> {
        let client = DeepSeek::new(
            config.provider.api_key.clone(),
            config.provider.endpoint.clone(),
            config.provider.model.clone(),
            config.provider.timeout_secs,
        );

        Ok(Self {
            provider: ProviderImpl::DeepSeek { client },
            prompts: PromptBuilder::from_config(&config),
            cost: Mutex::new(CostTracker::new(
                config.provider.input_price_per_million,
                config.provider.output_price_per_million,
            )),
            config,
        })
    }

    /// Create a service backed by a mock provider, for tests
    pub fn with_mock(config: Config, client: MockTranslator) -> Self {
        Self {
            provider: ProviderImpl::Mock { client },
            prompts: PromptBuilder::from_config(&config),
            cost: Mutex::new(CostTracker::new(
                config.provider.input_price_per_million,
                config.provider.output_price_per_million,
            )),
            config,
        }
    }

    /// Fail fast before the first request when credentials are missing
    ///
    /// Batch failures are recovered fail-open, but a missing API key would
    /// fail every batch identically; that is a setup problem and fatal.
    pub fn check_credentials(&self) -> Result<()> {
        match &self.provider {
            ProviderImpl::DeepSeek { client } if !client.has_api_key() => Err(anyhow!(
                ProviderError::AuthenticationError("Missing API key".to_string())
            )),
            _ => Ok(()),
        }
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<()> {
        match &self.provider {
            ProviderImpl::DeepSeek { client } => client.test_connection().await?,
            ProviderImpl::Mock { client } => client.test_connection().await?,
        }
        Ok(())
    }

    /// Snapshot of the running cost telemetry
    pub fn cost_snapshot(&self) -> CostTracker {
        self.cost.lock().clone()
    }

    /// Translate one pre-chunked batch of units with a single API request
    ///
    /// An error here is scoped to this batch; the orchestrator substitutes
    /// identity translations and keeps going.
    pub async fn translate_batch(&self, units: &[TextUnit]) -> Result<Vec<TranslatedUnit>> {
        if units.is_empty() {
            return Ok(Vec::new());
        }

        // Strip control codes so the model only ever sees the placeholder.
        let preserve = self.config.preserve_formatting;
        let mut cleaned = Vec::with_capacity(units.len());
        let mut code_lists = Vec::with_capacity(units.len());
        for unit in units {
            if preserve {
                code_lists.push(control_codes::extract_codes(&unit.original));
                cleaned.push(control_codes::strip_codes(&unit.original));
            } else {
                code_lists.push(Vec::new());
                cleaned.push(unit.original.clone());
            }
        }

        let system = self.prompts.system_prompt();
        let user = self.prompts.user_prompt(&cleaned);

        let (content, prompt_tokens, completion_tokens) =
            self.complete_chat(system, user).await?;

        self.cost.lock().add_usage(prompt_tokens, completion_tokens);

        let parsed = parse_numbered_reply(&content, units.len());
        debug!(
            "Batch of {} units parsed into {} reply lines",
            units.len(),
            parsed.iter().filter(|line| !line.is_empty()).count()
        );

        let mut translated_units = Vec::with_capacity(units.len());
        for ((unit, reply), codes) in units.iter().zip(parsed).zip(code_lists) {
            // Never emit an empty string as a translation.
            let translated = if reply.trim().is_empty() {
                unit.original.clone()
            } else if preserve && !codes.is_empty() {
                control_codes::restore_codes(&reply, &codes)
            } else {
                reply
            };
            translated_units.push(TranslatedUnit::new(unit.clone(), translated));
        }

        self.cost.lock().add_translated(units.len());

        Ok(translated_units)
    }

    /// Issue exactly one request for the batch, no retry
    async fn complete_chat(
        &self,
        system: String,
        user: String,
    ) -> Result<(String, Option<u64>, Option<u64>)> {
        match &self.provider {
            ProviderImpl::DeepSeek { client } => {
                let request = ChatRequest::new(
                    self.config.provider.model.clone(),
                    self.config.provider.temperature,
                    self.config.provider.max_tokens,
                )
                .add_message("system", system)
                .add_message("user", user);

                let response = client.complete(request).await?;
                let content = DeepSeek::extract_text(&response);
                let usage = response.usage;
                Ok((
                    content,
                    usage.map(|u| u.prompt_tokens),
                    usage.map(|u| u.completion_tokens),
                ))
            }
            ProviderImpl::Mock { client } => {
                let response = client.complete(MockRequest { system, user }).await?;
                Ok((
                    MockTranslator::extract_text(&response),
                    response.prompt_tokens,
                    response.completion_tokens,
                ))
            }
        }
    }
}

/// Parse a numbered reply into exactly `expected` translations
///
/// Lines with a leading `<number><punctuation>` prefix have it stripped;
/// a non-empty line with no prefix that is not purely numeric counts as an
/// unlabeled translation. The result is padded with empty strings or
/// truncated to `expected` entries.
pub fn parse_numbered_reply(content: &str, expected: usize) -> Vec<String> {
    static NUMBER_PREFIX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*\d+\s*[.):\-]\s*").unwrap());
    static PURE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\s*$").unwrap());

    let mut translations = Vec::with_capacity(expected);

    for line in content.lines() {
        if translations.len() == expected {
            break;
        }

        if let Some(found) = NUMBER_PREFIX.find(line) {
            translations.push(line[found.end()..].trim().to_string());
        } else if !line.trim().is_empty() && !PURE_NUMBER.is_match(line) {
            translations.push(line.trim().to_string());
        }
    }

    translations.resize(expected, String::new());
    translations
}
