/*!
 * Prompt templates for batch game-text translation.
 *
 * The wire protocol is a 1-indexed numbered list in, a numbered list out:
 * it keeps one request per batch and makes the reply parseable without any
 * structured-output support on the model side.
 */

use crate::app_config::Config;
use crate::language_utils;

/// System prompt template. Placeholders: {source_language}, {target_language}.
const GAME_TRANSLATOR: &str = "\
You are an expert game localization translator working on an RPG Maker game, \
translating from {source_language} to {target_language}.

Rules:
- Translate each numbered line from {source_language} to {target_language}.
- Preserve every {{CODE}} placeholder exactly: same spelling, same count, same order.
- Return ONLY the numbered lines, one per line, in the same order. No commentary.
- Never merge, split, drop or reorder lines.";

const CONTEXT_AWARE_ADDITION: &str = "\
Tone: this is in-game text (dialogue, choices, item and skill descriptions). \
Use natural, idiomatic {target_language} as players expect in games, keep \
recurring names and terms consistent, and keep each line close to the length \
of the original.";

const QUALITY_CHECK_ADDITION: &str = "\
Before answering, verify that every line number from the input appears \
exactly once in your output and that every {{CODE}} placeholder survived.";

/// Builds the system and user messages for one batch request
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    source_name: String,
    target_name: String,
    context_aware: bool,
    quality_check: bool,
}

impl PromptBuilder {
    /// Create a builder from the run configuration
    ///
    /// Language codes resolve to English names for the prompt; an unknown
    /// code falls back to the code itself rather than failing the run.
    pub fn from_config(config: &Config) -> Self {
        let resolve = |code: &str| {
            language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string())
        };

        Self {
            source_name: resolve(&config.source_language),
            target_name: resolve(&config.target_language),
            context_aware: config.context_aware,
            quality_check: config.quality_check,
        }
    }

    /// Render the system prompt with the configured languages
    pub fn system_prompt(&self) -> String {
        let mut sections = vec![GAME_TRANSLATOR.to_string()];
        if self.context_aware {
            sections.push(CONTEXT_AWARE_ADDITION.to_string());
        }
        if self.quality_check {
            sections.push(QUALITY_CHECK_ADDITION.to_string());
        }

        sections
            .join("\n\n")
            .replace("{source_language}", &self.source_name)
            .replace("{target_language}", &self.target_name)
    }

    /// Render the user message: a 1-indexed numbered list in batch order
    pub fn user_prompt(&self, lines: &[String]) -> String {
        let numbered = lines
            .iter()
            .enumerate()
            .map(|(idx, line)| format!("{}. {}", idx + 1, line))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Translate from {} to {}:\n{}",
            self.source_name, self.target_name, numbered
        )
    }
}
