/*!
 * Translation service for game text using the chat-completions API.
 *
 * Split into several submodules:
 *
 * - `core`: service definition, batch translation, reply parsing, cost telemetry
 * - `control_codes`: reversible stripping of engine escape sequences
 * - `prompts`: system and user prompt templates
 */

// Re-export main types for easier usage
pub use self::control_codes::{ControlCode, extract_codes, restore_codes, strip_codes};
pub use self::core::{BatchOutcome, CostTracker, TranslationService, parse_numbered_reply};
pub use self::prompts::PromptBuilder;

// Submodules
pub mod control_codes;
pub mod core;
pub mod prompts;
