/*!
 * # autotrans - AI translation for RPG Maker MV/MZ data files
 *
 * A Rust library and CLI for translating the human-readable text inside
 * RPG Maker MV/MZ JSON data files with an LLM chat-completion API.
 *
 * ## Features
 *
 * - Extracts dialogue, choices, names, descriptions and notes from the
 *   three RPG Maker JSON shapes (maps, database tables, common events)
 * - Conservative safety classification so plugin tags, code-like strings
 *   and asset paths are never sent to the translator
 * - Reversible control-code handling (`\N[1]`, `\C[2]`, ...) around the
 *   translation round trip
 * - Batch translation with one API request per batch and a numbered-list
 *   wire protocol
 * - Path-addressed patching back into a deep clone of the source document;
 *   the original is never mutated
 * - Fail-open error policy: a failed batch keeps its original text, only
 *   missing credentials abort a file
 * - Running cost estimate from reported token usage
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `game_data`: Document shapes, text units and structural paths
 * - `classifier`: Safety classification of candidate strings
 * - `extractor`: Shape-specific text extraction walkers
 * - `patcher`: Path-addressed patching of translations
 * - `translation`: Batch translation service:
 *   - `translation::core`: Service, reply parsing, cost telemetry
 *   - `translation::control_codes`: Engine escape handling
 *   - `translation::prompts`: Prompt templates
 * - `providers`: Clients for the translation endpoint:
 *   - `providers::deepseek`: DeepSeek chat-completions client
 *   - `providers::mock`: Test double
 * - `app_controller`: File orchestration and collaborator interfaces
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod classifier;
pub mod errors;
pub mod extractor;
pub mod file_utils;
pub mod game_data;
pub mod language_utils;
pub mod patcher;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, SafeMode};
pub use app_controller::{Controller, TranslationReport};
pub use game_data::{DocumentKind, TextKind, TextPath, TextUnit, TranslatedUnit};
pub use translation::TranslationService;
pub use errors::{AppError, ProviderError, TranslationError};
