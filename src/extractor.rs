/*!
 * Text extraction from RPG Maker MV/MZ JSON documents.
 *
 * Three shape-specific walkers produce a flat, deterministically ordered
 * list of addressable text units. The order is the traversal order and
 * fixes batch membership and prompt numbering downstream, so it must be
 * stable for a given input document.
 */

use serde_json::Value;

use crate::app_config::{Config, SafeMode};
use crate::classifier;
use crate::game_data::{DocumentKind, TextKind, TextPath, TextUnit};

/// Show-text command code
const CODE_SHOW_TEXT: i64 = 401;
/// Show-scrolling-text command code
const CODE_SHOW_SCROLLING_TEXT: i64 = 405;
/// Show-choices command code
const CODE_SHOW_CHOICES: i64 = 102;

/// Extract all translatable text units from a document
///
/// Every emitted unit has passed the classifier's candidate check; note
/// fields have additionally passed the full note-safety battery.
pub fn extract_units(kind: DocumentKind, document: &Value, config: &Config) -> Vec<TextUnit> {
    match kind {
        DocumentKind::Map => extract_from_map(document, config),
        DocumentKind::CommonEvents => extract_from_common_events(document, config),
        DocumentKind::Database => extract_from_database(document, config),
    }
}

/// Walk a map document: events -> pages -> command lists, plus displayName
fn extract_from_map(document: &Value, config: &Config) -> Vec<TextUnit> {
    let mut units = Vec::new();

    if let Some(events) = document.get("events").and_then(Value::as_array) {
        for (event_index, event) in events.iter().enumerate() {
            let Some(pages) = event.get("pages").and_then(Value::as_array) else {
                continue;
            };

            for (page_index, page) in pages.iter().enumerate() {
                let Some(list) = page.get("list").and_then(Value::as_array) else {
                    continue;
                };

                let prefix = TextPath::new()
                    .key("events")
                    .index(event_index)
                    .key("pages")
                    .index(page_index);
                walk_command_list(
                    list,
                    &prefix,
                    &[CODE_SHOW_TEXT, CODE_SHOW_SCROLLING_TEXT],
                    config,
                    &mut units,
                );
            }
        }
    }

    if config.translate_names {
        if let Some(display_name) = document.get("displayName").and_then(Value::as_str) {
            push_candidate(
                &mut units,
                TextKind::Name,
                TextPath::new().key("displayName"),
                display_name,
                config,
            );
        }
    }

    units
}

/// Walk a flat database array (Actors, Items, Skills, States, ...)
///
/// Database arrays are sparse: index 0 is conventionally null and holes are
/// possible, so null entries are skipped rather than treated as an error.
fn extract_from_database(document: &Value, config: &Config) -> Vec<TextUnit> {
    let mut units = Vec::new();

    let Some(entries) = document.as_array() else {
        return units;
    };

    for (entry_index, entry) in entries.iter().enumerate() {
        if entry.is_null() {
            continue;
        }

        let field = |name: &str| entry.get(name).and_then(Value::as_str);
        let path = |name: &str| TextPath::new().index(entry_index).key(name);

        if config.translate_names {
            if let Some(text) = field("name") {
                push_candidate(&mut units, TextKind::Name, path("name"), text, config);
            }
            if let Some(text) = field("nickname") {
                push_candidate(&mut units, TextKind::Nickname, path("nickname"), text, config);
            }
        }

        if config.translate_descriptions {
            if let Some(text) = field("profile") {
                push_candidate(&mut units, TextKind::Profile, path("profile"), text, config);
            }
            if let Some(text) = field("description") {
                push_candidate(
                    &mut units,
                    TextKind::Description,
                    path("description"),
                    text,
                    config,
                );
            }

            // Notes are the high-risk field: strict mode never touches them
            // and the classifier vets everything else.
            if config.safe_mode != SafeMode::Strict {
                if let Some(text) = field("note") {
                    if classifier::is_safe_note(text, config) {
                        units.push(TextUnit::new(TextKind::Note, path("note"), text));
                    }
                }
            }

            for message_number in 1..=4 {
                let name = format!("message{}", message_number);
                if let Some(text) = field(&name) {
                    push_candidate(&mut units, TextKind::Message, path(&name), text, config);
                }
            }
        }
    }

    units
}

/// Walk the common-event table: per-record name plus its command list
fn extract_from_common_events(document: &Value, config: &Config) -> Vec<TextUnit> {
    let mut units = Vec::new();

    let Some(events) = document.as_array() else {
        return units;
    };

    for (event_index, event) in events.iter().enumerate() {
        if event.is_null() {
            continue;
        }

        if config.translate_names {
            if let Some(name) = event.get("name").and_then(Value::as_str) {
                push_candidate(
                    &mut units,
                    TextKind::Name,
                    TextPath::new().index(event_index).key("name"),
                    name,
                    config,
                );
            }
        }

        // Common events carry plain show-text only, no scrolling text.
        if let Some(list) = event.get("list").and_then(Value::as_array) {
            let prefix = TextPath::new().index(event_index);
            walk_command_list(list, &prefix, &[CODE_SHOW_TEXT], config, &mut units);
        }
    }

    units
}

/// Shared dialogue/choice extraction over an event command list
fn walk_command_list(
    list: &[Value],
    prefix: &TextPath,
    dialogue_codes: &[i64],
    config: &Config,
    units: &mut Vec<TextUnit>,
) {
    if !config.translate_dialogue {
        return;
    }

    for (command_index, command) in list.iter().enumerate() {
        let Some(code) = command.get("code").and_then(Value::as_i64) else {
            continue;
        };
        let parameters = command.get("parameters");

        if dialogue_codes.contains(&code) {
            if let Some(text) = parameters
                .and_then(|p| p.get(0))
                .and_then(Value::as_str)
            {
                let path = prefix
                    .clone()
                    .key("list")
                    .index(command_index)
                    .key("parameters")
                    .index(0);
                push_candidate(units, TextKind::Dialogue, path, text, config);
            }
        } else if code == CODE_SHOW_CHOICES {
            if let Some(choices) = parameters
                .and_then(|p| p.get(0))
                .and_then(Value::as_array)
            {
                for (choice_index, choice) in choices.iter().enumerate() {
                    if let Some(text) = choice.as_str() {
                        let path = prefix
                            .clone()
                            .key("list")
                            .index(command_index)
                            .key("parameters")
                            .index(0)
                            .index(choice_index);
                        push_candidate(units, TextKind::Choice, path, text, config);
                    }
                }
            }
        }
    }
}

fn push_candidate(
    units: &mut Vec<TextUnit>,
    kind: TextKind,
    path: TextPath,
    text: &str,
    config: &Config,
) {
    if classifier::is_candidate(text, config) {
        units.push(TextUnit::new(kind, path, text));
    }
}
