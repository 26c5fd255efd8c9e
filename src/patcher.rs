/*!
 * Path-addressed patching of translated strings into a document.
 *
 * The patcher works on a deep clone and never mutates the caller's
 * document. A path that no longer resolves means the document changed
 * between extraction and patching; that single unit is skipped with a
 * warning rather than aborting the file.
 */

use log::warn;
use serde_json::Value;

use crate::game_data::{PathSegment, TranslatedUnit};

/// Apply translated units to a deep clone of the document
///
/// Order-independent: extraction guarantees no two units share a path, so
/// application order cannot affect the result.
pub fn apply_translations(document: &Value, units: &[TranslatedUnit]) -> Value {
    let mut patched = document.clone();

    for translated in units {
        if !apply_unit(&mut patched, translated) {
            warn!(
                "Skipping unit at unresolvable path: {}",
                translated.unit.path
            );
        }
    }

    patched
}

fn apply_unit(document: &mut Value, translated: &TranslatedUnit) -> bool {
    let segments = translated.unit.path.segments();
    let Some((last, intermediate)) = segments.split_last() else {
        return false;
    };

    let mut current = document;
    for segment in intermediate {
        let next = match segment {
            PathSegment::Key(name) => current.get_mut(name.as_str()),
            PathSegment::Index(idx) => current.get_mut(*idx),
        };
        match next {
            Some(value) if !value.is_null() => current = value,
            _ => return false,
        }
    }

    let slot = match last {
        PathSegment::Key(name) => current.get_mut(name.as_str()),
        PathSegment::Index(idx) => current.get_mut(*idx),
    };

    match slot {
        Some(value) => {
            *value = Value::String(translated.translated.clone());
            true
        }
        None => false,
    }
}
