/*!
 * Reversible handling of RPG Maker engine control codes.
 *
 * Message strings embed escape sequences like `\N[1]` (actor name),
 * `\C[2]` (color) or `\!` (wait for input) that must survive translation
 * byte for byte. Before a string goes to the model every code is replaced
 * with a neutral placeholder; after translation the recorded codes are
 * substituted back in their original left-to-right order.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder the model is instructed to carry through unchanged
pub const PLACEHOLDER: &str = "{{CODE}}";

/// The engine escape grammar: a letter code with a bracketed numeric
/// argument, a single-character escape, or a bare letter code.
static CONTROL_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[VNGPCI]\[\d+\]|\\[.!><^$]|\\[CFHK]").unwrap()
});

/// A captured control code and its character offset in the source string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCode {
    /// The literal escape sequence, backslash included
    pub code: String,
    /// Byte offset of the match in the original string
    pub index: usize,
}

/// Scan a string left to right for control codes, in order of appearance
pub fn extract_codes(text: &str) -> Vec<ControlCode> {
    CONTROL_CODE
        .find_iter(text)
        .map(|m| ControlCode {
            code: m.as_str().to_string(),
            index: m.start(),
        })
        .collect()
}

/// Replace every control code with the placeholder token
pub fn strip_codes(text: &str) -> String {
    CONTROL_CODE.replace_all(text, PLACEHOLDER).into_owned()
}

/// Substitute recorded codes back for placeholders, one for one
///
/// Codes are anchored to placeholder order, not to semantic position: the
/// first placeholder gets the first recorded code regardless of how the
/// translated prose reordered around it. If the model returned fewer
/// placeholders than codes were recorded, the trailing codes are dropped
/// silently; that is an accepted lossy edge, not an error.
pub fn restore_codes(text: &str, codes: &[ControlCode]) -> String {
    let mut result = text.to_string();
    for control in codes {
        if !result.contains(PLACEHOLDER) {
            break;
        }
        result = result.replacen(PLACEHOLDER, &control.code, 1);
    }
    result
}
