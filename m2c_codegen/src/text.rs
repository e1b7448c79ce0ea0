//! Literal text operations the templates are processed with.
//!
//! Markers and placeholders are matched as plain substrings, never as patterns.

use log::warn;

/// Replaces every occurrence of `from`, scanning left to right past each replacement.
pub fn replace_all(text: &mut String, from: &str, to: &str) {
    if !from.is_empty() && text.contains(from) {
        *text = text.replace(from, to);
    }
}

/// Removes every `open ... close` section, markers included.
///
/// An `open` marker with no matching `close` is removed on its own.
pub fn delete_section(text: &mut String, open: &str, close: &str) {
    if open.is_empty() {
        return;
    }
    let mut from = 0;
    while let Some(start) = text[from..].find(open).map(|pos| pos + from) {
        let body = start + open.len();
        let end = match text[body..].find(close) {
            Some(pos) => body + pos + close.len(),
            None => {
                warn!(target: "codegen", "section '{open}' is never closed by '{close}'");
                body
            }
        };
        text.replace_range(start..end, "");
        from = start;
    }
}

/// Text between the first `open` and the first `close` after it.
pub fn save_section(text: &str, open: &str, close: &str) -> Option<String> {
    let body = text.find(open)? + open.len();
    let end = text[body..].find(close)?;
    Some(text[body..body + end].to_owned())
}

/// Removes the `open` and `close` markers, leaving what they enclose.
pub fn keep_section(text: &mut String, open: &str, close: &str) {
    replace_all(text, open, "");
    replace_all(text, close, "");
}

/// Keeps or deletes every `open ... close` section.
pub fn apply_section(text: &mut String, open: &str, close: &str, keep: bool) {
    if keep {
        keep_section(text, open, close);
    } else {
        delete_section(text, open, close);
    }
}

/// Inserts `added` right after every occurrence of `command`.
pub fn write_after_command(text: &mut String, command: &str, added: &str) {
    if command.is_empty() || added.is_empty() {
        return;
    }
    let mut from = 0;
    while let Some(pos) = text[from..].find(command) {
        let at = from + pos + command.len();
        text.insert_str(at, added);
        from = at + added.len();
    }
}

/// Removes every occurrence of `command`.
pub fn delete_command(text: &mut String, command: &str) {
    replace_all(text, command, "");
}
