//! Session titles.

use tewuwuq_types::message::ChatMessageFile;
use tewuwuq_types::time::{format_minute, is_minute_stamp};

pub const NEW_SESSION_TITLE: &str = "New Chat";
const FALLBACK_TITLE: &str = "Chat";
const ELLIPSIS: &str = "...";

/// Title given to a freshly created, still empty session
pub fn placeholder_title(now: i64) -> String {
    format!("{} {}", NEW_SESSION_TITLE, format_minute(now))
}

/// Whether `title` is a bare or dated placeholder, not user text.
pub fn is_placeholder_title(title: &str) -> bool {
    match title.strip_prefix(NEW_SESSION_TITLE) {
        Some("") => true,
        Some(rest) => rest.strip_prefix(' ').is_some_and(is_minute_stamp),
        None => false,
    }
}

fn fallback_title(now: i64) -> String {
    format!("{} {}", FALLBACK_TITLE, format_minute(now))
}

/// Cut to `max_chars` characters, appending an ellipsis when anything was
/// dropped. Counts chars, not bytes: Ethiopic syllables are 3 bytes each.
pub fn truncate_title(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), ELLIPSIS),
        None => text.to_string(),
    }
}

/// Title for a session whose first message is `text` (and maybe `file`).
pub fn derive_title(
    text: &str,
    file: Option<&ChatMessageFile>,
    max_chars: usize,
    now: i64,
) -> String {
    let text = text.trim();
    let candidate = if text.is_empty() {
        file.map(|f| f.name.trim()).unwrap_or("")
    } else {
        text
    };

    if candidate.is_empty() || is_placeholder_title(candidate) {
        return fallback_title(now);
    }
    truncate_title(candidate, max_chars)
}
