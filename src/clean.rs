//! Record cleaning
//!
//! Every record goes through one cleaning pass before accumulation:
//! - all `<...>` tag substrings are stripped from the `message` field
//! - the `audiourl` field is removed outright
//!
//! The `audiourl` removal assumes the field is present on every record; a
//! record without it is a fatal error, not a skip.

use crate::error::{CleanError, CleanResult};
use crate::record::Record;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Field holding the spoken/displayed text, cleaned of markup
pub const MESSAGE_FIELD: &str = "message";

/// Field dropped from every record before export
pub const AUDIO_URL_FIELD: &str = "audiourl";

/// Matches a single markup tag, shortest span first
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("Invalid tag regex"));

/// Remove every `<...>` substring from the given text
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Clean a single record in place.
///
/// Precondition: `audiourl` is present. Its removal is unconditional, so a
/// record without it fails the run with `CleanError::MissingField`.
/// `message` is cleaned only when present and textual.
pub fn clean_record(record: &mut Record) -> CleanResult<()> {
    if record.shift_remove(AUDIO_URL_FIELD).is_none() {
        return Err(CleanError::MissingField {
            field: AUDIO_URL_FIELD.to_string(),
        });
    }

    if let Some(Value::String(message)) = record.get(MESSAGE_FIELD) {
        let cleaned = strip_tags(message);
        record.insert(MESSAGE_FIELD.to_string(), Value::String(cleaned));
    }

    Ok(())
}
