//! Object key derivation for attachments.

use once_cell::sync::Lazy;
use regex::Regex;

pub const FILES_PREFIX: &str = "files";

static UNSAFE_NAME_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[/\\\x00-\x1f]+|\.{2,}").expect("valid unsafe name regex"));
static LEADING_DOTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.+").expect("valid leading dots regex"));

/// Returns the storage key of the attachment `(uid, name)`.
///
/// The key is `files/{uid}-{name}` with path separators, dot runs and control
/// characters in the name replaced, so a key never leaves the `files/` prefix.
pub fn object_key(uid: &str, name: &str) -> String {
    format!(
        "{FILES_PREFIX}/{}-{}",
        sanitize_segment(uid),
        sanitize_segment(name)
    )
}

fn sanitize_segment(value: &str) -> String {
    let replaced = UNSAFE_NAME_CHARS_RE.replace_all(value.trim(), "_");
    let stripped = LEADING_DOTS_RE.replace(&replaced, "");
    if stripped.is_empty() {
        "_".to_string()
    } else {
        stripped.into_owned()
    }
}
