//! Reserved sentinel markers.
//!
//! Renderers that emit opaque payloads (code blocks) write [`CODE_BLOCK_NEWLINE`]
//! instead of `'\n'`. The finalization pass of the converter cleans up lines
//! first and calls [`resolve`] last, so protected newlines come back exactly
//! as written.
//!
//! Markers are private-use code points. [`strip_reserved`] runs on every text
//! and attribute value the parser produces, after character references are
//! decoded, and renderers run it on payloads they decode themselves (card
//! records). A marker in the output was therefore written by a renderer and
//! never came from the document.

use std::borrow::Cow;

/// Stands in for a literal newline inside a code block.
pub const CODE_BLOCK_NEWLINE: char = '\u{E001}';

/// Every marker reserved by the converter.
pub const RESERVED: &[char] = &[CODE_BLOCK_NEWLINE];

// All markers encode to three bytes starting with 0xEE.
const MARKER_LEAD_BYTE: u8 = 0xEE;

fn might_contain_marker(text: &str) -> bool {
    memchr::memchr(MARKER_LEAD_BYTE, text.as_bytes()).is_some()
}

/// Remove reserved markers from untrusted text.
pub fn strip_reserved(text: &str) -> Cow<'_, str> {
    if !might_contain_marker(text) || !text.contains(RESERVED) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|c| !RESERVED.contains(c)).collect())
}

/// Replace every marker with the text it stands for.
pub fn resolve(text: &str) -> String {
    if !might_contain_marker(text) {
        return text.to_string();
    }
    text.replace(CODE_BLOCK_NEWLINE, "\n")
}
