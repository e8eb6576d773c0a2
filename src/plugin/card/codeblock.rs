//! Code block cards → fenced code blocks.

use std::borrow::Cow;

use crate::converter::{RenderStatus, Writer};
use crate::markdown::calculate_fence_length;
use crate::marker::{CODE_BLOCK_NEWLINE, strip_reserved};

use super::payload::CodeBlockPayload;

const FENCE_CHAR: char = '`';

/// Render a decoded `codeblock` payload, deferring if it is not a valid record.
pub fn render(w: &mut Writer, payload: &str) -> RenderStatus {
    let data: CodeBlockPayload = match serde_json::from_str(payload) {
        Ok(data) => data,
        Err(e) => {
            tracing::trace!(error = %e, "Invalid code block payload");
            return RenderStatus::TryNext;
        }
    };

    write_code_block(w, &data.mode, &data.code);
    RenderStatus::Success
}

/// Write `code` as a fenced block tagged with `mode`.
///
/// Newlines inside the block are written as [`CODE_BLOCK_NEWLINE`] markers
/// and only become real newlines when the converter resolves markers.
/// Markers already present in `code` or `mode` are removed first.
pub fn write_code_block(w: &mut Writer, mode: &str, code: &str) {
    let code = strip_reserved(code);
    let code = normalize_newlines(&code);
    let code = code.strip_suffix('\n').unwrap_or(&code);

    let fence = FENCE_CHAR
        .to_string()
        .repeat(calculate_fence_length(code, FENCE_CHAR));

    let mut buf = [0u8; 4];
    let newline = CODE_BLOCK_NEWLINE.encode_utf8(&mut buf);
    let protected = code.replace('\n', newline);

    w.write_str("\n\n");
    w.write_str(&fence);
    w.write_str(&info_string(mode));
    w.write_char('\n');
    w.write_str(&protected);
    // Protected as well, so trailing spaces on the last line survive cleanup.
    w.write_char(CODE_BLOCK_NEWLINE);
    w.write_str(&fence);
    w.write_str("\n\n");
}

fn normalize_newlines(code: &str) -> Cow<'_, str> {
    if code.contains('\r') {
        Cow::Owned(code.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(code)
    }
}

/// Language tag for the opening fence.
///
/// Written as given. A backtick or line break would stop the opening line
/// from being a fence, so such tags are dropped.
fn info_string(mode: &str) -> Cow<'_, str> {
    if mode.contains([FENCE_CHAR, '\n', '\r']) {
        tracing::trace!(mode, "Dropping unusable code block language");
        return Cow::Borrowed("");
    }
    strip_reserved(mode)
}
