//! Card attribute decoding and payload records.
//!
//! A card carries its kind in `name` and its data in `value`:
//! `"data:"` followed by the percent-encoded UTF-8 JSON record.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize};

use crate::dom::{Dom, NodeId};

/// Literal prefix of every card `value` attribute.
pub const VALUE_PREFIX: &str = "data:";

/// Characters the editor percent-encodes (everything `encodeURIComponent` does).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Card kinds this plugin renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    CodeBlock,
    Image,
    /// Any other kind, including ones the editor adds later.
    Unknown,
}

impl CardKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "codeblock" => CardKind::CodeBlock,
            "image" => CardKind::Image,
            _ => CardKind::Unknown,
        }
    }

    /// The `name` attribute value for this kind.
    pub fn name(self) -> Option<&'static str> {
        match self {
            CardKind::CodeBlock => Some("codeblock"),
            CardKind::Image => Some("image"),
            CardKind::Unknown => None,
        }
    }
}

/// Card attributes after prefix stripping and percent decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCard {
    pub kind: CardKind,
    pub payload: String,
}

/// `name: "codeblock"` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockPayload {
    /// Language tag; may be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mode: String,
    pub code: String,
}

/// `name: "image"` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub src: String,
    /// Caption, used as alt text.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read and decode the card attributes of `node`.
///
/// Returns `None` when the node is not a well-formed card: a missing or
/// empty `name` or `value`, a `value` without the `data:` prefix, or a
/// broken percent encoding.
pub fn decode_card(dom: &Dom, node: NodeId) -> Option<DecodedCard> {
    let Some(name) = dom.attr(node, "name").filter(|n| !n.is_empty()) else {
        tracing::trace!("Card without name");
        return None;
    };
    let Some(value) = dom.attr(node, "value").filter(|v| !v.is_empty()) else {
        tracing::trace!(card = name, "Card without value");
        return None;
    };
    let Some(payload) = decode_value(value) else {
        tracing::trace!(card = name, "Card value is not encoded card data");
        return None;
    };

    Some(DecodedCard {
        kind: CardKind::from_name(name),
        payload,
    })
}

/// Strip the `data:` prefix and percent-decode the rest.
///
/// A `%` not followed by two hex digits, or bytes that do not decode to
/// UTF-8, make the whole value invalid.
pub fn decode_value(value: &str) -> Option<String> {
    let encoded = value.strip_prefix(VALUE_PREFIX)?;
    if !has_valid_escapes(encoded) {
        return None;
    }
    percent_decode_str(encoded)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

fn has_valid_escapes(encoded: &str) -> bool {
    let bytes = encoded.as_bytes();
    memchr::memchr_iter(b'%', bytes).all(|i| {
        bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    })
}

/// Encode a payload record as a card `value` attribute.
///
/// Produces what the editor writes: the `data:` prefix and the JSON
/// record encoded like `encodeURIComponent`.
pub fn encode_value(payload: &impl Serialize) -> serde_json::Result<String> {
    let json = serde_json::to_string(payload)?;
    Ok(format!(
        "{VALUE_PREFIX}{}",
        utf8_percent_encode(&json, COMPONENT)
    ))
}
