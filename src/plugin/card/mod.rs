//! Embedded cards from the rich-text editor's HTML export.
//!
//! The editor exports some content as `<card>` elements whose data lives in
//! attributes instead of child nodes:
//!
//! ```html
//! <card type="inline" name="codeblock" value="data:%7B%22mode%22%3A..."></card>
//! ```
//!
//! `name` selects the kind and `value` holds the percent-encoded JSON record
//! (see [`payload`]). Code blocks become fenced code blocks, images become
//! inline images. Anything this plugin does not understand (unknown kinds,
//! missing attributes, broken encodings, malformed records) is deferred
//! to the next renderer, so a bad card never fails a conversion.

pub mod codeblock;
pub mod image;
pub mod payload;

pub use payload::{CardKind, CodeBlockPayload, DecodedCard, ImagePayload, decode_card, encode_value};

use crate::converter::{Context, Priority, Registry, RenderStatus, TagType, Writer};
use crate::dom::NodeId;
use crate::error::Result;

use super::Plugin;

/// Renders `<card>` elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct CardPlugin;

impl CardPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for CardPlugin {
    fn name(&self) -> &str {
        "card"
    }

    fn init(&self, registry: &mut Registry) -> Result<()> {
        registry.renderer_for("card", TagType::Inline, render_card, Priority::STANDARD);
        Ok(())
    }
}

/// Decode a card and hand it to the renderer for its kind.
pub fn render_card(ctx: &Context<'_>, w: &mut Writer, node: NodeId) -> RenderStatus {
    let Some(card) = decode_card(ctx.dom(), node) else {
        return RenderStatus::TryNext;
    };

    match card.kind {
        CardKind::CodeBlock => codeblock::render(w, &card.payload),
        CardKind::Image => image::render(ctx, w, &card.payload),
        CardKind::Unknown => {
            tracing::trace!(card = ctx.dom().attr(node, "name"), "Unknown card kind");
            RenderStatus::TryNext
        }
    }
}
