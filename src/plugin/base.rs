//! Structural defaults: block elements, dropped elements, text and breaks.

use crate::converter::{Context, Priority, Registry, RenderStatus, TEXT_NODE, TagType, Writer};
use crate::dom::NodeId;
use crate::error::Result;
use crate::markdown::escape_markdown;

use super::Plugin;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

const REMOVE_TAGS: &[&str] = &[
    "button", "head", "iframe", "input", "noscript", "script", "select", "style",
    "template", "textarea",
];

/// Block separation, whitespace handling and text escaping.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasePlugin;

impl BasePlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for BasePlugin {
    fn name(&self) -> &str {
        "base"
    }

    fn init(&self, registry: &mut Registry) -> Result<()> {
        for tag in BLOCK_TAGS {
            registry.set_tag_type(tag, TagType::Block);
        }
        for tag in REMOVE_TAGS {
            registry.set_tag_type(tag, TagType::Remove);
        }
        registry.renderer_for(TEXT_NODE, TagType::Inline, render_text, Priority::LATE);
        registry.renderer_for("br", TagType::Inline, render_break, Priority::LATE);
        Ok(())
    }
}

fn render_text(ctx: &Context<'_>, w: &mut Writer, node: NodeId) -> RenderStatus {
    let Some(text) = ctx.dom().text(node) else {
        return RenderStatus::TryNext;
    };

    let collapsed = collapse_whitespace(text);
    let collapsed = if w.at_line_start() {
        collapsed.trim_start()
    } else {
        collapsed.as_str()
    };
    w.write_str(&escape_markdown(collapsed));
    RenderStatus::Success
}

fn render_break(_ctx: &Context<'_>, w: &mut Writer, _node: NodeId) -> RenderStatus {
    if !w.at_line_start() {
        w.write_str("\\\n");
    }
    RenderStatus::Success
}

/// Collapse each run of HTML whitespace into one space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C') {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
