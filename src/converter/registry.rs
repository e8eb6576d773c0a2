//! Tag-specific renderer registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dom::NodeId;

use super::context::Context;
use super::writer::Writer;

/// Registry key under which text-node renderers are stored.
pub const TEXT_NODE: &str = "#text";

/// Outcome of a single renderer invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Output for the node (and its subtree) was written.
    Success,
    /// The renderer cannot handle this node; the next one should try.
    TryNext,
}

/// Renderer ordering. Lower values run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u16);

impl Priority {
    pub const EARLY: Priority = Priority(100);
    pub const STANDARD: Priority = Priority(500);
    pub const LATE: Priority = Priority(1000);
}

impl Default for Priority {
    fn default() -> Self {
        Priority::STANDARD
    }
}

/// How the default renderer treats a tag once every registered renderer
/// has deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagType {
    /// Render the children in place.
    #[default]
    Inline,
    /// Render the children separated from the surroundings by blank lines.
    Block,
    /// Drop the element and its subtree.
    Remove,
}

/// Renders one node into the writer, or defers.
pub trait Renderer: Send + Sync {
    fn render(&self, ctx: &Context<'_>, w: &mut Writer, node: NodeId) -> RenderStatus;
}

impl<F> Renderer for F
where
    F: Fn(&Context<'_>, &mut Writer, NodeId) -> RenderStatus + Send + Sync,
{
    fn render(&self, ctx: &Context<'_>, w: &mut Writer, node: NodeId) -> RenderStatus {
        self(ctx, w, node)
    }
}

struct Entry {
    priority: Priority,
    renderer: Arc<dyn Renderer>,
}

/// Renderers and tag types keyed by lowercase tag name.
///
/// Populated by plugins while the converter is built and read-only
/// afterwards, so a built converter can be shared between threads.
#[derive(Default)]
pub struct Registry {
    renderers: HashMap<String, Vec<Entry>>,
    tag_types: HashMap<String, TagType>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for `tag` and set the tag's type.
    ///
    /// Renderers with equal priority run in registration order.
    pub fn renderer_for(
        &mut self,
        tag: &str,
        tag_type: TagType,
        renderer: impl Renderer + 'static,
        priority: Priority,
    ) {
        self.set_tag_type(tag, tag_type);
        let entries = self.renderers.entry(tag.to_ascii_lowercase()).or_default();
        entries.push(Entry {
            priority,
            renderer: Arc::new(renderer),
        });
        entries.sort_by_key(|e| e.priority);
    }

    /// Set how the default renderer treats `tag`.
    pub fn set_tag_type(&mut self, tag: &str, tag_type: TagType) {
        self.tag_types.insert(tag.to_ascii_lowercase(), tag_type);
    }

    /// Type of `tag`; unregistered tags are [`TagType::Inline`].
    pub fn tag_type(&self, tag: &str) -> TagType {
        self.tag_types.get(tag).copied().unwrap_or_default()
    }

    /// Renderers for `tag` in the order they should be tried.
    pub fn renderers(&self, tag: &str) -> impl Iterator<Item = &(dyn Renderer + 'static)> {
        self.renderers
            .get(tag)
            .into_iter()
            .flatten()
            .map(|e| e.renderer.as_ref())
    }

    /// Number of tags with at least one renderer.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    fn write_a(_ctx: &Context<'_>, w: &mut Writer, _node: NodeId) -> RenderStatus {
        w.write_char('a');
        RenderStatus::Success
    }

    fn write_b(_ctx: &Context<'_>, w: &mut Writer, _node: NodeId) -> RenderStatus {
        w.write_char('b');
        RenderStatus::Success
    }

    fn defer(_ctx: &Context<'_>, _w: &mut Writer, _node: NodeId) -> RenderStatus {
        RenderStatus::TryNext
    }

    fn first_success(registry: &Registry, tag: &str) -> String {
        let dom = parse_html("<x></x>");
        let resolver = super::super::DomainResolver::new();
        let ctx = Context::new(&dom, registry, &resolver);
        let mut w = Writer::new();
        for renderer in registry.renderers(tag) {
            if renderer.render(&ctx, &mut w, dom.document()) == RenderStatus::Success {
                break;
            }
        }
        w.into_string()
    }

    #[test]
    fn test_priority_order() {
        let mut registry = Registry::new();
        registry.renderer_for("x", TagType::Inline, write_b, Priority::LATE);
        registry.renderer_for("x", TagType::Inline, write_a, Priority::EARLY);
        assert_eq!(first_success(&registry, "x"), "a");
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let mut registry = Registry::new();
        registry.renderer_for("x", TagType::Inline, write_b, Priority::STANDARD);
        registry.renderer_for("x", TagType::Inline, write_a, Priority::STANDARD);
        assert_eq!(first_success(&registry, "x"), "b");
    }

    #[test]
    fn test_deferring_renderer_falls_through() {
        let mut registry = Registry::new();
        registry.renderer_for("x", TagType::Inline, defer, Priority::EARLY);
        registry.renderer_for("x", TagType::Inline, write_b, Priority::LATE);
        assert_eq!(first_success(&registry, "x"), "b");
    }

    #[test]
    fn test_tag_types() {
        let mut registry = Registry::new();
        registry.set_tag_type("P", TagType::Block);
        assert_eq!(registry.tag_type("p"), TagType::Block);
        assert_eq!(registry.tag_type("span"), TagType::Inline);
        assert!(registry.is_empty());
    }
}
