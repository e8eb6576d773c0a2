//! Per-conversion rendering context and URL resolution.

use url::Url;

use crate::dom::{Dom, NodeData, NodeId};
use crate::error::{Error, Result};

use super::registry::{Registry, RenderStatus, TEXT_NODE, TagType};
use super::writer::Writer;

/// What a URL is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Image,
    Link,
}

/// Turns the URLs found in a document into the URLs written to Markdown.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, kind: UrlKind, raw: &str) -> String;
}

impl<F> UrlResolver for F
where
    F: Fn(UrlKind, &str) -> String + Send + Sync,
{
    fn resolve(&self, kind: UrlKind, raw: &str) -> String {
        self(kind, raw)
    }
}

/// Resolves relative references against an optional base domain.
///
/// Absolute URLs (including `data:` and `mailto:`) and fragment-only
/// references pass through untouched. Without a domain every URL does.
#[derive(Debug, Clone, Default)]
pub struct DomainResolver {
    base: Option<Url>,
}

impl DomainResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver joining relative references onto `domain`.
    ///
    /// A bare host such as `example.com` is treated as `https://example.com`.
    pub fn with_domain(domain: &str) -> Result<Self> {
        let trimmed = domain.trim();
        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };
        let base = Url::parse(&candidate).map_err(|source| Error::InvalidDomain {
            domain: domain.to_string(),
            source,
        })?;
        Ok(Self { base: Some(base) })
    }

    pub fn domain(&self) -> Option<&Url> {
        self.base.as_ref()
    }
}

impl UrlResolver for DomainResolver {
    fn resolve(&self, _kind: UrlKind, raw: &str) -> String {
        let raw = raw.trim();
        let Some(base) = &self.base else {
            return raw.to_string();
        };
        if raw.is_empty() || raw.starts_with('#') || Url::parse(raw).is_ok() {
            return raw.to_string();
        }
        match base.join(raw) {
            Ok(url) => url.to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

/// Read-only view handed to every renderer during one conversion.
pub struct Context<'a> {
    dom: &'a Dom,
    registry: &'a Registry,
    resolver: &'a dyn UrlResolver,
}

impl<'a> Context<'a> {
    pub fn new(dom: &'a Dom, registry: &'a Registry, resolver: &'a dyn UrlResolver) -> Self {
        Self {
            dom,
            registry,
            resolver,
        }
    }

    /// The document being converted.
    pub fn dom(&self) -> &'a Dom {
        self.dom
    }

    /// Render a node through its registered renderers, falling back to the
    /// default rendering for its tag type.
    pub fn render_node(&self, w: &mut Writer, id: NodeId) {
        let Some(node) = self.dom.get(id) else {
            return;
        };

        let tag = match &node.data {
            NodeData::Document => {
                self.render_children(w, id);
                return;
            }
            NodeData::Element { name, .. } => name.local.as_ref(),
            NodeData::Text(_) => TEXT_NODE,
            NodeData::Comment(_) | NodeData::Doctype { .. } => return,
        };

        for renderer in self.registry.renderers(tag) {
            if renderer.render(self, w, id) == RenderStatus::Success {
                return;
            }
        }

        self.render_default(w, id, tag);
    }

    /// Render every child of `id` in document order.
    pub fn render_children(&self, w: &mut Writer, id: NodeId) {
        for child in self.dom.children(id) {
            self.render_node(w, child);
        }
    }

    fn render_default(&self, w: &mut Writer, id: NodeId, tag: &str) {
        if tag == TEXT_NODE {
            if let Some(text) = self.dom.text(id) {
                w.write_str(text);
            }
            return;
        }

        match self.registry.tag_type(tag) {
            TagType::Remove => {}
            TagType::Inline => self.render_children(w, id),
            TagType::Block => {
                w.write_str("\n\n");
                self.render_children(w, id);
                w.write_str("\n\n");
            }
        }
    }

    /// Resolve a URL found in the document through the host's resolver.
    pub fn assemble_absolute_url(&self, kind: UrlKind, raw: &str) -> String {
        self.resolver.resolve(kind, raw)
    }
}
