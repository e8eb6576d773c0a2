//! HTML → Markdown conversion pipeline.
//!
//! A [`Converter`] owns a [`Registry`] of tag-specific [`Renderer`]s filled
//! in by [`Plugin`]s. Converting a document walks the parsed tree; for each
//! element the renderers registered for its tag are tried in [`Priority`]
//! order until one reports [`RenderStatus::Success`]. If all of them defer,
//! the default rendering for the tag's [`TagType`] applies.
//!
//! After the walk a finalization pass trims every line, collapses runs of
//! blank lines and trims the document. Only then are reserved
//! [markers](crate::marker) resolved, so text a renderer protected with a
//! marker comes through that pass unchanged.
//!
//! # Example
//!
//! ```
//! use cardmark::Converter;
//!
//! let converter = Converter::builder()
//!     .with_default_plugins()
//!     .domain("https://example.com")
//!     .build()
//!     .unwrap();
//!
//! let html = r#"<card name="image" value="data:%7B%22src%22%3A%22%2Fa.png%22%7D"></card>"#;
//! assert_eq!(converter.convert_string(html), "![](https://example.com/a.png)");
//! ```

mod context;
mod registry;
mod writer;

pub use context::{Context, DomainResolver, UrlKind, UrlResolver};
pub use registry::{Priority, Registry, RenderStatus, Renderer, TEXT_NODE, TagType};
pub use writer::Writer;

use std::io::Read;

use crate::dom::{Dom, parse_html};
use crate::error::{Error, Result};
use crate::marker;
use crate::plugin::{BasePlugin, CardPlugin, Plugin};
use crate::util::decode_html;

/// Configured HTML → Markdown converter.
///
/// Immutable once built; share it freely between threads.
pub struct Converter {
    registry: Registry,
    resolver: Box<dyn UrlResolver>,
    plugins: Vec<String>,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::default()
    }

    /// Convert an HTML document or fragment.
    pub fn convert_string(&self, html: &str) -> String {
        let dom = parse_html(html);
        self.convert_dom(&dom)
    }

    /// Convert an already parsed document.
    ///
    /// Text and attributes in `dom` must not contain reserved markers;
    /// [`parse_html`] removes them.
    pub fn convert_dom(&self, dom: &Dom) -> String {
        let ctx = Context::new(dom, &self.registry, self.resolver.as_ref());
        let mut w = Writer::new();
        ctx.render_node(&mut w, dom.document());

        let markdown = finalize(w.as_str());
        tracing::debug!(
            nodes = dom.len(),
            raw_bytes = w.len(),
            bytes = markdown.len(),
            "Converted document"
        );
        markdown
    }

    /// Read, decode and convert an HTML document.
    pub fn convert_reader<R: Read>(&self, mut reader: R) -> Result<String> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(self.convert_string(&decode_html(&bytes)))
    }

    /// Names of the installed plugins, in installation order.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }
}

/// Builder for [`Converter`].
#[derive(Default)]
pub struct ConverterBuilder {
    plugins: Vec<Box<dyn Plugin>>,
    domain: Option<String>,
    resolver: Option<Box<dyn UrlResolver>>,
}

impl ConverterBuilder {
    /// Install a plugin. Plugins initialize in installation order.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Install the base structure plugin and the embedded card plugin.
    pub fn with_default_plugins(self) -> Self {
        self.plugin(BasePlugin::new()).plugin(CardPlugin::new())
    }

    /// Base domain for relative URLs, used by the default resolver.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Replace the default URL resolver. Takes precedence over [`domain`](Self::domain).
    pub fn url_resolver(mut self, resolver: impl UrlResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn build(self) -> Result<Converter> {
        let resolver: Box<dyn UrlResolver> = match (self.resolver, self.domain) {
            (Some(resolver), _) => resolver,
            (None, Some(domain)) => Box::new(DomainResolver::with_domain(&domain)?),
            (None, None) => Box::new(DomainResolver::new()),
        };

        let mut registry = Registry::new();
        let mut names: Vec<String> = Vec::with_capacity(self.plugins.len());
        for plugin in &self.plugins {
            let name = plugin.name().to_string();
            if names.contains(&name) {
                return Err(Error::DuplicatePlugin(name));
            }
            plugin.init(&mut registry)?;
            tracing::debug!(plugin = %name, "Registered plugin");
            names.push(name);
        }

        Ok(Converter {
            registry,
            resolver,
            plugins: names,
        })
    }
}

/// Clean up rendered output line by line, then resolve markers.
fn finalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_blank = false;

    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(line);
    }

    marker::resolve(&out)
}
