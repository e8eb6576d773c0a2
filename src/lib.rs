//! # cardmark
//!
//! HTML → Markdown conversion with a pluggable renderer registry, including
//! a renderer for the embedded `<card>` elements found in the HTML export of
//! the Yuque rich-text editor.
//!
//! ## Features
//!
//! - Parses HTML with html5ever into an arena tree
//! - Renders through tag-specific renderers installed by plugins, tried in
//!   priority order until one succeeds
//! - Decodes code block cards into fenced code blocks whose fence can never
//!   be closed early by the code inside
//! - Decodes image cards into inline images with escaped alt text
//! - Never fails on malformed cards: they are skipped, not reported
//!
//! ## Quick Start
//!
//! ```
//! let html = concat!(
//!     r#"<card type="inline" name="codeblock" "#,
//!     r#"value="data:%7B%22mode%22%3A%22sh%22%2C%22code%22%3A%22ls%20-la%22%7D"></card>"#,
//! );
//!
//! let markdown = cardmark::convert_string(html).unwrap();
//! assert_eq!(markdown, "```sh\nls -la\n```");
//! ```
//!
//! ## Custom Converters
//!
//! ```
//! use cardmark::{Converter, UrlKind};
//!
//! let converter = Converter::builder()
//!     .with_default_plugins()
//!     .url_resolver(|_kind: UrlKind, raw: &str| format!("https://cdn.example.com/{raw}"))
//!     .build()
//!     .unwrap();
//!
//! let html = r#"<card name="image" value="data:%7B%22src%22%3A%22a.png%22%2C%22title%22%3A%22A%22%7D"></card>"#;
//! assert_eq!(converter.convert_string(html), "![A](https://cdn.example.com/a.png)");
//! ```

pub mod converter;
pub mod dom;
mod error;
pub mod markdown;
pub mod marker;
pub mod plugin;
pub(crate) mod util;

pub use converter::{
    Context, Converter, ConverterBuilder, DomainResolver, Priority, Registry, RenderStatus,
    Renderer, TagType, UrlKind, UrlResolver, Writer,
};
pub use error::{Error, Result};
pub use plugin::{BasePlugin, CardPlugin, Plugin};

/// Convert HTML to Markdown with the default plugins and no base domain.
pub fn convert_string(html: &str) -> Result<String> {
    let converter = Converter::builder().with_default_plugins().build()?;
    Ok(converter.convert_string(html))
}
