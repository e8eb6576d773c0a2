//! Parsed HTML document tree.
//!
//! [`parse_html`] runs html5ever over the input and builds an arena
//! [`Dom`]. Unknown elements such as the editor's `<card>` tags are kept as
//! ordinary elements with their attributes.

mod arena;
mod tree_sink;

pub use arena::{Attribute, Children, Dom, Node, NodeData, NodeId};
pub use tree_sink::DomSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML document or fragment.
///
/// Never fails: malformed markup is repaired the way a browser would.
pub fn parse_html(html: &str) -> Dom {
    parse_document(DomSink::new(), ParseOpts::default())
        .one(html)
        .into_dom()
}
