//! Plugins register renderers with a converter's [`Registry`].
//!
//! - [`BasePlugin`]: document structure, text and elements to drop
//! - [`CardPlugin`]: the rich-text editor's embedded `<card>` elements

mod base;
pub mod card;

pub use base::BasePlugin;
pub use card::CardPlugin;

use crate::converter::Registry;
use crate::error::Result;

/// A set of renderers installed into a converter at build time.
pub trait Plugin: Send + Sync {
    /// Unique plugin name.
    fn name(&self) -> &str;

    /// Register renderers and tag types.
    fn init(&self, registry: &mut Registry) -> Result<()>;
}
