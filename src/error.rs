//! Error types for cardmark operations.
//!
//! Only converter setup and I/O can fail. Rendering never errors: a node a
//! renderer cannot handle is deferred with [`RenderStatus::TryNext`].
//!
//! [`RenderStatus::TryNext`]: crate::converter::RenderStatus::TryNext

use thiserror::Error;

/// Errors that can occur while building a converter or reading input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plugin registered twice: {0}")]
    DuplicatePlugin(String),

    #[error("Plugin {plugin} failed to initialize: {reason}")]
    PluginInit { plugin: String, reason: String },

    #[error("Invalid domain {domain:?}: {source}")]
    InvalidDomain {
        domain: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
