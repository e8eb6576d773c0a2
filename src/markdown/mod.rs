//! Pure markdown string utilities.
//!
//! - [`escape_markdown`]: escapes document text so it renders literally
//! - [`calculate_fence_length`]: sizes a backtick fence so it cannot be closed
//!   early by the code it wraps
//! - [`escape_brackets`]: makes text safe inside `[...]` of links and images
//!
//! None of these perform I/O; renderers call them and write the results to
//! the conversion [`Writer`](crate::converter::Writer).

mod escape;

pub use escape::{calculate_fence_length, escape_brackets, escape_markdown};
