//! Helper functions for page generation
//!
//! Small string builders shared by the rich-text renderer and the
//! page generator: URL joining, escaping and anchor attributes.

mod html;
mod url;

pub use html::*;
pub use url::*;
