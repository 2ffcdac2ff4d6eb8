//! Content module - typed documents, rich text and loading

mod document;
pub mod fallback;
pub mod loader;
mod portable;
mod rich_text;

pub use document::{
    ContactMessage, DocumentKind, Profile, Project, Skill, SkillCategory, SkillLevel,
};
pub use loader::{ContentLoader, SiteContent};
pub use portable::{parse_body, Block, BlockStyle, BodyItem, ListKind, MarkDef, Span};
pub use rich_text::{to_html, to_plain_text, Node, RichTextRenderer, PLAIN_GAP};
