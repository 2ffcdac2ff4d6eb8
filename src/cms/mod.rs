//! Content store access
//!
//! The store is an external headless CMS. Everything the site needs from it
//! goes through [`ContentStore`]: a read keyed by document kind and a
//! create. [`CmsClient`] talks to the real HTTP API, [`MemoryStore`] keeps
//! documents in process and [`DisconnectedStore`] stands in when nothing is
//! configured.

mod client;
mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use client::CmsClient;
pub use memory::MemoryStore;

use crate::content::DocumentKind;

/// Failure talking to the content store
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("content store is not configured")]
    NotConfigured,

    #[error("content store request failed: {0}")]
    Request(String),

    #[error("content store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected content store response: {0}")]
    Decode(String),
}

/// Read/create access to the content store
#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    /// Fetch all documents of `kind` (for `profile`, the first one or `null`)
    async fn fetch(&self, kind: DocumentKind) -> Result<Value, CmsError>;

    /// Persist a new document and return its identifier
    async fn create(&self, document: Value) -> Result<String, CmsError>;
}

/// Stand-in used when no store is configured; every call fails
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedStore;

#[async_trait]
impl ContentStore for DisconnectedStore {
    async fn fetch(&self, _kind: DocumentKind) -> Result<Value, CmsError> {
        Err(CmsError::NotConfigured)
    }

    async fn create(&self, _document: Value) -> Result<String, CmsError> {
        Err(CmsError::NotConfigured)
    }
}

/// Query and field projection for a document kind
pub fn query_for(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Project => {
            r#"*[_type == "project"] | order(order asc){_id, title, description, github, isPrivateRepo, demo, tags, order, "imageUrl": image.asset->url}"#
        }
        DocumentKind::Skill => {
            r#"*[_type == "skill"] | order(featured desc, coalesce(order, 999999) asc, name asc){_id, name, subtitle, level, category, order, featured, proficiencyPercentage, yearsOfExperience, color, "imageUrl": image.asset->url}"#
        }
        DocumentKind::Profile => {
            r#"*[_type == "profile"][0]{_id, name, shortBio, about, email, github, linkedin}"#
        }
        DocumentKind::Contact => {
            r#"*[_type == "contact"] | order(receivedAt desc){_id, name, email, message, receivedAt}"#
        }
    }
}
