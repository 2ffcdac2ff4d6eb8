//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Rich text
    /// Prefix for internal links resolved from a document slug
    pub link_base: String,

    // Content store
    #[serde(default)]
    pub cms: CmsConfig,

    /// Bearer token guarding the seeding endpoints (disabled when unset)
    pub seed_token: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            link_base: "/".to_string(),

            cms: CmsConfig::default(),
            seed_token: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(project_id) = get("FOLIO_CMS_PROJECT_ID") {
            self.cms.project_id = project_id;
        }
        if let Some(dataset) = get("FOLIO_CMS_DATASET") {
            self.cms.dataset = dataset;
        }
        if let Some(token) = get("FOLIO_CMS_TOKEN") {
            self.cms.token = Some(token);
        }
        if let Some(token) = get("FOLIO_SEED_TOKEN") {
            self.seed_token = Some(token);
        }
        tracing::debug!("Applied environment overrides");
    }
}

/// Headless content store connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Read through the CDN host; writes always go to the API host
    pub use_cdn: bool,
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2023-05-03".to_string(),
            use_cdn: false,
            token: None,
            timeout: 15,
        }
    }
}

impl CmsConfig {
    /// Whether enough is configured to reach the store
    pub fn is_configured(&self) -> bool {
        !self.project_id.trim().is_empty() && !self.dataset.trim().is_empty()
    }
}
