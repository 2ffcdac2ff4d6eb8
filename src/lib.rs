//! folio: a portfolio site backed by a headless CMS
//!
//! This crate serves (or generates) a single-page portfolio whose
//! projects, skills and profile text are authored in an external content
//! store, and accepts contact-form submissions into the same store.

pub mod cms;
pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod seed;
pub mod server;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::cms::{CmsClient, CmsError, ContentStore, DisconnectedStore};

/// The main application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Static assets directory
    pub static_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an already-built configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            public_dir,
            static_dir,
        }
    }

    /// Content store for this site; a disconnected one when nothing is configured
    pub fn store(&self) -> Result<Arc<dyn ContentStore>> {
        match CmsClient::new(&self.config.cms) {
            Ok(client) => Ok(Arc::new(client)),
            Err(CmsError::NotConfigured) => {
                tracing::warn!("No content store configured; serving fallback content");
                Ok(Arc::new(DisconnectedStore))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
