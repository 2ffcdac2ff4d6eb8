//! Seed the content store from the command line

use anyhow::{bail, Result};

use crate::seed::{self, SeedSet};
use crate::Folio;

/// Parse a seed set name
pub fn parse_set(name: &str) -> Result<SeedSet> {
    match name {
        "projects" | "project" => Ok(SeedSet::Projects),
        "profile-skills" | "profile" | "skills" => Ok(SeedSet::ProfileAndSkills),
        other => bail!("Unknown seed set: {}. Available: projects, profile-skills", other),
    }
}

/// Write one seed set to the configured store
pub async fn run(folio: &Folio, set: &str) -> Result<()> {
    let set = parse_set(set)?;
    if !folio.config.cms.is_configured() {
        bail!("No content store configured; set cms.project_id in _config.yml");
    }

    let store = folio.store()?;
    let ids = seed::run(store.as_ref(), &folio.config, set).await?;
    println!("Created {} documents", ids.len());
    Ok(())
}
