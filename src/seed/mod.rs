//! Seed the content store with the initial documents

use anyhow::{Context, Result};
use subtle::ConstantTimeEq;

use crate::cms::ContentStore;
use crate::config::SiteConfig;
use crate::content::fallback::{initial_profile, initial_projects, initial_skills};

/// Which documents to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSet {
    Projects,
    ProfileAndSkills,
}

/// Write the initial project documents; returns the new ids
pub async fn seed_projects(store: &dyn ContentStore) -> Result<Vec<String>> {
    tracing::info!("Seeding projects...");
    let mut ids = Vec::new();
    for project in initial_projects() {
        let title = project["title"].as_str().unwrap_or_default().to_string();
        let id = store
            .create(project)
            .await
            .with_context(|| format!("Failed to create project {:?}", title))?;
        tracing::debug!("Created project {:?} as {}", title, id);
        ids.push(id);
    }
    Ok(ids)
}

/// Write the initial profile and skill documents; returns the new ids
pub async fn seed_profile_and_skills(
    store: &dyn ContentStore,
    config: &SiteConfig,
) -> Result<Vec<String>> {
    tracing::info!("Seeding profile and skills...");
    let mut ids = vec![store
        .create(initial_profile(config))
        .await
        .context("Failed to create profile")?];

    for skill in initial_skills() {
        let name = skill["name"].as_str().unwrap_or_default().to_string();
        let id = store
            .create(skill)
            .await
            .with_context(|| format!("Failed to create skill {:?}", name))?;
        ids.push(id);
    }
    Ok(ids)
}

/// Run one seed set
pub async fn run(store: &dyn ContentStore, config: &SiteConfig, set: SeedSet) -> Result<Vec<String>> {
    match set {
        SeedSet::Projects => seed_projects(store).await,
        SeedSet::ProfileAndSkills => seed_profile_and_skills(store, config).await,
    }
}

/// Constant-time comparison of an `Authorization` header against the seed token
pub fn authorized(header: Option<&str>, seed_token: Option<&str>) -> bool {
    let (Some(header), Some(token)) = (header, seed_token) else {
        return false;
    };
    let Some(presented) = header.strip_prefix("Bearer ") else {
        return false;
    };
    if token.is_empty() {
        return false;
    }
    bool::from(presented.as_bytes().ct_eq(token.as_bytes()))
}
