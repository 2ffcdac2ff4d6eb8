//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default `_config.yml`
const CONFIG_TEMPLATE: &str = r#"# Portfolio configuration

# Site
title: Portfolio
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
public_dir: public
static_dir: static

# Prefix for links to other documents inside rich text
link_base: /

# Content store
# Secrets may also come from FOLIO_CMS_PROJECT_ID, FOLIO_CMS_DATASET,
# FOLIO_CMS_TOKEN and FOLIO_SEED_TOKEN.
cms:
  project_id: ''
  dataset: production
  api_version: '2023-05-03'
  use_cdn: false
  timeout: 15

# Bearer token for /api/seed-* (seeding is disabled while unset)
# seed_token: change-me
"#;

/// Minimal stylesheet for the generated page
const STYLE_TEMPLATE: &str = r#"body { font-family: system-ui, sans-serif; margin: 0; line-height: 1.6; }
main { max-width: 960px; margin: 0 auto; padding: 0 1rem; }
.site-header { display: flex; justify-content: space-between; align-items: center; padding: 1rem; }
.site-header ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
section { padding: 3rem 0; }
.project-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1.5rem; }
.project img { max-width: 100%; }
.tags { display: flex; flex-wrap: wrap; gap: .5rem; list-style: none; padding: 0; }
.skill { display: flex; flex-wrap: wrap; gap: .5rem; align-items: center; }
.skill img { width: 24px; height: 24px; }
.skill-badge { color: goldenrod; }
.rich-text-gap { display: inline-block; width: 0; }
#contact-form { display: grid; gap: .5rem; max-width: 480px; }
.contact-status.success { color: green; }
.contact-status.error { color: crimson; }
.site-footer { text-align: center; padding: 2rem 0; }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("static/css"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    let style_path = target_dir.join("static/css/style.css");
    if !style_path.exists() {
        fs::write(&style_path, STYLE_TEMPLATE)?;
    }

    Ok(())
}
