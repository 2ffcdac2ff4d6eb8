//! Generate static files

use anyhow::Result;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

/// Fetch the content once and write the page into the public directory
pub async fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let store = folio.store()?;
    let content = ContentLoader::new(store, &folio.config).load_all().await;
    tracing::info!(
        "Loaded {} projects and {} skills",
        content.projects.len(),
        content.skills.len()
    );

    Generator::new(&folio.config).generate(&content, &folio.public_dir, &folio.static_dir)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[tokio::test]
    async fn test_generate_without_store_uses_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.author = "Offline Author".to_string();
        let folio = Folio::with_config(tmp.path(), config);

        run(&folio).await.unwrap();

        let html = std::fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(html.contains("Offline Author"));
        assert!(html.contains("id=\"projects\""));
    }
}
