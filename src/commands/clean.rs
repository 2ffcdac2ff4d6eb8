//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove the generated public directory
pub fn run(folio: &Folio) -> Result<()> {
    if folio.public_dir.exists() {
        fs::remove_dir_all(&folio.public_dir)?;
        tracing::info!("Deleted: {:?}", folio.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", folio.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_clean_removes_public_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let folio = Folio::with_config(tmp.path(), SiteConfig::default());
        fs::create_dir_all(folio.public_dir.join("css")).unwrap();
        fs::write(folio.public_dir.join("index.html"), "x").unwrap();

        run(&folio).unwrap();
        assert!(!folio.public_dir.exists());

        // second run is a no-op
        run(&folio).unwrap();
    }
}
