//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove the generated site
pub fn run(folio: &Folio) -> Result<()> {
    if folio.public_dir.exists() {
        fs::remove_dir_all(&folio.public_dir)?;
        tracing::info!("Deleted: {:?}", folio.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public/about")).unwrap();
        fs::write(dir.path().join("records.yml"), "posts: []\n").unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        run(&folio).unwrap();
        assert!(!folio.public_dir.exists());
        assert!(folio.records_path.exists());

        // Cleaning twice is fine
        run(&folio).unwrap();
    }
}
