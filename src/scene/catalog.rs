use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{TurnshotError, TurnshotResult};
use crate::scene::{AssetCatalog, AssetId};

/// Filesystem-backed asset catalog.
///
/// Follows the prefab-folder convention: assets live in the immediate
/// subdirectories of the root, or directly in the root when it has no
/// subdirectories. Enumeration order is deterministic (sorted by path).
pub struct DirCatalog {
    root: PathBuf,
    extension: Option<String>,
}

impl DirCatalog {
    /// Create a catalog over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: None,
        }
    }

    /// Only list files with the given extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    fn matches(&self, path: &Path) -> bool {
        match &self.extension {
            Some(ext) => path.extension().and_then(|e| e.to_str()) == Some(ext.as_str()),
            None => true,
        }
    }

    fn collect_files(&self, dir: &Path, out: &mut Vec<AssetId>) -> TurnshotResult<()> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read asset directory '{}'", dir.display()))?;
        for entry in entries {
            let entry = entry
                .with_context(|| format!("failed to read asset directory '{}'", dir.display()))?;
            let path = entry.path();
            if path.is_file() && self.matches(&path) {
                out.push(AssetId::new(path));
            }
        }
        Ok(())
    }
}

impl AssetCatalog for DirCatalog {
    fn enumerate(&self) -> TurnshotResult<Vec<AssetId>> {
        if !self.root.is_dir() {
            return Err(TurnshotError::validation(format!(
                "asset directory '{}' does not exist or is not a directory",
                self.root.display()
            )));
        }

        let entries = std::fs::read_dir(&self.root).with_context(|| {
            format!("failed to read asset directory '{}'", self.root.display())
        })?;
        let mut subdirs = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("failed to read asset directory '{}'", self.root.display())
            })?;
            let path = entry.path();
            if path.is_dir() {
                subdirs.push(path);
            }
        }
        subdirs.sort();

        let mut assets = Vec::new();
        if subdirs.is_empty() {
            self.collect_files(&self.root, &mut assets)?;
        } else {
            for dir in &subdirs {
                self.collect_files(dir, &mut assets)?;
            }
        }
        assets.sort();
        Ok(assets)
    }
}
