//! Model provisioning
//!
//! Classifier model files ship in an asset directory and are copied into
//! a cache directory on first run. Missing artifacts are a startup
//! failure, never a runtime concern of the dialog.

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Guarantees required model artifacts are present
pub trait ModelProvisioning: Send + Sync {
    fn ensure_ready(&self, files: &[String]) -> Result<()>;
}

/// Copies model assets into a local cache directory
#[derive(Debug, Clone)]
pub struct ModelCache {
    asset_dir: PathBuf,
    cache_dir: PathBuf,
}

impl ModelCache {
    pub fn new(config: &Config) -> Self {
        Self::with_dirs(&config.model_dir, &config.model_cache_dir)
    }

    pub fn with_dirs(asset_dir: impl AsRef<Path>, cache_dir: impl AsRef<Path>) -> Self {
        Self {
            asset_dir: asset_dir.as_ref().to_path_buf(),
            cache_dir: cache_dir.as_ref().to_path_buf(),
        }
    }

    /// Path a model file is served from
    pub fn cached_path(&self, file: &str) -> PathBuf {
        self.cache_dir.join(file)
    }

    pub fn is_cached(&self, files: &[String]) -> bool {
        files.iter().all(|f| self.cached_path(f).exists())
    }

    fn cache_asset(&self, file: &str) -> Result<()> {
        let source = self.asset_dir.join(file);
        let target = self.cached_path(file);
        std::fs::copy(&source, &target)
            .with_context(|| format!("Failed to cache model asset {}", source.display()))?;
        info!("📦 Cached model asset: {}", target.display());
        Ok(())
    }
}

impl ModelProvisioning for ModelCache {
    fn ensure_ready(&self, files: &[String]) -> Result<()> {
        if self.is_cached(files) {
            return Ok(());
        }
        std::fs::create_dir_all(&self.cache_dir)?;
        for file in files {
            if !self.cached_path(file).exists() {
                self.cache_asset(file)?;
            }
        }
        Ok(())
    }
}
