//! Project context - build once, pass everywhere
//!
//! Commands receive a `&ProjectContext` holding the absolute project root and
//! the loaded configuration. Paths in the configuration are relative to the
//! root and are resolved here.

use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseResult, ResultExt};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectContext {
  /// Project root directory (absolute path)
  pub root: PathBuf,

  /// Loaded or default configuration
  pub config: ReleaseConfig,
}

impl ProjectContext {
  /// Build the context for a project root, loading configuration once.
  pub fn build(root: &Path, config_path: Option<&Path>) -> ReleaseResult<Self> {
    let root = std::path::absolute(root).with_context(|| format!("Failed to resolve root {}", root.display()))?;
    let config = ReleaseConfig::load(&root, config_path)?;
    Ok(Self::with_config(root, config))
  }

  /// Build a context around an already constructed configuration.
  pub fn with_config(root: PathBuf, config: ReleaseConfig) -> Self {
    Self { root, config }
  }

  /// Resolve a configured path against the root (absolute paths pass through)
  pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
    self.root.join(rel)
  }

  /// Path for display, relative to the root when possible
  pub fn display(&self, path: &Path) -> String {
    pathdiff::diff_paths(path, &self.root)
      .filter(|p| !p.as_os_str().is_empty())
      .unwrap_or_else(|| path.to_path_buf())
      .display()
      .to_string()
  }
}
