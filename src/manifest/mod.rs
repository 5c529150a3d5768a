//! Version propagation across manifests
//!
//! Each configured manifest is read, rewritten in memory for its format, and
//! written back before the next one is touched. There is no rollback: when a
//! manifest fails, the ones before it stay rewritten.
//!
//! - **header**: preprocessor macro lines, line-granular
//! - **json**: package description, parse/modify/serialize
//! - **properties**: `key=value` lines, exactly one version entry
//! - **toml**: lossless edit of a dotted key path

pub mod header;
pub mod json;
pub mod properties;
pub mod toml;

use crate::core::config::{ManifestConfig, ManifestFormat};
use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::version::VersionTriple;
use similar::TextDiff;
use std::fs;
use std::path::{Path, PathBuf};

/// A manifest's content before and after the version rewrite
#[derive(Debug, Clone)]
pub struct ManifestRewrite {
  pub path: PathBuf,
  pub format: ManifestFormat,
  pub before: String,
  pub after: String,
}

impl ManifestRewrite {
  pub fn is_changed(&self) -> bool {
    self.before != self.after
  }

  /// Write the new content when it differs
  pub fn write(&self) -> ReleaseResult<()> {
    if !self.is_changed() {
      tracing::debug!(path = %self.path.display(), "manifest already up to date");
      return Ok(());
    }
    fs::write(&self.path, &self.after).with_context(|| format!("Failed to write {}", self.path.display()))?;
    tracing::info!(path = %self.path.display(), format = self.format.as_str(), "manifest rewritten");
    Ok(())
  }

  /// Unified diff of the rewrite, labelled with `label`
  pub fn diff(&self, label: &str) -> String {
    TextDiff::from_lines(&self.before, &self.after)
      .unified_diff()
      .context_radius(1)
      .header(&format!("a/{}", label), &format!("b/{}", label))
      .to_string()
  }
}

/// Compute the rewrite of one manifest without writing it
pub fn plan_rewrite(manifest: &ManifestConfig, path: &Path, version: &VersionTriple) -> ReleaseResult<ManifestRewrite> {
  if !path.is_file() {
    return Err(ReleaseError::missing(path, "manifest"));
  }
  let before = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  let after = match manifest.format {
    ManifestFormat::Header => header::rewrite(&before, &manifest.header_markers(), version, path)?,
    ManifestFormat::Json => json::rewrite(&before, &version.full, path)?,
    ManifestFormat::Properties => properties::rewrite(&before, &version.full),
    ManifestFormat::Toml => toml::rewrite(&before, manifest.toml_key(), &version.full, path)?,
  };

  Ok(ManifestRewrite {
    path: path.to_path_buf(),
    format: manifest.format,
    before,
    after,
  })
}

/// Read the version a manifest currently carries
pub fn read_version(manifest: &ManifestConfig, path: &Path) -> ReleaseResult<Option<String>> {
  if !path.is_file() {
    return Err(ReleaseError::missing(path, "manifest"));
  }
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  Ok(match manifest.format {
    ManifestFormat::Header => header::read_version(&content, &manifest.header_markers()),
    ManifestFormat::Json => json::read_version(&content),
    ManifestFormat::Properties => properties::read_version(&content),
    ManifestFormat::Toml => toml::read_version(&content, manifest.toml_key()),
  })
}

/// Rewrite every configured manifest in order
pub fn update_versions(ctx: &ProjectContext, version: &VersionTriple) -> ReleaseResult<Vec<ManifestRewrite>> {
  let mut rewrites = Vec::with_capacity(ctx.config.manifests.len());
  for manifest in &ctx.config.manifests {
    let rewrite = plan_rewrite(manifest, &ctx.path(&manifest.path), version)?;
    rewrite.write()?;
    rewrites.push(rewrite);
  }
  Ok(rewrites)
}

/// Compute every rewrite without touching the files
pub fn preview_versions(ctx: &ProjectContext, version: &VersionTriple) -> ReleaseResult<Vec<ManifestRewrite>> {
  ctx
    .config
    .manifests
    .iter()
    .map(|manifest| plan_rewrite(manifest, &ctx.path(&manifest.path), version))
    .collect()
}
