use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseError, ReleaseResult};
use std::path::Path;

/// Run the init command
///
/// Runs without a project context so that a broken release.toml can be
/// replaced with `--force`.
pub fn run_init(root: &Path, force: bool) -> ReleaseResult<()> {
  if let Some(existing) = ReleaseConfig::find_config_path(root)
    && !force
  {
    return Err(ReleaseError::with_help(
      format!("Configuration already exists: {}", existing.display()),
      "Pass --force to overwrite it with the defaults.",
    ));
  }

  let config = ReleaseConfig::default();
  let path = config.save(root)?;
  tracing::info!(path = %path.display(), "wrote default configuration");

  println!("✅ Created {}", path.display());
  println!();
  println!("Review the manifest list and the mirror root before the first release:");
  for manifest in &config.manifests {
    println!("   - {} ({})", manifest.path.display(), manifest.format.as_str());
  }
  println!("   mirror: {}", config.mirror.root.display());
  Ok(())
}
