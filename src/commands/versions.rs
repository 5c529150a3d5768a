use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::manifest::{self, ManifestRewrite};
use crate::version::VersionTriple;

/// Run the update-versions command
pub fn run_update_versions(ctx: &ProjectContext, dry_run: bool) -> ReleaseResult<()> {
  let version = VersionTriple::read(&ctx.path(&ctx.config.library.version_file))?;
  if version.as_semver().is_none() {
    tracing::warn!(version = %version, "version of record is not valid semver");
  }
  println!("📦 Version of record: {}", version);

  if dry_run {
    let rewrites = manifest::preview_versions(ctx, &version)?;
    println!("🔍 Dry run, no files written\n");
    for rewrite in &rewrites {
      let label = ctx.display(&rewrite.path);
      if rewrite.is_changed() {
        print!("{}", rewrite.diff(&label));
      } else {
        println!("   ✓ {} already at {}", label, version);
      }
    }
    println!("\n{} of {} manifest(s) would change", changed(&rewrites), rewrites.len());
    return Ok(());
  }

  let rewrites = manifest::update_versions(ctx, &version)?;
  for rewrite in &rewrites {
    let icon = if rewrite.is_changed() { "✅" } else { "✓ " };
    println!("   {} {} ({})", icon, ctx.display(&rewrite.path), rewrite.format.as_str());
  }
  println!("\n{} of {} manifest(s) updated to {}", changed(&rewrites), rewrites.len(), version);
  Ok(())
}

fn changed(rewrites: &[ManifestRewrite]) -> usize {
  rewrites.iter().filter(|r| r.is_changed()).count()
}
