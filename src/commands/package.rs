use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::package;

/// Run the package command
pub fn run_package(ctx: &ProjectContext, json: bool) -> ReleaseResult<()> {
  if !json {
    println!("📦 Packaging {}", ctx.config.package_name());
  }

  let outcome = package::build_package(ctx)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
  } else {
    println!("   ✅ {} ({} files)", ctx.display(&outcome.archive), outcome.entries);
    println!("   🔒 sha256 {}", outcome.sha256);
  }
  Ok(())
}
