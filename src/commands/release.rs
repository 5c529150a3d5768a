//! Release command implementation
//!
//! Reads the version of record once, rewrites every manifest (one step per
//! file), then syncs the mirror. The first failing step ends the run; the
//! steps after it are reported as skipped.

use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::core::report::RunReport;
use crate::manifest;
use crate::mirror;
use crate::version::VersionTriple;

/// Run the release command
pub fn run_release(ctx: &ProjectContext, json: bool) -> ReleaseResult<()> {
  let mut report = RunReport::new("release");
  let version_file = ctx.path(&ctx.config.library.version_file);

  let version = report.step(
    "read version of record",
    || VersionTriple::read(&version_file),
    |v| v.to_string(),
  );

  if let Some(version) = &version {
    report.version = Some(version.full.clone());
    for manifest_config in &ctx.config.manifests {
      let path = ctx.path(&manifest_config.path);
      report.step(
        format!("update {}", ctx.display(&path)),
        || {
          let rewrite = manifest::plan_rewrite(manifest_config, &path, version)?;
          rewrite.write()?;
          Ok(rewrite.is_changed())
        },
        |changed| if *changed { "rewritten".to_string() } else { "unchanged".to_string() },
      );
    }
  }

  mirror::create_arduino_variant(ctx, &mut report);

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    report.print();
  }
  report.into_result()
}
