//! Hardware-platform mirror repository
//!
//! Replicates the pre-adapted manifests, the umbrella header, the header tree
//! and the examples tree into a sibling repository laid out as an Arduino
//! library. Copies are additive: mirror-only files are never removed.

use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::fsops::{self, CopyStats};
use crate::core::report::RunReport;

/// Run the four mirror steps in order, recording each in `report`
///
/// A failed step stops the sync; files written by earlier steps remain.
pub fn create_arduino_variant(ctx: &ProjectContext, report: &mut RunReport) {
  let mirror = &ctx.config.mirror;
  let mirror_root = ctx.path(&mirror.root);
  tracing::info!(mirror = %mirror_root.display(), "syncing platform mirror");

  report.step(
    "copy adapted manifests",
    || {
      let mut stats = CopyStats::default();
      for file in &mirror.manifests {
        let bytes = fsops::copy_file(&ctx.path(&file.from), &mirror_root.join(&file.to))?;
        stats.files += 1;
        stats.bytes += bytes;
      }
      Ok(stats)
    },
    describe,
  );

  report.step(
    "copy umbrella header",
    || -> ReleaseResult<CopyStats> {
      let source = ctx.path(&mirror.umbrella_header);
      let file_name = source
        .file_name()
        .ok_or_else(|| ReleaseError::missing(&source, "umbrella header"))?;
      let bytes = fsops::copy_file(&source, &mirror_root.join(&mirror.source_dir).join(file_name))?;
      Ok(CopyStats { files: 1, bytes })
    },
    describe,
  );

  report.step(
    "copy header tree",
    || fsops::copy_tree(&ctx.path(&mirror.headers), &mirror_root.join(&mirror.source_dir)),
    describe,
  );

  report.step(
    "copy examples tree",
    || fsops::copy_tree(&ctx.path(&mirror.examples), &mirror_root.join(&mirror.examples_dir)),
    describe,
  );
}

fn describe(stats: &CopyStats) -> String {
  format!(
    "{} file{}, {} bytes",
    stats.files,
    if stats.files == 1 { "" } else { "s" },
    stats.bytes
  )
}
