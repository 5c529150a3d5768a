//! Consistency check between the version of record and every manifest
//!
//! Also reports how many header-tree files the mirror is missing or holds
//! stale copies of. Mirror drift is informational; only manifest
//! disagreement fails the command.

use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::fsops;
use crate::manifest;
use crate::version::VersionTriple;
use serde::Serialize;
use std::fs;

/// Version carried by one manifest
#[derive(Debug, Clone, Serialize)]
pub struct ManifestStatus {
  pub path: String,
  pub format: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
  pub consistent: bool,
  /// Why the version could not be read
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// Header tree drift in the mirror
#[derive(Debug, Clone, Serialize)]
pub struct MirrorStatus {
  pub root: String,
  pub headers: usize,
  pub stale: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
  pub version: String,
  pub semver: bool,
  pub manifests: Vec<ManifestStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mirror: Option<MirrorStatus>,
}

impl StatusReport {
  pub fn inconsistent(&self) -> usize {
    self.manifests.iter().filter(|m| !m.consistent).count()
  }
}

/// Run the status command
pub fn run_status(ctx: &ProjectContext, json: bool) -> ReleaseResult<()> {
  let report = collect_status(ctx)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_status_table(&report);
  }

  match report.inconsistent() {
    0 => Ok(()),
    n => Err(ReleaseError::with_help(
      format!("{} manifest(s) disagree with version of record {}", n, report.version),
      "Run `header-release update-versions` to propagate the version.",
    )),
  }
}

/// Read the version of record and every manifest's version
pub fn collect_status(ctx: &ProjectContext) -> ReleaseResult<StatusReport> {
  let version = VersionTriple::read(&ctx.path(&ctx.config.library.version_file))?;
  let semver = version.as_semver().is_some();
  if !semver {
    tracing::warn!(version = %version, "version of record is not valid semver");
  }

  let manifests = ctx
    .config
    .manifests
    .iter()
    .map(|config| {
      let path = ctx.path(&config.path);
      let (found, error) = match manifest::read_version(config, &path) {
        Ok(found) => (found, None),
        Err(err) => (None, Some(err.to_string())),
      };
      ManifestStatus {
        path: ctx.display(&path),
        format: config.format.as_str(),
        consistent: found.as_deref() == Some(version.full.as_str()),
        version: found,
        error,
      }
    })
    .collect();

  Ok(StatusReport {
    version: version.full,
    semver,
    manifests,
    mirror: mirror_status(ctx)?,
  })
}

/// Compare the header tree with the mirror copy, when both exist
fn mirror_status(ctx: &ProjectContext) -> ReleaseResult<Option<MirrorStatus>> {
  let mirror = &ctx.config.mirror;
  let root = ctx.path(&mirror.root);
  let headers = ctx.path(&mirror.headers);
  if !root.is_dir() || !headers.is_dir() {
    return Ok(None);
  }

  let files = fsops::list_files(&headers)?;
  let target = root.join(&mirror.source_dir);
  let mut stale = 0;
  for rel in &files {
    let same = match (fs::read(headers.join(rel)), fs::read(target.join(rel))) {
      (Ok(a), Ok(b)) => a == b,
      _ => false,
    };
    if !same {
      tracing::debug!(file = %rel.display(), "mirror copy missing or stale");
      stale += 1;
    }
  }

  Ok(Some(MirrorStatus {
    root: ctx.display(&root),
    headers: files.len(),
    stale,
  }))
}

/// Print status as a formatted table
fn print_status_table(report: &StatusReport) {
  println!("\n📊 Version Status\n");
  println!(
    "Version of record: {}{}",
    report.version,
    if report.semver { "" } else { " (not semver)" }
  );
  println!();

  println!("{:<45} {:<12} {:<12} STATE", "MANIFEST", "FORMAT", "VERSION");
  println!("{:-<80}", "");

  for status in &report.manifests {
    let state = match (&status.error, status.consistent) {
      (Some(_), _) => "❌ unreadable",
      (None, true) => "✅ ok",
      (None, false) => "⚠️  mismatch",
    };
    println!(
      "{:<45} {:<12} {:<12} {}",
      status.path,
      status.format,
      status.version.as_deref().unwrap_or("-"),
      state
    );
    if let Some(error) = &status.error {
      println!("    {}", error.lines().next().unwrap_or(""));
    }
  }

  if let Some(mirror) = &report.mirror {
    println!();
    if mirror.stale == 0 {
      println!("🔄 Mirror {}: {} header(s) in sync", mirror.root, mirror.headers);
    } else {
      println!(
        "🔄 Mirror {}: {} of {} header(s) missing or stale",
        mirror.root, mirror.stale, mirror.headers
      );
    }
  }
  println!();
}
