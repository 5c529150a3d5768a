//! Standalone zip package
//!
//! Headers, the umbrella header and the properties manifest are staged in a
//! directory named after the library, compressed into `<name>.zip` next to
//! it, and the staging directory is removed.
//!
//! The staging directory is a scope guard: it is removed on every exit path,
//! including failed copies.

use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::core::fsops;
use crate::utils::path_to_archive_name;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Ephemeral directory removed when dropped
pub struct StagingDirectory {
  path: PathBuf,
  removed: bool,
}

impl StagingDirectory {
  /// Create a fresh staging directory, clearing a stale one
  pub fn create(path: PathBuf) -> ReleaseResult<Self> {
    if path.exists() {
      tracing::warn!(path = %path.display(), "removing stale staging directory");
      fs::remove_dir_all(&path).with_context(|| format!("Failed to remove stale {}", path.display()))?;
    }
    fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(Self { path, removed: false })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Remove the directory, reporting failures
  pub fn remove(mut self) -> ReleaseResult<()> {
    self.removed = true;
    fs::remove_dir_all(&self.path).with_context(|| format!("Failed to remove {}", self.path.display()))
  }
}

impl Drop for StagingDirectory {
  fn drop(&mut self) {
    if self.removed {
      return;
    }
    match fs::remove_dir_all(&self.path) {
      Ok(()) => tracing::debug!(path = %self.path.display(), "staging directory cleaned up"),
      Err(err) => tracing::warn!(path = %self.path.display(), error = %err, "failed to clean up staging directory"),
    }
  }
}

/// Result of a packaging run
#[derive(Debug, Clone, Serialize)]
pub struct PackageOutcome {
  pub archive: PathBuf,
  pub entries: usize,
  pub sha256: String,
}

/// Stage, compress and clean up
pub fn build_package(ctx: &ProjectContext) -> ReleaseResult<PackageOutcome> {
  let package = &ctx.config.package;
  let name = ctx.config.package_name();
  let output_dir = ctx.path(&package.output_dir);
  fs::create_dir_all(&output_dir).with_context(|| format!("Failed to create {}", output_dir.display()))?;

  let staging = StagingDirectory::create(output_dir.join(name))?;
  let src = staging.path().join("src");

  let headers = fsops::copy_tree(&ctx.path(&package.headers), &src)?;
  tracing::debug!(files = headers.files, "staged header tree");

  let umbrella = ctx.path(&package.umbrella_header);
  let umbrella_name = umbrella
    .file_name()
    .ok_or_else(|| ReleaseError::missing(&umbrella, "umbrella header"))?;
  fsops::copy_file(&umbrella, &src.join(umbrella_name))?;

  let properties = ctx.path(&package.properties);
  let properties_name = match &package.properties_as {
    Some(name) => PathBuf::from(name),
    None => PathBuf::from(
      properties
        .file_name()
        .ok_or_else(|| ReleaseError::missing(&properties, "properties manifest"))?,
    ),
  };
  fsops::copy_file(&properties, &staging.path().join(properties_name))?;

  let archive = output_dir.join(format!("{}.zip", name));
  let entries = match write_zip(staging.path(), &archive) {
    Ok(entries) => entries,
    Err(err) => {
      let _ = fs::remove_file(&archive);
      return Err(err.context(format!("Failed to write {}", archive.display())));
    }
  };

  staging.remove()?;

  let sha256 = sha256_file(&archive)?;
  tracing::info!(archive = %archive.display(), entries, %sha256, "package written");

  Ok(PackageOutcome {
    archive,
    entries,
    sha256,
  })
}

/// Compress `root` into `archive`, entries relative to `root`
///
/// Returns the number of file entries written.
fn write_zip(root: &Path, archive: &Path) -> ReleaseResult<usize> {
  let file = File::create(archive)?;
  let mut zip = ZipWriter::new(file);
  let options = SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .unix_permissions(0o644);

  let mut files = 0;
  for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
    let entry = entry?;
    let name = path_to_archive_name(entry.path().strip_prefix(root)?);

    if entry.file_type().is_dir() {
      zip.add_directory(format!("{}/", name), options)?;
      continue;
    }

    zip.start_file(name, options)?;
    let mut source = File::open(entry.path())?;
    io::copy(&mut source, &mut zip)?;
    files += 1;
  }

  zip.finish()?;
  Ok(files)
}

fn sha256_file(path: &Path) -> ReleaseResult<String> {
  let mut file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
  let mut hasher = Sha256::new();
  io::copy(&mut file, &mut hasher)?;
  Ok(format!("{:x}", hasher.finalize()))
}
