//! File and tree copy helpers
//!
//! Copies are additive and overwriting: files at matching relative paths are
//! replaced, files that only exist at the destination are left alone.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::ui::progress::FileProgress;
use serde::Serialize;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Counters for a copy operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyStats {
  pub files: usize,
  pub bytes: u64,
}

impl CopyStats {
  fn add(&mut self, bytes: u64) {
    self.files += 1;
    self.bytes += bytes;
  }
}

/// Copy one file, creating the destination's parent directories
pub fn copy_file(source: &Path, target: &Path) -> ReleaseResult<u64> {
  if !source.is_file() {
    return Err(ReleaseError::missing(source, "source file"));
  }

  if let Some(parent) = target.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
  }

  let bytes = fs::copy(source, target)
    .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))?;
  tracing::trace!(from = %source.display(), to = %target.display(), bytes, "copied file");
  Ok(bytes)
}

/// Recursively copy `source` into `target`
///
/// Entries are visited in file-name order so that a failure always leaves the
/// same prefix of the tree copied.
pub fn copy_tree(source: &Path, target: &Path) -> ReleaseResult<CopyStats> {
  if !source.is_dir() {
    return Err(ReleaseError::missing(source, "source directory"));
  }

  let entries = WalkDir::new(source)
    .sort_by_file_name()
    .into_iter()
    .collect::<Result<Vec<_>, _>>()
    .with_context(|| format!("Failed to walk {}", source.display()))?;

  let file_count = entries.iter().filter(|e| !e.file_type().is_dir()).count();
  let mut progress = std::io::stderr()
    .is_terminal()
    .then(|| FileProgress::new(file_count, format!("Copying {}", source.display())));

  let mut stats = CopyStats::default();
  fs::create_dir_all(target).with_context(|| format!("Failed to create directory {}", target.display()))?;

  for entry in entries {
    let rel = entry.path().strip_prefix(source)?;
    let dest = target.join(rel);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&dest).with_context(|| format!("Failed to create directory {}", dest.display()))?;
      continue;
    }

    let bytes = fs::copy(entry.path(), &dest)
      .with_context(|| format!("Failed to copy {} to {}", entry.path().display(), dest.display()))?;
    stats.add(bytes);

    if let Some(progress) = progress.as_mut() {
      progress.inc();
    }
  }

  tracing::debug!(
    from = %source.display(),
    to = %target.display(),
    files = stats.files,
    bytes = stats.bytes,
    "copied tree"
  );
  Ok(stats)
}

/// Relative paths of every file under `root`, sorted
pub fn list_files(root: &Path) -> ReleaseResult<Vec<PathBuf>> {
  let mut files = Vec::new();
  for entry in WalkDir::new(root).sort_by_file_name() {
    let entry = entry?;
    if entry.file_type().is_file() {
      files.push(entry.path().strip_prefix(root)?.to_path_buf());
    }
  }
  Ok(files)
}
