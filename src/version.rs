//! Version of record
//!
//! The version file holds a single `MAJOR.MINOR.PATCH` line. It is read once
//! per run and the resulting [`VersionTriple`] is passed to every step that
//! needs it.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt, VersionError};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Structured version derived from the version-of-record line
///
/// Components are kept as unconstrained string tokens; `full` is the first
/// line of the file exactly as written (without its line terminator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionTriple {
  pub major: String,
  pub minor: String,
  pub patch: String,
  pub full: String,
}

impl VersionTriple {
  /// Split a version line on `.` into at most three parts.
  ///
  /// More than three components leave the remainder in `patch`
  /// (`1.2.3.4` has patch `3.4`).
  pub fn parse(line: &str, source: &Path) -> ReleaseResult<Self> {
    if line.trim().is_empty() {
      return Err(
        VersionError::Empty {
          path: source.to_path_buf(),
        }
        .into(),
      );
    }

    let mut parts = line.splitn(3, '.');
    match (parts.next(), parts.next(), parts.next()) {
      (Some(major), Some(minor), Some(patch)) => Ok(Self {
        major: major.to_string(),
        minor: minor.to_string(),
        patch: patch.to_string(),
        full: line.to_string(),
      }),
      _ => Err(
        VersionError::Malformed {
          path: source.to_path_buf(),
          line: line.to_string(),
        }
        .into(),
      ),
    }
  }

  /// Read the first line of the version-of-record file
  pub fn read(path: &Path) -> ReleaseResult<Self> {
    if !path.is_file() {
      return Err(ReleaseError::missing(path, "version file"));
    }
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let line = content.lines().next().unwrap_or("");
    let version = Self::parse(line, path)?;
    tracing::debug!(version = %version.full, path = %path.display(), "read version of record");
    Ok(version)
  }

  /// The version as semver, when it is one
  pub fn as_semver(&self) -> Option<semver::Version> {
    semver::Version::parse(&self.full).ok()
  }
}

impl fmt::Display for VersionTriple {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.full)
  }
}
