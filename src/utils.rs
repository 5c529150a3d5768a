//! Utility functions for cross-platform path handling

use std::path::{Component, Path};

/// Convert a relative path to archive format (always forward slashes)
///
/// Zip entry names use `/` regardless of platform. `.` components are
/// dropped; other non-normal components are kept as their string form.
pub fn path_to_archive_name(path: &Path) -> String {
  path
    .components()
    .filter_map(|c| match c {
      Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
      Component::CurDir => None,
      other => Some(other.as_os_str().to_string_lossy().into_owned()),
    })
    .collect::<Vec<_>>()
    .join("/")
}
