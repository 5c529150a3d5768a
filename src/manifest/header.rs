//! Preprocessor version header
//!
//! The header is treated as an ordered sequence of lines. Only lines holding
//! one of the three version macro markers are replaced; every other line,
//! including its line terminator, is kept byte-for-byte.

use crate::core::config::HeaderMarkers;
use crate::core::error::ReleaseResult;
use crate::version::VersionTriple;
use std::path::Path;

/// Split a line into its body and terminator (`\n`, `\r\n` or nothing)
fn split_terminator(line: &str) -> (&str, &str) {
  if let Some(body) = line.strip_suffix("\r\n") {
    (body, "\r\n")
  } else if let Some(body) = line.strip_suffix('\n') {
    (body, "\n")
  } else {
    (line, "")
  }
}

/// Rebuild a matched line from the marker position.
///
/// The kept prefix is `body[offset..marker.len()]`, which equals the marker
/// only when it starts at column 0. An indented marker loses its last
/// `offset` characters; that output is kept as is and reported.
fn replace_line(body: &str, offset: usize, marker: &str, value: &str, path: &Path) -> String {
  if offset != 0 {
    tracing::warn!(
      path = %path.display(),
      offset,
      marker = marker.trim_end(),
      "version marker is indented; rewritten line will be truncated"
    );
  }
  let kept = body.get(offset..marker.len()).unwrap_or("");
  format!("{}{}", kept, value)
}

/// Rewrite the major/minor/patch lines of a header
pub fn rewrite(content: &str, markers: &HeaderMarkers, version: &VersionTriple, path: &Path) -> ReleaseResult<String> {
  let targets = [
    (markers.major.as_str(), version.major.as_str()),
    (markers.minor.as_str(), version.minor.as_str()),
    (markers.patch.as_str(), version.patch.as_str()),
  ];
  let mut seen = [false; 3];
  let mut out = String::with_capacity(content.len());

  for line in content.split_inclusive('\n') {
    let (body, terminator) = split_terminator(line);

    let matched = targets
      .iter()
      .enumerate()
      .find_map(|(i, (marker, value))| body.find(marker).map(|offset| (i, offset, *marker, *value)));

    match matched {
      Some((i, offset, marker, value)) => {
        seen[i] = true;
        out.push_str(&replace_line(body, offset, marker, value, path));
        out.push_str(terminator);
      }
      None => out.push_str(line),
    }
  }

  for ((marker, _), found) in targets.iter().zip(seen) {
    if !found {
      tracing::warn!(
        path = %path.display(),
        marker = marker.trim_end(),
        "version marker not found; line left unchanged"
      );
    }
  }

  Ok(out)
}

/// Text following `marker` on a line, matched anywhere in the line as `rewrite` does
fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
  line.find(marker).map(|offset| &line[offset + marker.len()..])
}

/// Read the version back as `major.minor.patch` from the first matching lines
pub fn read_version(content: &str, markers: &HeaderMarkers) -> Option<String> {
  let component = |marker: &str| {
    content
      .lines()
      .find_map(|line| after_marker(line, marker))
      .map(|rest| rest.trim().to_string())
  };

  Some(format!(
    "{}.{}.{}",
    component(&markers.major)?,
    component(&markers.minor)?,
    component(&markers.patch)?
  ))
}
