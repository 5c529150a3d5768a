//! JSON package descriptions (`library.json` style)
//!
//! The document is parsed only to validate it and to locate the top-level
//! `version` member. The new value is spliced into the original text at that
//! member's byte range, so every other byte of the file is kept.

use crate::core::error::{ManifestError, ReleaseResult};
use serde_json::Value;
use std::ops::Range;
use std::path::Path;

fn parse_error(path: &Path, reason: impl Into<String>) -> ManifestError {
  ManifestError::Parse {
    path: path.to_path_buf(),
    format: "json".to_string(),
    reason: reason.into(),
  }
}

/// Leading whitespace of the first indented line, defaulting to two spaces
fn detect_indent(content: &str) -> String {
  content
    .lines()
    .skip(1)
    .find(|line| !line.trim().is_empty())
    .map(|line| line.chars().take_while(|c| *c == ' ' || *c == '\t').collect::<String>())
    .filter(|indent| !indent.is_empty())
    .unwrap_or_else(|| "  ".to_string())
}

/// Index just past the closing quote of the string starting at `start`
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
  let mut i = start + 1;
  while i < bytes.len() {
    match bytes[i] {
      b'\\' => i += 2,
      b'"' => return Some(i + 1),
      _ => i += 1,
    }
  }
  None
}

/// Byte range of the top-level `version` value, if the key is present.
///
/// Expects a document that already parsed as an object.
fn version_span(content: &str) -> Option<Range<usize>> {
  let bytes = content.as_bytes();
  let mut depth = 0usize;
  let mut expect_key = false;
  let mut in_version = false;
  let mut start: Option<usize> = None;
  let mut i = 0;

  while i < bytes.len() {
    let b = bytes[i];
    if in_version && start.is_none() && depth == 1 && b != b':' && !b.is_ascii_whitespace() {
      start = Some(i);
    }

    match b {
      b'"' => {
        let end = string_end(bytes, i)?;
        if depth == 1 && expect_key {
          let key: String = serde_json::from_str(&content[i..end]).ok()?;
          in_version = key == "version";
          expect_key = false;
        }
        i = end;
        continue;
      }
      b'{' | b'[' => {
        depth += 1;
        if depth == 1 {
          expect_key = true;
        }
      }
      b',' if depth == 1 => {
        if let Some(s) = start {
          return Some(s..content[..i].trim_end().len());
        }
        expect_key = true;
      }
      b'}' | b']' => {
        if depth == 1
          && let Some(s) = start
        {
          return Some(s..content[..i].trim_end().len());
        }
        depth = depth.saturating_sub(1);
      }
      _ => {}
    }
    i += 1;
  }
  None
}

/// Insert a `version` member after the last member of the top-level object
fn append_version(content: &str, literal: &str, path: &Path) -> ReleaseResult<String> {
  let close = content
    .rfind('}')
    .ok_or_else(|| parse_error(path, "top-level object is not closed"))?;
  let head = content[..close].trim_end();
  let member = format!("\"version\": {}", literal);

  let inserted = if head.ends_with('{') {
    member
  } else if head.contains('\n') {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    format!(",{}{}{}", newline, detect_indent(content), member)
  } else {
    format!(", {}", member)
  };

  Ok(format!("{}{}{}", head, inserted, &content[head.len()..]))
}

/// Set the top-level `version` field
pub fn rewrite(content: &str, version: &str, path: &Path) -> ReleaseResult<String> {
  let doc: Value = serde_json::from_str(content).map_err(|e| parse_error(path, e.to_string()))?;
  let object = doc
    .as_object()
    .ok_or_else(|| parse_error(path, "top-level value is not an object"))?;

  let literal = serde_json::to_string(version).map_err(|e| parse_error(path, e.to_string()))?;

  if !object.contains_key("version") {
    tracing::info!(path = %path.display(), "no version field, adding one");
    return append_version(content, &literal, path);
  }

  let span = version_span(content).ok_or_else(|| parse_error(path, "could not locate the version member"))?;
  let mut out = String::with_capacity(content.len() + literal.len());
  out.push_str(&content[..span.start]);
  out.push_str(&literal);
  out.push_str(&content[span.end..]);
  Ok(out)
}

/// Read the top-level `version` string
pub fn read_version(content: &str) -> Option<String> {
  let doc: Value = serde_json::from_str(content).ok()?;
  doc.get("version")?.as_str().map(str::to_string)
}
