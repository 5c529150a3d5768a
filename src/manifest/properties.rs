//! `key=value` properties manifests (`library.properties` style)

/// One physical line of a properties file
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
  /// Blank line or `#`/`!` comment, kept verbatim
  Other(&'a str),
  /// `key=value` (or `key:value`) entry, kept verbatim unless rewritten
  Entry { key: &'a str, raw: &'a str },
}

fn parse(content: &str) -> Vec<Line<'_>> {
  content
    .split_inclusive('\n')
    .map(|raw| {
      let trimmed = raw.trim_start();
      if trimmed.trim_end().is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
        return Line::Other(raw);
      }
      let key_end = trimmed.find(['=', ':']).unwrap_or(trimmed.trim_end().len());
      Line::Entry {
        key: trimmed[..key_end].trim_end(),
        raw,
      }
    })
    .collect()
}

fn terminator(raw: &str) -> &'static str {
  if raw.ends_with("\r\n") {
    "\r\n"
  } else if raw.ends_with('\n') {
    "\n"
  } else {
    ""
  }
}

/// Set `version=<version>`, leaving exactly one version entry
///
/// The first `version` entry is rewritten in place and later duplicates are
/// dropped. Without any, the entry is appended.
pub fn rewrite(content: &str, version: &str) -> String {
  let mut out = String::with_capacity(content.len() + 16);
  let mut written = false;

  for line in parse(content) {
    match line {
      Line::Entry { key: "version", raw } => {
        if written {
          tracing::debug!(line = raw.trim_end(), "dropping duplicate version entry");
          continue;
        }
        out.push_str("version=");
        out.push_str(version);
        out.push_str(terminator(raw));
        written = true;
      }
      Line::Entry { raw, .. } | Line::Other(raw) => out.push_str(raw),
    }
  }

  if !written {
    if !out.is_empty() && !out.ends_with('\n') {
      out.push('\n');
    }
    out.push_str("version=");
    out.push_str(version);
    out.push('\n');
  }

  out
}

/// Read the first `version` value
pub fn read_version(content: &str) -> Option<String> {
  parse(content).into_iter().find_map(|line| match line {
    Line::Entry { key: "version", raw } => {
      let trimmed = raw.trim();
      let value = trimmed.find(['=', ':']).map(|i| &trimmed[i + 1..]).unwrap_or("");
      Some(value.trim().to_string())
    }
    _ => None,
  })
}
