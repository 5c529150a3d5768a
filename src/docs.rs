//! API group pages from Doxygen group descriptors
//!
//! Every `group__*.xml` file in the XML directory describes one API group.
//! Its `compounddef id` and `title` become a reStructuredText page holding a
//! `doxygengroup` directive for the site builder.

use crate::core::config::MalformedPolicy;
use crate::core::error::{DocError, ReleaseError, ReleaseResult, ResultExt};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor file name pattern
const DESCRIPTOR_GLOB: &str = "group__*.xml";

/// Length of the `group__` marker carried by every group id
const GROUP_PREFIX_LEN: usize = 7;

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct DocOptions {
  /// Project name written into each directive
  pub project: String,
  pub on_malformed: MalformedPolicy,
}

/// A parsed group descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoxygenGroup {
  pub id: String,
  pub title: String,
}

impl DoxygenGroup {
  /// Group name without the `group__` marker
  pub fn name(&self) -> String {
    self.id.chars().skip(GROUP_PREFIX_LEN).collect()
  }

  /// Render the page for this group
  pub fn render(&self, project: &str) -> String {
    format!(
      "{title}\n{underline}\n\n.. doxygengroup:: {name}\n   :project: {project}\n   :members:\n",
      title = self.title,
      underline = "=".repeat(self.title.chars().count()),
      name = self.name(),
      project = project,
    )
  }
}

/// Pages written and descriptors skipped
#[derive(Debug, Default, Serialize)]
pub struct DocOutcome {
  pub written: Vec<PathBuf>,
  pub skipped: Vec<PathBuf>,
}

/// Write one page per group descriptor found in `xml_dir`
pub fn generate_group_rst(xml_dir: &Path, output_dir: &Path, options: &DocOptions) -> ReleaseResult<DocOutcome> {
  if !xml_dir.is_dir() {
    return Err(ReleaseError::missing(xml_dir, "Doxygen XML directory"));
  }
  fs::create_dir_all(output_dir).with_context(|| format!("Failed to create {}", output_dir.display()))?;

  let pattern = glob::Pattern::new(DESCRIPTOR_GLOB)?;
  let mut descriptors: Vec<PathBuf> = fs::read_dir(xml_dir)
    .with_context(|| format!("Failed to list {}", xml_dir.display()))?
    .filter_map(|entry| entry.ok().map(|e| e.path()))
    .filter(|path| {
      path.is_file()
        && path
          .file_name()
          .and_then(|n| n.to_str())
          .is_some_and(|n| pattern.matches(n))
    })
    .collect();
  descriptors.sort();
  tracing::debug!(count = descriptors.len(), dir = %xml_dir.display(), "found group descriptors");

  let mut outcome = DocOutcome::default();
  for path in descriptors {
    let group = match read_group(&path) {
      Ok(group) => group,
      Err(err) if options.on_malformed == MalformedPolicy::Skip => {
        tracing::warn!(path = %path.display(), error = %err, "skipping malformed group descriptor");
        outcome.skipped.push(path);
        continue;
      }
      Err(err) => return Err(err),
    };

    let page = output_dir.join(format!("{}.rst", group.id));
    fs::write(&page, group.render(&options.project)).with_context(|| format!("Failed to write {}", page.display()))?;
    tracing::debug!(group = %group.id, page = %page.display(), "group page written");
    outcome.written.push(page);
  }

  Ok(outcome)
}

/// Parse one descriptor file
pub fn read_group(path: &Path) -> ReleaseResult<DoxygenGroup> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  parse_group(&content, path)
}

/// Extract the `compounddef` id and the first `title` text
fn parse_group(content: &str, path: &Path) -> ReleaseResult<DoxygenGroup> {
  let malformed = |reason: String| DocError::MalformedXml {
    path: path.to_path_buf(),
    reason,
  };

  // Text events are kept untrimmed so inline markup inside a title keeps its spacing.
  let mut reader = Reader::from_str(content);

  let mut id: Option<String> = None;
  let mut title: Option<String> = None;
  let mut in_title = false;
  let mut title_text = String::new();

  loop {
    match reader.read_event() {
      Ok(Event::Start(e)) => match e.name().as_ref() {
        b"compounddef" if id.is_none() => {
          if let Some(attr) = e.try_get_attribute("id").map_err(|err| malformed(err.to_string()))? {
            id = Some(attr.unescape_value().map_err(|err| malformed(err.to_string()))?.into_owned());
          }
        }
        b"title" if title.is_none() => in_title = true,
        _ => {}
      },
      Ok(Event::Empty(e)) => {
        if e.name().as_ref() == b"compounddef"
          && id.is_none()
          && let Some(attr) = e.try_get_attribute("id").map_err(|err| malformed(err.to_string()))?
        {
          id = Some(attr.unescape_value().map_err(|err| malformed(err.to_string()))?.into_owned());
        }
      }
      Ok(Event::Text(t)) if in_title => {
        title_text.push_str(&t.unescape().map_err(|err| malformed(err.to_string()))?);
      }
      Ok(Event::End(e)) if in_title && e.name().as_ref() == b"title" => {
        in_title = false;
        title = Some(std::mem::take(&mut title_text).trim().to_string());
      }
      Ok(Event::Eof) => break,
      Ok(_) => {}
      Err(err) => {
        return Err(malformed(format!("at byte {}: {}", reader.error_position(), err)).into());
      }
    }
  }

  let id = id.ok_or_else(|| DocError::MissingElement {
    path: path.to_path_buf(),
    element: "compounddef id".to_string(),
  })?;
  let title = title.ok_or_else(|| DocError::MissingElement {
    path: path.to_path_buf(),
    element: "title".to_string(),
  })?;

  Ok(DoxygenGroup { id, title })
}
