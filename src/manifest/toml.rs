//! TOML manifests, edited losslessly with `toml_edit`

use crate::core::error::{ManifestError, ReleaseResult};
use std::path::Path;
use toml_edit::{DocumentMut, Item, TableLike};

fn parse(content: &str, path: &Path) -> ReleaseResult<DocumentMut> {
  content.parse::<DocumentMut>().map_err(|e| {
    ManifestError::Parse {
      path: path.to_path_buf(),
      format: "toml".to_string(),
      reason: e.to_string(),
    }
    .into()
  })
}

/// Walk to the table holding the last key segment
fn parent_table<'a>(doc: &'a mut DocumentMut, parents: &[&str]) -> Option<&'a mut dyn TableLike> {
  let mut table: &mut dyn TableLike = doc.as_table_mut();
  for segment in parents {
    table = table.get_mut(segment)?.as_table_like_mut()?;
  }
  Some(table)
}

/// Set the value at a dotted key path (e.g. `package.version`)
///
/// Parent tables must exist; the final key is inserted when absent. Comments
/// and formatting around an existing value are kept.
pub fn rewrite(content: &str, key: &str, version: &str, path: &Path) -> ReleaseResult<String> {
  let mut doc = parse(content, path)?;
  let segments: Vec<&str> = key.split('.').collect();
  let (last, parents) = segments.split_last().ok_or_else(|| ManifestError::MissingVersionField {
    path: path.to_path_buf(),
    field: key.to_string(),
  })?;

  let table = parent_table(&mut doc, parents).ok_or_else(|| ManifestError::MissingVersionField {
    path: path.to_path_buf(),
    field: key.to_string(),
  })?;

  match table.get_mut(last).and_then(Item::as_value_mut) {
    Some(value) => {
      let decor = value.decor().clone();
      *value = version.into();
      *value.decor_mut() = decor;
    }
    None => {
      table.insert(last, toml_edit::value(version));
    }
  }

  Ok(doc.to_string())
}

/// Read the string at a dotted key path
pub fn read_version(content: &str, key: &str) -> Option<String> {
  let doc = content.parse::<DocumentMut>().ok()?;
  let mut item: &Item = doc.as_item();
  for segment in key.split('.') {
    item = item.get(segment)?;
  }
  item.as_str().map(str::to_string)
}
