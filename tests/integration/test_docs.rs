//! Tests for the `doc-groups` command

use crate::helpers::*;
use anyhow::Result;

fn descriptor(id: &str, title: &str) -> String {
  format!(
    r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="1.9.1">
  <compounddef id="{}" kind="group">
    <compoundname>{}</compoundname>
    <title>{}</title>
    <briefdescription>
    </briefdescription>
  </compounddef>
</doxygen>
"#,
    id,
    id.trim_start_matches("group__"),
    title
  )
}

#[test]
fn test_doc_groups_writes_one_page_per_group() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("docs/doxygen/xml/group__Foo.xml", &descriptor("group__Foo", "Foo Title"))?;
  project.write_file(
    "docs/doxygen/xml/group__containers.xml",
    &descriptor("group__containers", "Containers"),
  )?;
  project.write_file("docs/doxygen/xml/index.xml", "<doxygenindex/>")?;

  run_header_release(&project.path, &["doc-groups"])?;

  assert_eq!(
    project.read_file("docs/groups/group__Foo.rst")?,
    "Foo Title\n=========\n\n.. doxygengroup:: Foo\n   :project: etl\n   :members:\n"
  );
  assert!(project.file_exists("docs/groups/group__containers.rst"));
  assert!(!project.file_exists("docs/groups/index.rst"));

  Ok(())
}

#[test]
fn test_doc_groups_directory_overrides() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("xml/group__maps.xml", &descriptor("group__maps", "Maps"))?;

  run_header_release(&project.path, &["doc-groups", "--xml-dir", "xml", "--output-dir", "site/api"])?;
  assert!(project.read_file("site/api/group__maps.rst")?.contains(".. doxygengroup:: maps"));

  Ok(())
}

#[test]
fn test_malformed_descriptor_aborts_by_default() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("docs/doxygen/xml/group__a.xml", "<doxygen><compounddef id=\"group__a\">")?;
  project.write_file("docs/doxygen/xml/group__b.xml", &descriptor("group__b", "B"))?;

  let output = run_header_release_unchecked(&project.path, &["doc-groups"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("group__a.xml"));
  assert!(!project.file_exists("docs/groups/group__b.rst"));

  Ok(())
}

#[test]
fn test_skip_malformed_continues() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("docs/doxygen/xml/group__a.xml", "<doxygen><compounddef id=\"group__a\">")?;
  project.write_file("docs/doxygen/xml/group__b.xml", &descriptor("group__b", "B"))?;

  let output = run_header_release(&project.path, &["doc-groups", "--skip-malformed"])?;
  assert!(stdout(&output).contains("skipped"));
  assert!(project.file_exists("docs/groups/group__b.rst"));
  assert!(!project.file_exists("docs/groups/group__a.rst"));

  Ok(())
}
