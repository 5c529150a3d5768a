//! Tests for the `update-versions` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_update_versions_rewrites_every_manifest() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("4.5.6")?;

  run_header_release(&project.path, &["update-versions"])?;

  let header = project.read_file("include/etl/version.h")?;
  assert!(header.contains("#define ETL_VERSION_MAJOR 4\n"));
  assert!(header.contains("#define ETL_VERSION_MINOR 5\n"));
  assert!(header.contains("#define ETL_VERSION_PATCH 6\n"));
  assert!(header.starts_with("#ifndef ETL_VERSION_INCLUDED\n"));
  assert!(header.ends_with("#endif\n"));

  let json: serde_json::Value = serde_json::from_str(&project.read_file("library.json")?)?;
  assert_eq!(json["version"], "4.5.6");
  assert_eq!(json["keywords"], "c-plus-plus, embedded");

  let props = project.read_file("library.properties")?;
  assert_eq!(
    props,
    "name=Embedded Template Library\nversion=4.5.6\nauthor=Test Author\n"
  );

  assert!(project.read_file("arduino/library-arduino.json")?.contains("\"version\": \"4.5.6\""));
  assert!(
    project
      .read_file("arduino/library-arduino.properties")?
      .lines()
      .any(|l| l == "version=4.5.6")
  );

  Ok(())
}

#[test]
fn test_update_versions_is_idempotent() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("2.0.0")?;

  run_header_release(&project.path, &["update-versions"])?;
  let first = project.read_file("library.json")?;
  let first_header = project.read_file("include/etl/version.h")?;

  let output = run_header_release(&project.path, &["update-versions"])?;
  assert_eq!(project.read_file("library.json")?, first);
  assert_eq!(project.read_file("include/etl/version.h")?, first_header);
  assert!(stdout(&output).contains("0 of 5 manifest(s) updated"));

  Ok(())
}

#[test]
fn test_dry_run_prints_diff_without_writing() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("1.3.0")?;

  let output = run_header_release(&project.path, &["update-versions", "--dry-run"])?;
  let out = stdout(&output);
  assert!(out.contains("-version=1.2.3"));
  assert!(out.contains("+version=1.3.0"));
  assert!(out.contains("5 of 5 manifest(s) would change"));

  assert!(project.read_file("library.properties")?.contains("version=1.2.3"));

  Ok(())
}

#[test]
fn test_malformed_version_of_record_fails() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("1.2")?;

  let output = run_header_release_unchecked(&project.path, &["update-versions"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("three dot-separated components"));
  assert!(project.read_file("library.json")?.contains("1.2.3"));

  Ok(())
}

#[test]
fn test_missing_marker_is_logged_and_rerun_is_stable() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("4.0.0")?;
  project.write_file("include/etl/version.h", "// header\n#define ETL_VERSION_MAJOR 1\n")?;

  let output = run_header_release(&project.path, &["update-versions"])?;
  let err = stderr(&output);
  assert!(err.contains("version marker not found"));
  assert!(err.contains("version.h"));
  assert!(err.contains("ETL_VERSION_MINOR"));

  let once = project.read_file("include/etl/version.h")?;
  assert_eq!(once, "// header\n#define ETL_VERSION_MAJOR 4\n");

  run_header_release(&project.path, &["update-versions"])?;
  assert_eq!(project.read_file("include/etl/version.h")?, once);

  Ok(())
}

#[test]
fn test_root_flag() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("7.0.0")?;
  let root = project.path.to_string_lossy().into_owned();

  run_header_release(project.path.parent().unwrap(), &["--root", &root, "update-versions"])?;
  assert!(project.read_file("library.properties")?.contains("version=7.0.0"));

  Ok(())
}
