//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let project = TestProject::new()?;

  run_header_release(&project.path, &["init"])?;

  assert!(project.file_exists("release.toml"));
  let config = project.read_file("release.toml")?;
  assert!(config.contains("[library]"));
  assert!(config.contains("manifests"));
  assert!(config.contains("include/etl/version.h"));
  assert!(config.contains("../etl-arduino"));

  // the written defaults drive the other commands unchanged
  run_header_release(&project.path, &["status"])?;

  Ok(())
}

#[test]
fn test_init_refuses_existing_config() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("release.toml", "[library]\nname = \"custom\"\n")?;

  let output = run_header_release_unchecked(&project.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--force"));
  assert_eq!(project.read_file("release.toml")?, "[library]\nname = \"custom\"\n");

  run_header_release(&project.path, &["init", "--force"])?;
  assert!(project.read_file("release.toml")?.contains("name = \"etl\""));

  Ok(())
}

#[test]
fn test_init_replaces_broken_config() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("release.toml", "this is = = not toml")?;

  let output = run_header_release_unchecked(&project.path, &["status"])?;
  assert_eq!(output.status.code(), Some(1));

  run_header_release(&project.path, &["init", "--force"])?;
  run_header_release(&project.path, &["status"])?;

  Ok(())
}

#[test]
fn test_explicit_config_must_exist() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_header_release_unchecked(&project.path, &["--config", "missing.toml", "status"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("missing.toml"));

  Ok(())
}
