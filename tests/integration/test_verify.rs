//! Tests for the `verify-generators` command
//!
//! `cp` stands in for the templating tool, so a checked-in header matches
//! when it equals its template byte-for-byte.

#![cfg(unix)]

use crate::helpers::*;
use anyhow::Result;

const CP_CONFIG: &str = r#"[codegen]
command = "cp"
args = ["{template}", "{output}"]
"#;

#[test]
fn test_verify_generators_passes() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("release.toml", CP_CONFIG)?;
  project.write_file("include/etl/generators/fsm_generator.h", "// fsm\n")?;
  project.write_file("include/etl/fsm.h", "// fsm\n")?;

  let output = run_header_release(&project.path, &["verify-generators"])?;
  assert!(stdout(&output).contains("1 generated header(s) match"));

  Ok(())
}

#[test]
fn test_verify_generators_reports_every_mismatch() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("release.toml", CP_CONFIG)?;
  project.write_file("include/etl/generators/fsm_generator.h", "// fsm v2\n")?;
  project.write_file("include/etl/fsm.h", "// fsm v1\n")?;
  project.write_file("include/etl/generators/message_router_generator.h", "// router v2\n")?;
  project.write_file("include/etl/message_router.h", "// router v1\n")?;
  project.write_file("include/etl/generators/type_traits_generator.h", "// traits\n")?;
  project.write_file("include/etl/type_traits.h", "// traits\n")?;

  let output = run_header_release_unchecked(&project.path, &["verify-generators"])?;
  assert_eq!(output.status.code(), Some(1));

  let out = stdout(&output);
  let lines: Vec<_> = out.lines().filter(|l| l.starts_with("❌")).collect();
  assert_eq!(lines.len(), 2);
  assert!(lines[0].contains("fsm.h"));
  assert!(lines[1].contains("message_router.h"));
  assert!(stderr(&output).contains("2 of 3 generated header(s) do not match"));

  Ok(())
}

#[test]
fn test_verify_generators_diff() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("release.toml", CP_CONFIG)?;
  project.write_file("include/etl/generators/fsm_generator.h", "// fsm v2\n")?;
  project.write_file("include/etl/fsm.h", "// fsm v1\n")?;

  let output = run_header_release_unchecked(&project.path, &["verify-generators", "--diff"])?;
  let out = stdout(&output);
  assert!(out.contains("-// fsm v1"));
  assert!(out.contains("+// fsm v2"));

  Ok(())
}

#[test]
fn test_missing_tool_is_a_mismatch() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file(
    "release.toml",
    "[codegen]\ncommand = \"header-release-no-such-tool\"\n",
  )?;
  project.write_file("include/etl/generators/fsm_generator.h", "// fsm\n")?;
  project.write_file("include/etl/fsm.h", "// fsm\n")?;

  let output = run_header_release_unchecked(&project.path, &["verify-generators"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).contains("could not be expanded"));

  Ok(())
}
