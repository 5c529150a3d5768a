//! Tests for the `release` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_release_propagates_then_mirrors() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("3.1.4")?;

  let output = run_header_release(&project.path, &["release", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(report["command"], "release");
  assert_eq!(report["version"], "3.1.4");
  let steps = report["steps"].as_array().unwrap();
  // version read, five manifests, four mirror steps
  assert_eq!(steps.len(), 10);
  assert!(steps.iter().all(|s| s["status"] == "completed"));

  // the mirror receives the already-rewritten manifests
  assert!(project.read_mirror_file("library.json")?.contains("\"version\": \"3.1.4\""));
  assert!(
    project
      .read_mirror_file("library.properties")?
      .lines()
      .any(|l| l == "version=3.1.4")
  );
  assert!(project.read_mirror_file("src/etl/version.h")?.contains("#define ETL_VERSION_PATCH 4\n"));

  Ok(())
}

#[test]
fn test_release_stops_at_first_failure() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("3.1.4")?;
  std::fs::remove_file(project.path.join("library.properties"))?;

  let output = run_header_release_unchecked(&project.path, &["release", "--json"])?;
  assert_eq!(output.status.code(), Some(1));

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let statuses: Vec<_> = report["steps"]
    .as_array()
    .unwrap()
    .iter()
    .map(|s| s["status"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(
    statuses,
    [
      "completed",
      "completed",
      "completed",
      "failed",
      "skipped",
      "skipped",
      "skipped",
      "skipped",
      "skipped",
      "skipped"
    ]
  );

  // no rollback of the files written before the failure
  assert!(project.read_file("library.json")?.contains("3.1.4"));
  assert!(project.read_file("arduino/library-arduino.json")?.contains("1.2.3"));
  assert!(!project.mirror.exists());

  Ok(())
}

#[test]
fn test_release_text_report() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_header_release(&project.path, &["release"])?;
  let out = stdout(&output);
  assert!(out.contains("release report"));
  assert!(out.contains("Version: 1.2.3"));
  assert!(out.contains("copy examples tree"));

  Ok(())
}
