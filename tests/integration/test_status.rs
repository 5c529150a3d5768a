//! Tests for the `status` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_status_consistent() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_header_release(&project.path, &["status"])?;
  let out = stdout(&output);
  assert!(out.contains("Version of record: 1.2.3"));
  assert!(out.contains("library.properties"));
  assert!(!out.contains("mismatch"));

  Ok(())
}

#[test]
fn test_status_detects_drift() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("1.3.0")?;

  let output = run_header_release_unchecked(&project.path, &["status", "--json"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("5 manifest(s) disagree"));

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["version"], "1.3.0");
  assert_eq!(report["semver"], true);
  let manifests = report["manifests"].as_array().unwrap();
  assert_eq!(manifests.len(), 5);
  assert!(manifests.iter().all(|m| m["consistent"] == false));
  assert_eq!(manifests[0]["version"], "1.2.3");

  Ok(())
}

#[test]
fn test_status_after_update_and_mirror() -> Result<()> {
  let project = TestProject::new()?;
  project.set_version("1.3.0")?;
  run_header_release(&project.path, &["release"])?;

  let output = run_header_release(&project.path, &["status", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["mirror"]["headers"], 3);
  assert_eq!(report["mirror"]["stale"], 0);

  Ok(())
}
