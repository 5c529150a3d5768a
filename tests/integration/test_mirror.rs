//! Tests for the `mirror` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_mirror_layout() -> Result<()> {
  let project = TestProject::new()?;
  std::fs::create_dir_all(project.mirror.join("src/etl"))?;
  std::fs::write(project.mirror.join("src/etl/arduino_only.h"), "keep me")?;
  std::fs::write(project.mirror.join("README.md"), "mirror readme")?;

  run_header_release(&project.path, &["mirror"])?;

  assert_eq!(
    project.read_mirror_file("library.json")?,
    project.read_file("arduino/library-arduino.json")?
  );
  assert_eq!(
    project.read_mirror_file("library.properties")?,
    project.read_file("arduino/library-arduino.properties")?
  );
  assert_eq!(
    project.read_mirror_file("src/Embedded_Template_Library.h")?,
    project.read_file("arduino/Embedded_Template_Library.h")?
  );
  for header in ["etl/version.h", "etl/vector.h", "etl/private/pvoidvector.h"] {
    assert_eq!(
      project.read_mirror_file(&format!("src/{}", header))?,
      project.read_file(&format!("include/{}", header))?
    );
  }
  assert_eq!(
    project.read_mirror_file("examples/Blink/Blink.ino")?,
    project.read_file("examples/Blink/Blink.ino")?
  );

  assert_eq!(project.read_mirror_file("src/etl/arduino_only.h")?, "keep me");
  assert_eq!(project.read_mirror_file("README.md")?, "mirror readme");

  Ok(())
}

#[test]
fn test_mirror_overwrites_stale_copies() -> Result<()> {
  let project = TestProject::new()?;
  run_header_release(&project.path, &["mirror"])?;

  project.write_file("include/etl/vector.h", "// vector v2\n")?;
  run_header_release(&project.path, &["mirror"])?;

  assert_eq!(project.read_mirror_file("src/etl/vector.h")?, "// vector v2\n");
  Ok(())
}

#[test]
fn test_mirror_json_report() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_header_release(&project.path, &["mirror", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(report["command"], "mirror");
  let steps = report["steps"].as_array().unwrap();
  assert_eq!(steps.len(), 4);
  assert!(steps.iter().all(|s| s["status"] == "completed"));
  assert_eq!(steps[0]["name"], "copy adapted manifests");

  Ok(())
}

#[test]
fn test_missing_tree_keeps_earlier_copies() -> Result<()> {
  let project = TestProject::new()?;
  std::fs::remove_dir_all(project.path.join("examples"))?;

  let output = run_header_release_unchecked(&project.path, &["mirror", "--json"])?;
  assert_eq!(output.status.code(), Some(1));

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let statuses: Vec<_> = report["steps"]
    .as_array()
    .unwrap()
    .iter()
    .map(|s| s["status"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(statuses, ["completed", "completed", "completed", "failed"]);

  assert!(project.mirror.join("library.json").is_file());
  assert!(project.mirror.join("src/etl/vector.h").is_file());
  assert!(!project.mirror.join("examples").exists());

  Ok(())
}
