//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A header-only library laid out next to its (initially absent) mirror
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
  pub mirror: PathBuf,
}

impl TestProject {
  /// Create a project at version 1.2.3 with every manifest in agreement
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("etl");
    let mirror = root.path().join("etl-arduino");

    let project = Self { _root: root, path, mirror };
    project.write_file("version.txt", "1.2.3\n")?;
    project.write_file(
      "include/etl/version.h",
      "#ifndef ETL_VERSION_INCLUDED\n\
       #define ETL_VERSION_INCLUDED\n\
       \n\
       #define ETL_VERSION_MAJOR 1\n\
       #define ETL_VERSION_MINOR 2\n\
       #define ETL_VERSION_PATCH 3\n\
       \n\
       #endif\n",
    )?;
    project.write_file("include/etl/vector.h", "// vector\n")?;
    project.write_file("include/etl/private/pvoidvector.h", "// pvoidvector\n")?;
    project.write_file(
      "library.json",
      "{\n  \"name\": \"Embedded Template Library\",\n  \"version\": \"1.2.3\",\n  \"keywords\": \"c-plus-plus, embedded\"\n}\n",
    )?;
    project.write_file(
      "library.properties",
      "name=Embedded Template Library\nversion=1.2.3\nauthor=Test Author\n",
    )?;
    project.write_file(
      "arduino/library-arduino.json",
      "{\n  \"name\": \"Embedded Template Library ETL\",\n  \"version\": \"1.2.3\"\n}\n",
    )?;
    project.write_file(
      "arduino/library-arduino.properties",
      "name=Embedded Template Library ETL\nversion=1.2.3\narchitectures=*\n",
    )?;
    project.write_file("arduino/Embedded_Template_Library.h", "#include \"etl/vector.h\"\n")?;
    project.write_file("examples/Blink/Blink.ino", "void setup() {}\nvoid loop() {}\n")?;

    Ok(project)
  }

  /// Write a file relative to the project root, creating directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&full, content).with_context(|| format!("Failed to write {}", full.display()))?;
    Ok(())
  }

  /// Read a file relative to the project root
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Read a file relative to the mirror root
  pub fn read_mirror_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.mirror.join(path))?)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Set the version of record
  pub fn set_version(&self, version: &str) -> Result<()> {
    self.write_file("version.txt", &format!("{}\n", version))
  }
}

/// Run header-release, failing on a non-zero exit
pub fn run_header_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_header_release_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "header-release command failed: header-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run header-release and return its output whatever the exit status
pub fn run_header_release_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_header-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("HEADER_RELEASE_LOG")
    .output()
    .context("Failed to run header-release")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
