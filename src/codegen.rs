//! Generated-header verification
//!
//! Each template header is expanded by the external templating tool into a
//! scratch directory and compared byte-for-byte with the checked-in header
//! it is supposed to produce. Every template is checked; mismatches are
//! collected rather than stopping at the first.

use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use similar::TextDiff;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Why a template failed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
  /// Tool output differs from the checked-in header
  Differs { diff: Option<String> },
  /// No checked-in header for this template
  MissingHeader,
  /// The tool exited unsuccessfully or produced nothing
  ToolFailed { reason: String },
}

/// One failed comparison
#[derive(Debug, Clone)]
pub struct Mismatch {
  pub template: PathBuf,
  pub generated: PathBuf,
  pub kind: MismatchKind,
}

impl fmt::Display for Mismatch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      MismatchKind::Differs { .. } => write!(
        f,
        "{} does not match the output of {}",
        self.generated.display(),
        self.template.display()
      ),
      MismatchKind::MissingHeader => write!(
        f,
        "{} is missing (expected from {})",
        self.generated.display(),
        self.template.display()
      ),
      MismatchKind::ToolFailed { reason } => {
        write!(f, "{} could not be expanded: {}", self.template.display(), reason)
      }
    }
  }
}

/// Summary of a verification run
#[derive(Debug, Default)]
pub struct VerifyOutcome {
  pub checked: usize,
  pub mismatches: Vec<Mismatch>,
}

impl VerifyOutcome {
  pub fn passed(&self) -> bool {
    self.mismatches.is_empty()
  }
}

/// Template headers in the templates directory, sorted
pub fn discover_templates(ctx: &ProjectContext) -> ReleaseResult<Vec<PathBuf>> {
  let codegen = &ctx.config.codegen;
  let dir = ctx.path(&codegen.templates_dir);
  if !dir.is_dir() {
    return Err(ReleaseError::missing(dir, "generator templates directory"));
  }

  let pattern = glob::Pattern::new(&codegen.template_glob)?;
  let mut templates: Vec<PathBuf> = fs::read_dir(&dir)
    .with_context(|| format!("Failed to list {}", dir.display()))?
    .filter_map(|entry| entry.ok().map(|e| e.path()))
    .filter(|path| {
      path.is_file()
        && path
          .file_name()
          .and_then(|n| n.to_str())
          .is_some_and(|n| pattern.matches(n))
    })
    .collect();
  templates.sort();
  Ok(templates)
}

/// Checked-in header a template produces: `<stem minus suffix>.<ext>`
pub fn generated_header_for(ctx: &ProjectContext, template: &Path) -> ReleaseResult<PathBuf> {
  let codegen = &ctx.config.codegen;
  let stem = template
    .file_stem()
    .and_then(|s| s.to_str())
    .ok_or_else(|| ReleaseError::message(format!("Template has no usable name: {}", template.display())))?;
  let base = stem.strip_suffix(codegen.template_suffix.as_str()).unwrap_or(stem);

  let file_name = match template.extension().and_then(|e| e.to_str()) {
    Some(ext) => format!("{}.{}", base, ext),
    None => base.to_string(),
  };
  Ok(ctx.path(&codegen.generated_dir).join(file_name))
}

/// Expand every template and compare with its checked-in header
pub fn verify_generators(ctx: &ProjectContext, show_diff: bool) -> ReleaseResult<VerifyOutcome> {
  let templates = discover_templates(ctx)?;
  let scratch = tempfile::tempdir().context("Failed to create scratch directory for generator output")?;
  tracing::info!(count = templates.len(), command = %ctx.config.codegen.command, "verifying generated headers");

  let mut outcome = VerifyOutcome::default();
  for template in templates {
    let generated = generated_header_for(ctx, &template)?;
    let output = scratch.path().join(
      generated
        .file_name()
        .ok_or_else(|| ReleaseError::message(format!("Invalid generated path: {}", generated.display())))?,
    );

    outcome.checked += 1;
    if let Some(kind) = check_template(ctx, &template, &generated, &output, show_diff)? {
      tracing::warn!(template = %template.display(), "generator mismatch");
      outcome.mismatches.push(Mismatch {
        template,
        generated,
        kind,
      });
    } else {
      tracing::debug!(template = %template.display(), "generated header up to date");
    }
  }

  Ok(outcome)
}

fn check_template(
  ctx: &ProjectContext,
  template: &Path,
  generated: &Path,
  output: &Path,
  show_diff: bool,
) -> ReleaseResult<Option<MismatchKind>> {
  if let Err(reason) = run_tool(ctx, template, output) {
    return Ok(Some(MismatchKind::ToolFailed { reason }));
  }

  if !generated.is_file() {
    return Ok(Some(MismatchKind::MissingHeader));
  }

  let expected = fs::read(generated).with_context(|| format!("Failed to read {}", generated.display()))?;
  let actual = fs::read(output).with_context(|| format!("Failed to read {}", output.display()))?;
  if expected == actual {
    return Ok(None);
  }

  let diff = show_diff.then(|| {
    let expected = String::from_utf8_lossy(&expected);
    let actual = String::from_utf8_lossy(&actual);
    let label = ctx.display(generated);
    TextDiff::from_lines(expected.as_ref(), actual.as_ref())
      .unified_diff()
      .context_radius(3)
      .header(&format!("checked-in/{}", label), &format!("generated/{}", label))
      .to_string()
  });
  Ok(Some(MismatchKind::Differs { diff }))
}

/// Run the templating tool once; `Err` carries a one-line reason
fn run_tool(ctx: &ProjectContext, template: &Path, output: &Path) -> Result<(), String> {
  let codegen = &ctx.config.codegen;
  let template_arg = template.to_string_lossy();
  let output_arg = output.to_string_lossy();
  let args: Vec<String> = codegen
    .args
    .iter()
    .map(|arg| arg.replace("{template}", &template_arg).replace("{output}", &output_arg))
    .collect();

  tracing::debug!(command = %codegen.command, ?args, "running templating tool");
  let result = Command::new(&codegen.command)
    .args(&args)
    .current_dir(&ctx.root)
    .output()
    .map_err(|err| format!("failed to run '{}': {}", codegen.command, err))?;

  if !result.status.success() {
    let stderr = String::from_utf8_lossy(&result.stderr);
    let first_line = stderr.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    return Err(format!("'{}' exited with {}: {}", codegen.command, result.status, first_line));
  }
  if !output.is_file() {
    return Err(format!("'{}' produced no output", codegen.command));
  }
  Ok(())
}
