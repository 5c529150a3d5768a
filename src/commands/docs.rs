use crate::core::config::MalformedPolicy;
use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::docs::{self, DocOptions};
use std::path::PathBuf;

/// Run the doc-groups command
///
/// `--xml-dir` and `--output-dir` override the configured directories;
/// `--skip-malformed` overrides `docs.on_malformed`.
pub fn run_doc_groups(
  ctx: &ProjectContext,
  xml_dir: Option<PathBuf>,
  output_dir: Option<PathBuf>,
  skip_malformed: bool,
) -> ReleaseResult<()> {
  let config = &ctx.config.docs;
  let xml_dir = ctx.path(xml_dir.as_ref().unwrap_or(&config.xml_dir));
  let output_dir = ctx.path(output_dir.as_ref().unwrap_or(&config.output_dir));
  let options = DocOptions {
    project: config.project.clone(),
    on_malformed: if skip_malformed {
      MalformedPolicy::Skip
    } else {
      config.on_malformed
    },
  };

  println!("📚 Generating group pages from {}", ctx.display(&xml_dir));
  let outcome = docs::generate_group_rst(&xml_dir, &output_dir, &options)?;

  for path in &outcome.skipped {
    println!("   ⚠️  skipped {}", ctx.display(path));
  }
  println!(
    "   ✅ {} page(s) written to {}",
    outcome.written.len(),
    ctx.display(&output_dir)
  );
  Ok(())
}
