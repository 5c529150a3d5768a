use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::core::report::RunReport;
use crate::mirror;

/// Run the mirror command
pub fn run_mirror(ctx: &ProjectContext, json: bool) -> ReleaseResult<()> {
  let mut report = RunReport::new("mirror");
  if !json {
    println!(
      "🔄 Syncing mirror at {}",
      ctx.display(&ctx.path(&ctx.config.mirror.root))
    );
  }

  mirror::create_arduino_variant(ctx, &mut report);

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    report.print();
  }
  report.into_result()
}
