use crate::codegen::{self, MismatchKind};
use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult};

/// Run the verify-generators command
///
/// Prints one line per mismatch; any mismatch makes the command fail.
pub fn run_verify_generators(ctx: &ProjectContext, show_diff: bool) -> ReleaseResult<()> {
  let outcome = codegen::verify_generators(ctx, show_diff)?;

  for mismatch in &outcome.mismatches {
    println!("❌ {}", mismatch);
    if let MismatchKind::Differs { diff: Some(diff) } = &mismatch.kind {
      print!("{}", diff);
    }
  }

  if outcome.passed() {
    println!("✅ {} generated header(s) match their templates", outcome.checked);
    return Ok(());
  }

  Err(ReleaseError::validation(format!(
    "{} of {} generated header(s) do not match their templates",
    outcome.mismatches.len(),
    outcome.checked
  )))
}
