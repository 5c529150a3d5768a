mod codegen;
mod commands;
mod core;
mod docs;
mod logging;
mod manifest;
mod mirror;
mod package;
mod ui;
mod utils;
mod version;

use clap::{ArgAction, Parser, Subcommand};
use core::error::{ReleaseError, print_error};
use std::path::PathBuf;

/// Propagate versions, sync platform mirrors and package a header-only library
#[derive(Parser)]
#[command(name = "header-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Project root (default: current directory)
  #[arg(long, global = true, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Configuration file (default: release.toml under the root, if present)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Increase diagnostic output on stderr (-v, -vv, -vvv)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup & Inspection
  // ============================================================================
  /// Write a release.toml with the default layout
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },

  /// Compare every manifest with the version of record
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Version propagation
  // ============================================================================
  /// Rewrite every manifest from the version of record
  UpdateVersions {
    /// Print a diff per manifest instead of writing
    #[arg(long)]
    dry_run: bool,
  },

  /// Sync the hardware-platform mirror repository
  Mirror {
    /// Output the run report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Update every manifest, then sync the mirror
  Release {
    /// Output the run report in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Distribution & Docs
  // ============================================================================
  /// Build the standalone zip archive
  Package {
    /// Output the archive path and digest in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Generate API group pages from Doxygen XML
  DocGroups {
    /// Directory holding the group__*.xml descriptors
    #[arg(long, value_name = "DIR")]
    xml_dir: Option<PathBuf>,
    /// Directory receiving the generated pages
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Skip descriptors that cannot be parsed instead of stopping
    #[arg(long)]
    skip_malformed: bool,
  },

  /// Check checked-in generated headers against their templates
  VerifyGenerators {
    /// Print a unified diff for every mismatching header
    #[arg(long)]
    diff: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  logging::init(cli.verbose);

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(ReleaseError::from(e).context("Failed to get current directory")),
    },
  };

  // init must work before (or instead of) a valid release.toml
  if let Commands::Init { force } = cli.command {
    if let Err(err) = commands::run_init(&root, force) {
      handle_error(err);
    }
    return;
  }

  let ctx = match core::context::ProjectContext::build(&root, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Init { .. } => Ok(()),
    Commands::Status { json } => commands::run_status(&ctx, json),

    Commands::UpdateVersions { dry_run } => commands::run_update_versions(&ctx, dry_run),
    Commands::Mirror { json } => commands::run_mirror(&ctx, json),
    Commands::Release { json } => commands::run_release(&ctx, json),

    Commands::Package { json } => commands::run_package(&ctx, json),
    Commands::DocGroups {
      xml_dir,
      output_dir,
      skip_malformed,
    } => commands::run_doc_groups(&ctx, xml_dir, output_dir, skip_malformed),
    Commands::VerifyGenerators { diff } => commands::run_verify_generators(&ctx, diff),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
