//! Error types for header-release with contextual messages and exit codes
//!
//! Every pipeline step returns a [`ReleaseResult`]. Errors are grouped by the
//! concern that produced them so that `main` can print a targeted help line
//! and pick an exit code without inspecting message text.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for header-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// A step failed: bad input, failed verification, inconsistent manifests
  Failure = 1,
  /// System error (I/O, child process)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for header-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// Version-of-record errors
  Version(VersionError),

  /// Manifest parse/rewrite errors
  Manifest(ManifestError),

  /// Documentation descriptor errors
  Doc(DocError),

  /// A required source file or tree is absent
  MissingPath { path: PathBuf, role: String },

  /// Checks ran and reported failures
  Validation { message: String },

  /// I/O errors
  Io(io::Error),

  /// I/O error with the operation that hit it
  IoContext { context: String, source: io::Error },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Missing input file or directory
  pub fn missing(path: impl Into<PathBuf>, role: impl Into<String>) -> Self {
    ReleaseError::MissingPath {
      path: path.into(),
      role: role.into(),
    }
  }

  /// Failed checks
  pub fn validation(msg: impl Into<String>) -> Self {
    ReleaseError::Validation { message: msg.into() }
  }

  /// Add context to an existing error
  ///
  /// I/O errors are wrapped into a message so the context is not lost; typed
  /// errors keep their kind.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(source) => ReleaseError::IoContext { context: ctx_str, source },
      ReleaseError::IoContext { context, source } => ReleaseError::IoContext {
        context: format!("{}\n{}", ctx_str, context),
        source,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::Failure,
      ReleaseError::Version(_) => ExitCode::Failure,
      ReleaseError::Manifest(_) => ExitCode::Failure,
      ReleaseError::Doc(_) => ExitCode::Failure,
      ReleaseError::MissingPath { .. } => ExitCode::Failure,
      ReleaseError::Validation { .. } => ExitCode::Failure,
      ReleaseError::Io(_) | ReleaseError::IoContext { .. } => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::Failure,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Version(e) => e.help_message(),
      ReleaseError::Manifest(e) => e.help_message(),
      ReleaseError::Doc(e) => e.help_message(),
      ReleaseError::MissingPath { .. } => {
        Some("Check --root and the paths in release.toml (`header-release init` writes the defaults).".to_string())
      }
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Version(e) => write!(f, "{}", e),
      ReleaseError::Manifest(e) => write!(f, "{}", e),
      ReleaseError::Doc(e) => write!(f, "{}", e),
      ReleaseError::MissingPath { path, role } => write!(f, "Missing {}: {}", role, path.display()),
      ReleaseError::Validation { message } => write!(f, "{}", message),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::IoContext { context, source } => write!(f, "{}\nI/O error: {}", context, source),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) | ReleaseError::IoContext { source: e, .. } => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<VersionError> for ReleaseError {
  fn from(err: VersionError) -> Self {
    ReleaseError::Version(err)
  }
}

impl From<ManifestError> for ReleaseError {
  fn from(err: ManifestError) -> Self {
    ReleaseError::Manifest(err)
  }
}

impl From<DocError> for ReleaseError {
  fn from(err: DocError) -> Self {
    ReleaseError::Doc(err)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for ReleaseError {
  fn from(err: toml_edit::ser::Error) -> Self {
    ReleaseError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for ReleaseError {
  fn from(err: std::path::StripPrefixError) -> Self {
    ReleaseError::message(format!("Path strip prefix error: {}", err))
  }
}

impl From<walkdir::Error> for ReleaseError {
  fn from(err: walkdir::Error) -> Self {
    match err.into_io_error() {
      Some(io_err) => ReleaseError::Io(io_err),
      None => ReleaseError::message("Directory walk failed: filesystem loop detected"),
    }
  }
}

impl From<zip::result::ZipError> for ReleaseError {
  fn from(err: zip::result::ZipError) -> Self {
    ReleaseError::message(format!("Zip archive error: {}", err))
  }
}

impl From<glob::PatternError> for ReleaseError {
  fn from(err: glob::PatternError) -> Self {
    ReleaseError::Config(ConfigError::Invalid {
      field: "glob pattern".to_string(),
      reason: err.to_string(),
    })
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit --config file not found
  NotFound { path: PathBuf },

  /// Field present but unusable
  Invalid { field: String, reason: String },

  /// Required list or value is empty
  MissingField { field: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `header-release init` to create a configuration file.".to_string()),
      ConfigError::Invalid { .. } | ConfigError::MissingField { .. } => {
        Some("Compare release.toml with the defaults written by `header-release init --force`.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "No header-release configuration found.\nExpected file: {}", path.display())
      }
      ConfigError::Invalid { field, reason } => write!(f, "Invalid config field '{}': {}", field, reason),
      ConfigError::MissingField { field } => write!(f, "Missing required field in config: {}", field),
    }
  }
}

/// Version-of-record errors
#[derive(Debug)]
pub enum VersionError {
  /// File exists but its first line is empty
  Empty { path: PathBuf },

  /// Fewer than three dot-separated components
  Malformed { path: PathBuf, line: String },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    Some("The version file must start with a line of the form MAJOR.MINOR.PATCH".to_string())
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::Empty { path } => write!(f, "Version file is empty: {}", path.display()),
      VersionError::Malformed { path, line } => {
        write!(
          f,
          "Version '{}' in {} does not have three dot-separated components",
          line,
          path.display()
        )
      }
    }
  }
}

/// Manifest parse/rewrite errors
#[derive(Debug)]
pub enum ManifestError {
  /// Manifest content could not be parsed in its declared format
  Parse { path: PathBuf, format: String, reason: String },

  /// Version field (or header marker) not present
  MissingVersionField { path: PathBuf, field: String },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::Parse { format, .. } => Some(format!(
        "Check the `format` of this manifest in release.toml (currently '{}').",
        format
      )),
      ManifestError::MissingVersionField { .. } => {
        Some("Add the version line to the manifest or adjust the marker in release.toml.".to_string())
      }
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::Parse { path, format, reason } => {
        write!(f, "Failed to parse {} as {}: {}", path.display(), format, reason)
      }
      ManifestError::MissingVersionField { path, field } => {
        write!(f, "Version field '{}' not found in {}", field, path.display())
      }
    }
  }
}

/// Documentation descriptor errors
#[derive(Debug)]
pub enum DocError {
  /// XML could not be parsed
  MalformedXml { path: PathBuf, reason: String },

  /// Parsed, but `compounddef id` or `title` is absent
  MissingElement { path: PathBuf, element: String },
}

impl DocError {
  fn help_message(&self) -> Option<String> {
    Some("Regenerate the Doxygen XML or pass --skip-malformed to continue past broken descriptors.".to_string())
  }
}

impl fmt::Display for DocError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DocError::MalformedXml { path, reason } => {
        write!(f, "Malformed group descriptor {}: {}", path.display(), reason)
      }
      DocError::MissingElement { path, element } => {
        write!(f, "Group descriptor {} has no {}", path.display(), element)
      }
    }
  }
}

/// Result type alias for header-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
