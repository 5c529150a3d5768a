use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for header-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every section has defaults matching the conventional library layout, so a
/// project without a config file still gets a complete pipeline. Paths are
/// relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub library: LibraryConfig,
  #[serde(default = "default_manifests")]
  pub manifests: Vec<ManifestConfig>,
  #[serde(default)]
  pub mirror: MirrorConfig,
  #[serde(default)]
  pub package: PackageConfig,
  #[serde(default)]
  pub docs: DocsConfig,
  #[serde(default)]
  pub codegen: CodegenConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
  /// Library name, used for the staging directory and archive
  pub name: String,
  /// Version-of-record file
  pub version_file: PathBuf,
}

impl Default for LibraryConfig {
  fn default() -> Self {
    Self {
      name: "etl".to_string(),
      version_file: PathBuf::from("version.txt"),
    }
  }
}

/// Manifest formats understood by the rewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
  /// Preprocessor header with major/minor/patch macro lines
  Header,
  /// JSON package description (`"version": "x.y.z"`)
  Json,
  /// `key=value` properties file
  Properties,
  /// TOML document with a configurable version key path
  Toml,
}

impl ManifestFormat {
  pub fn as_str(&self) -> &'static str {
    match self {
      ManifestFormat::Header => "header",
      ManifestFormat::Json => "json",
      ManifestFormat::Properties => "properties",
      ManifestFormat::Toml => "toml",
    }
  }
}

/// One version-bearing manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
  pub path: PathBuf,
  pub format: ManifestFormat,
  /// Macro prefixes for `header` manifests
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub markers: Option<HeaderMarkers>,
  /// Dotted key path for `toml` manifests (default: package.version)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub key: Option<String>,
}

impl ManifestConfig {
  fn new(path: &str, format: ManifestFormat) -> Self {
    Self {
      path: PathBuf::from(path),
      format,
      markers: None,
      key: None,
    }
  }

  /// Markers to use for a header manifest
  pub fn header_markers(&self) -> HeaderMarkers {
    self.markers.clone().unwrap_or_default()
  }

  /// Key path to use for a TOML manifest
  pub fn toml_key(&self) -> &str {
    self.key.as_deref().unwrap_or("package.version")
  }
}

/// Fixed line prefixes of the version macros
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMarkers {
  pub major: String,
  pub minor: String,
  pub patch: String,
}

impl Default for HeaderMarkers {
  fn default() -> Self {
    Self {
      major: "#define ETL_VERSION_MAJOR ".to_string(),
      minor: "#define ETL_VERSION_MINOR ".to_string(),
      patch: "#define ETL_VERSION_PATCH ".to_string(),
    }
  }
}

fn default_manifests() -> Vec<ManifestConfig> {
  vec![
    ManifestConfig::new("include/etl/version.h", ManifestFormat::Header),
    ManifestConfig::new("library.json", ManifestFormat::Json),
    ManifestConfig::new("library.properties", ManifestFormat::Properties),
    ManifestConfig::new("arduino/library-arduino.json", ManifestFormat::Json),
    ManifestConfig::new("arduino/library-arduino.properties", ManifestFormat::Properties),
  ]
}

/// A file copied under a different name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamedFile {
  pub from: PathBuf,
  pub to: PathBuf,
}

impl RenamedFile {
  fn new(from: &str, to: &str) -> Self {
    Self {
      from: PathBuf::from(from),
      to: PathBuf::from(to),
    }
  }
}

/// Hardware-platform mirror repository layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
  /// Mirror repository root
  pub root: PathBuf,
  /// Pre-adapted manifests, `from` relative to the project root, `to` relative to the mirror root
  pub manifests: Vec<RenamedFile>,
  /// Hand-maintained umbrella header copied into the mirror source dir
  pub umbrella_header: PathBuf,
  /// Header tree in the project
  pub headers: PathBuf,
  /// Examples tree in the project
  pub examples: PathBuf,
  /// Source directory inside the mirror
  pub source_dir: PathBuf,
  /// Examples directory inside the mirror
  pub examples_dir: PathBuf,
}

impl Default for MirrorConfig {
  fn default() -> Self {
    Self {
      root: PathBuf::from("../etl-arduino"),
      manifests: vec![
        RenamedFile::new("arduino/library-arduino.json", "library.json"),
        RenamedFile::new("arduino/library-arduino.properties", "library.properties"),
      ],
      umbrella_header: PathBuf::from("arduino/Embedded_Template_Library.h"),
      headers: PathBuf::from("include"),
      examples: PathBuf::from("examples"),
      source_dir: PathBuf::from("src"),
      examples_dir: PathBuf::from("examples"),
    }
  }
}

/// Standalone zip package
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
  /// Staging directory and archive name (default: library name)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Directory receiving the staging directory and the archive
  pub output_dir: PathBuf,
  pub headers: PathBuf,
  pub umbrella_header: PathBuf,
  pub properties: PathBuf,
  /// File name of the properties manifest inside the archive
  #[serde(skip_serializing_if = "Option::is_none")]
  pub properties_as: Option<String>,
}

impl Default for PackageConfig {
  fn default() -> Self {
    Self {
      name: None,
      output_dir: PathBuf::from("scripts"),
      headers: PathBuf::from("include"),
      umbrella_header: PathBuf::from("arduino/Embedded_Template_Library.h"),
      properties: PathBuf::from("arduino/library-arduino.properties"),
      properties_as: Some("library.properties".to_string()),
    }
  }
}

/// What to do with a group descriptor that cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
  /// Stop the batch with an error
  #[default]
  Abort,
  /// Log, record as skipped, continue
  Skip,
}

/// API group pages for the documentation site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
  pub xml_dir: PathBuf,
  pub output_dir: PathBuf,
  /// Project name written into each directive
  pub project: String,
  pub on_malformed: MalformedPolicy,
}

impl Default for DocsConfig {
  fn default() -> Self {
    Self {
      xml_dir: PathBuf::from("docs/doxygen/xml"),
      output_dir: PathBuf::from("docs/groups"),
      project: "etl".to_string(),
      on_malformed: MalformedPolicy::Abort,
    }
  }
}

/// Generated-header verification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
  /// Templating tool executable
  pub command: String,
  /// Arguments; `{template}` and `{output}` are substituted per template
  pub args: Vec<String>,
  pub templates_dir: PathBuf,
  pub template_glob: String,
  /// Stem suffix removed to get the generated header's name
  pub template_suffix: String,
  pub generated_dir: PathBuf,
}

impl Default for CodegenConfig {
  fn default() -> Self {
    Self {
      command: "cog".to_string(),
      args: ["-d", "-e", "-o", "{output}", "{template}"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
      templates_dir: PathBuf::from("include/etl/generators"),
      template_glob: "*_generator.h".to_string(),
      template_suffix: "_generator".to_string(),
      generated_dir: PathBuf::from("include/etl"),
    }
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      library: LibraryConfig::default(),
      manifests: default_manifests(),
      mirror: MirrorConfig::default(),
      package: PackageConfig::default(),
      docs: DocsConfig::default(),
      codegen: CodegenConfig::default(),
    }
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config for a project root
  ///
  /// An explicit path must exist. Without one, the search locations are tried
  /// and the defaults are used when none exists.
  pub fn load(root: &Path, explicit: Option<&Path>) -> ReleaseResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        if !path.exists() {
          return Err(ReleaseError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
          }));
        }
        path.to_path_buf()
      }
      None => match Self::find_config_path(root) {
        Some(path) => path,
        None => {
          tracing::debug!(root = %root.display(), "no release.toml found, using defaults");
          return Ok(Self::default());
        }
      },
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate()?;
    tracing::debug!(path = %config_path.display(), "loaded configuration");

    Ok(config)
  }

  /// Save config to release.toml under the root
  pub fn save(&self, root: &Path) -> ReleaseResult<PathBuf> {
    let config_path = root.join("release.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }

  /// Validate configuration values that serde cannot check
  pub fn validate(&self) -> ReleaseResult<()> {
    if self.library.name.trim().is_empty() {
      return Err(ConfigError::MissingField {
        field: "library.name".to_string(),
      }
      .into());
    }

    if self.manifests.is_empty() {
      return Err(ConfigError::MissingField {
        field: "manifests".to_string(),
      }
      .into());
    }

    for manifest in &self.manifests {
      if manifest.format == ManifestFormat::Header {
        let markers = manifest.header_markers();
        if markers.major.is_empty() || markers.minor.is_empty() || markers.patch.is_empty() {
          return Err(
            ConfigError::Invalid {
              field: format!("manifests[{}].markers", manifest.path.display()),
              reason: "header markers must not be empty".to_string(),
            }
            .into(),
          );
        }
      }
      if manifest.format == ManifestFormat::Toml && manifest.toml_key().split('.').any(str::is_empty) {
        return Err(
          ConfigError::Invalid {
            field: format!("manifests[{}].key", manifest.path.display()),
            reason: format!("'{}' is not a dotted key path", manifest.toml_key()),
          }
          .into(),
        );
      }
    }

    if self.codegen.command.trim().is_empty() {
      return Err(ConfigError::MissingField {
        field: "codegen.command".to_string(),
      }
      .into());
    }

    Ok(())
  }

  /// Package name, falling back to the library name
  pub fn package_name(&self) -> &str {
    self.package.name.as_deref().unwrap_or(&self.library.name)
  }
}
