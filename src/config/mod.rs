//! Configuration for `semdoc.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [enhance], [output]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # config file lookup
//! └── mod.rs         # SemdocConfig (this file)
//! ```
//!
//! The file is optional: without one every section takes its defaults.
//! Command-line flags are applied on top of whatever was loaded.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{EnhanceConfig, OutputConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands, EnhanceArgs};
use crate::{debug, log};
use util::find_config_file;

/// Config file looked up when `-C` is not given.
pub const DEFAULT_CONFIG: &str = "semdoc.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing semdoc.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemdocConfig {
    /// Path the config was loaded from, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub enhance: EnhanceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl SemdocConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for `-C` or [`DEFAULT_CONFIG`]. A missing
    /// default file yields the defaults, a missing `-C` file is an error. CLI
    /// flags are then applied and the result validated.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let name = cli.config.as_deref().unwrap_or(Path::new(DEFAULT_CONFIG));
        let mut config = match (find_config_file(name), &cli.config) {
            (Some(path), _) => {
                debug!("config"; "loading {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            (None, Some(explicit)) => {
                return Err(ConfigError::NotFound(explicit.clone()));
            }
            (None, None) => {
                debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG);
                Self::default()
            }
        };

        config.apply_command_options(cli);
        config.validate().map_err(ConfigError::Diagnostics)?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Enhance { enhance, .. } => self.apply_enhance_args(enhance),
            Commands::Query {
                enhance, pretty, ..
            }
            | Commands::Navigate {
                enhance, pretty, ..
            } => {
                self.apply_enhance_args(enhance);
                self.output.pretty |= *pretty;
            }
        }
    }

    fn apply_enhance_args(&mut self, args: &EnhanceArgs) {
        if let Some(locale) = args.locale {
            self.enhance.locale = locale.tag().to_string();
        }
        Self::update_option(&mut self.enhance.absent_bid, args.absent_bid.as_ref());
        Self::update_option(&mut self.enhance.highlight_ms, args.highlight_ms.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, collecting all errors at once.
    pub fn validate(&self) -> Result<(), ConfigDiagnostics> {
        let mut diag = ConfigDiagnostics::new();
        self.enhance.validate(&mut diag);
        diag.into_result()
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a config snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SemdocConfig {
    let (parsed, ignored) = SemdocConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::AbsentBid;
    use crate::logger;
    use clap::Parser;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SemdocConfig::from_str("[enhance\nlocale = \"en-US\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[enhance]\nlocale = \"en-GB\"\ncolour = \"red\"\n[unknown_section]\nfield = 1";
        let (config, ignored) = SemdocConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.enhance.locale, "en-GB");
        assert!(ignored.iter().any(|f| f == "enhance.colour"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_from_path_warns_on_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("semdoc.toml");
        fs::write(&path, "[output]\npretty = true\nindent = 4\n").unwrap();

        logger::start_capture();
        let config = SemdocConfig::from_path(&path).unwrap();
        let lines = logger::take_captured();

        assert!(config.output.pretty);
        assert!(lines.iter().any(|l| l.starts_with("[warning]") && l.contains("output.indent")));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SemdocConfig::from_path(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("semdoc.toml");
        fs::write(
            &path,
            "[enhance]\nlocale = \"de-DE\"\nabsent_bid = \"null\"\nhighlight_ms = 300\n",
        )
        .unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::parse_from([
            "semdoc", "-C", &path_arg, "enhance", "doc.html", "--locale", "ja-JP",
        ]);
        let config = SemdocConfig::load(&cli).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.enhance.locale, "ja-JP");
        assert_eq!(config.enhance.absent_bid, AbsentBid::Null);
        assert_eq!(config.enhance.highlight_ms, 300);
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path_arg = dir.path().join("custom.toml").to_string_lossy().into_owned();

        let cli = Cli::parse_from(["semdoc", "-C", &path_arg, "enhance", "-"]);
        assert!(matches!(
            SemdocConfig::load(&cli),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_missing_explicit_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let path_arg = dir.path().join(DEFAULT_CONFIG).to_string_lossy().into_owned();

        let cli = Cli::parse_from(["semdoc", "-C", &path_arg, "enhance", "-"]);
        assert!(matches!(
            SemdocConfig::load(&cli),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("semdoc.toml");
        fs::write(&path, "[enhance]\nhighlight_ms = 0\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::parse_from(["semdoc", "-C", &path_arg, "navigate", "doc.html", "p1"]);
        assert!(matches!(
            SemdocConfig::load(&cli),
            Err(ConfigError::Diagnostics(_))
        ));
    }
}
