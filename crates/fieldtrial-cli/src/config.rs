//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Command-line arguments, which win over both

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use fieldtrial_core::ElementsOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform tag used when `--platform` is not given
    pub default_platform: Option<String>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,

    /// Scope prefix for enum symbols in the emitted description
    pub symbol_prefix: String,

    /// Name of the element holding the studies
    pub element_name: String,
}

/// Logging configuration; unset values fall back to the verbosity flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter (trace, debug, info, warn, error or a RUST_LOG directive)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let elements = ElementsOptions::default();
        Self {
            format: "human".to_string(),
            color: true,
            symbol_prefix: elements.symbol_prefix,
            element_name: elements.element_name,
        }
    }
}

impl OutputConfig {
    /// Options for building the emitter document
    pub fn elements_options(&self) -> ElementsOptions {
        ElementsOptions::default()
            .with_element_name(self.element_name.clone())
            .with_symbol_prefix(self.symbol_prefix.clone())
    }

    /// The configured default output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_name(&self.format).ok_or_else(|| {
            Error::config(format!(
                "unknown output format '{}' (expected human, json, json-pretty or yaml)",
                self.format
            ))
        })
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::from_path(path) {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".fieldtrial.toml"),
            PathBuf::from(".fieldtrial.yaml"),
            PathBuf::from(".fieldtrial.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let dir = config_dir.join("fieldtrial");
            paths.push(dir.join("config.toml"));
            paths.push(dir.join("config.yaml"));
            paths.push(dir.join("config.json"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_platform, None);
        assert_eq!(config.output.format, "human");
        assert_eq!(config.output.elements_options(), ElementsOptions::default());
        assert_eq!(config.output.output_format().unwrap(), OutputFormat::Human);
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(
            ".toml",
            r#"
default_platform = "android"

[output]
format = "json-pretty"
symbol_prefix = ""

[logging]
level = "debug"
"#,
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.default_platform.as_deref(), Some("android"));
        assert_eq!(config.output.output_format().unwrap(), OutputFormat::JsonPretty);
        assert_eq!(config.output.symbol_prefix, "");
        assert_eq!(config.output.element_name, "kFieldTrialConfig");
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format, None);
    }

    #[test]
    fn test_load_yaml_and_json() {
        let yaml = write_config(".yaml", "default_platform: ios\noutput:\n  color: false\n");
        let config = Config::from_file(yaml.path()).unwrap();
        assert_eq!(config.default_platform.as_deref(), Some("ios"));
        assert!(!config.output.color);

        let json = write_config(".json", r#"{"output": {"element_name": "kTestingConfig"}}"#);
        let config = Config::from_file(json.path()).unwrap();
        assert_eq!(config.output.elements_options().element_name, "kTestingConfig");
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/fieldtrial.toml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_output_format() {
        let mut config = Config::default();
        config.output.format = "xml".to_string();
        assert!(matches!(config.output.output_format(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_with_explicit_file_propagates_parse_errors() {
        let file = write_config(".toml", "default_platform = [");
        let err = Config::load_with_file(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
