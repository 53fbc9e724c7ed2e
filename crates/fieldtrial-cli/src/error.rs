//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from fieldtrial-core
    #[error("{0}")]
    Core(#[from] fieldtrial_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No platform given on the command line or in the config file
    #[error("No target platform given. Pass --platform or set default_platform in the config file")]
    MissingPlatform,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(fieldtrial_core::Error::SchemaViolation(_)) => 2,
            Self::Core(fieldtrial_core::Error::Io { .. }) => 1,
            Self::FileNotFound { .. } => 3,
            Self::Config(_) => 5,
            Self::MissingPlatform => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::MissingPlatform)
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtrial_core::SchemaViolation;

    #[test]
    fn test_exit_codes() {
        let violation = Error::Core(fieldtrial_core::Error::SchemaViolation(SchemaViolation::new(
            "$.T[0].platforms[0]",
            "unknown platform tag 'atari'",
        )));
        assert_eq!(violation.exit_code(), 2);
        assert_eq!(Error::MissingPlatform.exit_code(), 6);
        assert_eq!(Error::FileNotFound { path: PathBuf::from("x") }.exit_code(), 3);
        assert!(Error::MissingPlatform.should_show_help());
        assert!(!violation.should_show_help());
    }

    #[test]
    fn test_format_error_without_color() {
        let error = Error::Core(fieldtrial_core::Error::violation("platform", "unknown platform tag 'atari'"));
        let formatted = format_error(&error, false);
        assert_eq!(
            formatted,
            "Error: Schema violation at 'platform': unknown platform tag 'atari'"
        );
    }
}
