//! Error types for the Fieldtrial core library
//!
//! Every way a configuration can be rejected is a schema violation: unknown
//! platform or form-factor tags, empty required collections, and structural
//! problems found while loading the document. Violations carry the location
//! of the offending value so the config author can fix it directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Fieldtrial operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration does not conform to the trial config schema
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),

    /// Reading a configuration file failed
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a schema violation at `path`
    pub fn violation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaViolation(SchemaViolation::new(path, message))
    }

    /// The schema violation, if this is one
    pub fn as_violation(&self) -> Option<&SchemaViolation> {
        match self {
            Self::SchemaViolation(v) => Some(v),
            Self::Io { .. } => None,
        }
    }
}

/// A single rule that the input broke
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The rule that was violated
    pub rule: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl Violation {
    pub fn new(
        rule: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule '{}' violated: expected {}, but found {}",
            self.rule, self.expected, self.actual
        )
    }
}

/// Schema violation with the location of the offending value
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// Path to the offending value, e.g. `$.MyTrial[1].platforms[0]`
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// The broken rule, when one applies
    pub violation: Option<Violation>,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            violation: None,
        }
    }

    /// Attach the violated rule
    pub fn with_violation(mut self, violation: Violation) -> Self {
        self.violation = Some(violation);
        self
    }

    /// Name of the violated rule, if any
    pub fn rule(&self) -> Option<&str> {
        self.violation.as_ref().map(|v| v.rule.as_str())
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema violation at '{}': {}", self.path, self.message)?;
        if let Some(violation) = &self.violation {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display_includes_path_and_rule() {
        let err = Error::SchemaViolation(
            SchemaViolation::new("$.Trial[0].platforms[0]", "unknown platform tag 'atari'")
                .with_violation(Violation::new("platform_tag", "one of: windows, mac", "atari")),
        );
        let text = err.to_string();
        assert!(text.contains("$.Trial[0].platforms[0]"));
        assert!(text.contains("atari"));
        assert!(text.contains("Rule 'platform_tag' violated"));
    }

    #[test]
    fn test_as_violation() {
        let err = Error::violation("$", "bad");
        assert_eq!(err.as_violation().map(|v| v.path.as_str()), Some("$"));
        assert_eq!(err.as_violation().and_then(|v| v.rule()), None);

        let io = Error::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(io.as_violation().is_none());
        assert!(io.to_string().contains("missing.json"));
    }
}
