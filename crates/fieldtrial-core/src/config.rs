//! Typed model of a field trial testing config and its loaders
//!
//! The document maps each trial name to a list of platform-scoped variants.
//! Loading only checks structure (required keys, value types, no unknown
//! keys, unique trial names); tag tables and non-empty collections are
//! checked by the transformer, which knows which trial and entry it is
//! looking at.

use crate::error::{Error, Result, SchemaViolation, Violation};
use crate::ordered::OrderedMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A whole config document: trial name to platform variants, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrialConfig {
    trials: OrderedMap<Vec<PlatformConfig>>,
}

/// One platform-scoped variant of a trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Platform tags this variant applies to
    pub platforms: Vec<String>,

    /// Form-factor tags; empty means unrestricted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_factors: Vec<String>,

    /// Low-end device restriction, shared by every experiment below
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_low_end_device: Option<bool>,

    /// Experiment groups of this variant
    pub experiments: Vec<Experiment>,
}

/// One experiment group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experiment {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<OrderedMap<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_features: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_features: Option<Vec<String>>,

    /// Command-line switch that forces this group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forcing_flag: Option<String>,
}

/// Input format of a config document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick a format from a file extension; anything but `.yaml`/`.yml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }

    fn name(self) -> &'static str {
        match self {
            DocumentFormat::Json => "JSON",
            DocumentFormat::Yaml => "YAML",
        }
    }
}

fn structural(format: DocumentFormat, err: impl std::fmt::Display) -> Error {
    let detail = err.to_string();
    Error::SchemaViolation(
        SchemaViolation::new("$", format!("invalid {} trial config: {}", format.name(), detail))
            .with_violation(Violation::new(
                "structure",
                "a document matching the trial config schema",
                detail,
            )),
    )
}

impl TrialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| structural(DocumentFormat::Json, e))
    }

    pub fn from_json_slice(input: &[u8]) -> Result<Self> {
        serde_json::from_slice(input).map_err(|e| structural(DocumentFormat::Json, e))
    }

    /// Parse a YAML document
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        serde_yaml::from_str(input).map_err(|e| structural(DocumentFormat::Yaml, e))
    }

    /// Convert an already parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| structural(DocumentFormat::Json, e))
    }

    /// Parse a document in the given format
    pub fn parse(input: &str, format: DocumentFormat) -> Result<Self> {
        match format {
            DocumentFormat::Json => Self::from_json_str(input),
            DocumentFormat::Yaml => Self::from_yaml_str(input),
        }
    }

    /// Read and parse a file, choosing the format from its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = DocumentFormat::from_path(path);
        debug!(path = %path.display(), bytes = content.len(), ?format, "Loading trial config");
        Self::parse(&content, format)
    }

    /// Append a trial. Fails if the name is already taken.
    pub fn insert_trial(
        &mut self,
        name: impl Into<String>,
        entries: Vec<PlatformConfig>,
    ) -> Result<()> {
        let name = name.into();
        if self.trials.contains_key(&name) {
            return Err(Error::SchemaViolation(
                SchemaViolation::new(format!("$.{}", name), format!("duplicate trial '{}'", name))
                    .with_violation(Violation::new("unique_trial_name", "a unique trial name", name.clone())),
            ));
        }
        let _ = self.trials.insert(name, entries);
        Ok(())
    }

    /// Builder form of [`insert_trial`](Self::insert_trial)
    pub fn with_trial(mut self, name: impl Into<String>, entries: Vec<PlatformConfig>) -> Result<Self> {
        self.insert_trial(name, entries)?;
        Ok(self)
    }

    /// Trials in document order
    pub fn trials(&self) -> impl Iterator<Item = (&str, &[PlatformConfig])> + '_ {
        self.trials.iter().map(|(name, entries)| (name, entries.as_slice()))
    }

    pub fn trial(&self, name: &str) -> Option<&[PlatformConfig]> {
        self.trials.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}

impl PlatformConfig {
    pub fn new<I, S>(platforms: I, experiments: Vec<Experiment>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            platforms: platforms.into_iter().map(Into::into).collect(),
            form_factors: Vec::new(),
            is_low_end_device: None,
            experiments,
        }
    }

    pub fn with_form_factors<I, S>(mut self, form_factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.form_factors = form_factors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_low_end_device(mut self, is_low_end_device: bool) -> Self {
        self.is_low_end_device = Some(is_low_end_device);
        self
    }
}

impl Experiment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
            enable_features: None,
            disable_features: None,
            forcing_flag: None,
        }
    }

    /// Append a param; a repeated key keeps its first value
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.params.get_or_insert_with(OrderedMap::new).insert(key, value.into());
        self
    }

    pub fn with_enable_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enable_features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_disable_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disable_features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_forcing_flag(mut self, flag: impl Into<String>) -> Self {
        self.forcing_flag = Some(flag.into());
        self
    }
}
