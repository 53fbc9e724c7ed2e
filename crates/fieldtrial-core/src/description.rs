//! Resolved, platform-specific description of the studies in a config
//!
//! This is what the code generator consumes. Field names and nesting are
//! fixed: the generator walks the structure by key name.

use crate::symbols::{FormFactor, OptionalBool, Platform};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Default name of the generated array element
pub const DEFAULT_ELEMENT_NAME: &str = "kFieldTrialConfig";

/// Default namespace prefix applied to symbols in generated code
pub const DEFAULT_SYMBOL_PREFIX: &str = "Study::";

/// Ordered list of studies resolved for one platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Description {
    pub studies: Vec<Study>,
}

/// One trial after platform resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Study {
    pub name: String,
    pub experiments: Vec<OutputExperiment>,
}

/// One experiment group with its inherited platform-config flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputExperiment {
    pub name: String,

    /// Always the single queried platform
    pub platforms: Vec<Platform>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Param>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_features: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_features: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forcing_flag: Option<String>,

    pub is_low_end_device: OptionalBool,

    pub form_factors: Vec<FormFactor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub key: String,
    pub value: String,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Shape of the emitter-facing document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementsOptions {
    /// Key under `elements` holding the studies
    pub element_name: String,
    /// Prepended to every symbol; empty for bare symbols
    pub symbol_prefix: String,
}

impl Default for ElementsOptions {
    fn default() -> Self {
        Self {
            element_name: DEFAULT_ELEMENT_NAME.to_string(),
            symbol_prefix: DEFAULT_SYMBOL_PREFIX.to_string(),
        }
    }
}

impl ElementsOptions {
    /// Symbols without a namespace prefix
    pub fn bare() -> Self {
        Self {
            symbol_prefix: String::new(),
            ..Self::default()
        }
    }

    pub fn with_element_name(mut self, name: impl Into<String>) -> Self {
        self.element_name = name.into();
        self
    }

    pub fn with_symbol_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.symbol_prefix = prefix.into();
        self
    }

    fn symbol(&self, symbol: &str) -> Value {
        Value::String(format!("{}{}", self.symbol_prefix, symbol))
    }
}

impl Description {
    pub fn len(&self) -> usize {
        self.studies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Study> {
        self.studies.iter()
    }

    pub fn study(&self, name: &str) -> Option<&Study> {
        self.studies.iter().find(|s| s.name == name)
    }

    /// Total experiment count across all studies
    pub fn experiment_count(&self) -> usize {
        self.studies.iter().map(|s| s.experiments.len()).sum()
    }

    /// Build `{"elements": {<element_name>: {"studies": [...]}}}`
    pub fn to_elements(&self, options: &ElementsOptions) -> Value {
        let studies: Vec<Value> = self
            .studies
            .iter()
            .map(|study| {
                json!({
                    "name": study.name,
                    "experiments": study
                        .experiments
                        .iter()
                        .map(|e| experiment_value(e, options))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        let mut elements = Map::new();
        elements.insert(options.element_name.clone(), json!({ "studies": studies }));
        json!({ "elements": elements })
    }
}

impl<'a> IntoIterator for &'a Description {
    type Item = &'a Study;
    type IntoIter = std::slice::Iter<'a, Study>;

    fn into_iter(self) -> Self::IntoIter {
        self.studies.iter()
    }
}

fn experiment_value(experiment: &OutputExperiment, options: &ElementsOptions) -> Value {
    let mut out = Map::new();
    out.insert("name".into(), Value::String(experiment.name.clone()));
    out.insert(
        "platforms".into(),
        Value::Array(experiment.platforms.iter().map(|p| options.symbol(p.symbol())).collect()),
    );
    if let Some(params) = &experiment.params {
        out.insert(
            "params".into(),
            Value::Array(params.iter().map(|p| json!({"key": p.key, "value": p.value})).collect()),
        );
    }
    if let Some(features) = &experiment.enable_features {
        out.insert("enable_features".into(), json!(features));
    }
    if let Some(features) = &experiment.disable_features {
        out.insert("disable_features".into(), json!(features));
    }
    if let Some(flag) = &experiment.forcing_flag {
        out.insert("forcing_flag".into(), Value::String(flag.clone()));
    }
    out.insert(
        "is_low_end_device".into(),
        options.symbol(experiment.is_low_end_device.symbol()),
    );
    out.insert(
        "form_factors".into(),
        Value::Array(experiment.form_factors.iter().map(|f| options.symbol(f.symbol())).collect()),
    );
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Description {
        Description {
            studies: vec![Study {
                name: "T".to_string(),
                experiments: vec![OutputExperiment {
                    name: "G1".to_string(),
                    platforms: vec![Platform::Windows],
                    params: Some(vec![Param::new("x", "1")]),
                    enable_features: None,
                    disable_features: Some(vec!["F".to_string()]),
                    forcing_flag: None,
                    is_low_end_device: OptionalBool::Missing,
                    form_factors: vec![FormFactor::Desktop, FormFactor::Phone],
                }],
            }],
        }
    }

    #[test]
    fn test_serialize_uses_bare_symbols_and_skips_absent_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({"studies": [{"name": "T", "experiments": [{
                "name": "G1",
                "platforms": ["PLATFORM_WINDOWS"],
                "params": [{"key": "x", "value": "1"}],
                "disable_features": ["F"],
                "is_low_end_device": "OPTIONAL_BOOL_MISSING",
                "form_factors": ["DESKTOP", "PHONE"]
            }]}]})
        );
    }

    #[test]
    fn test_elements_envelope_with_prefix() {
        let value = sample().to_elements(&ElementsOptions::default());
        let experiment = &value["elements"]["kFieldTrialConfig"]["studies"][0]["experiments"][0];
        assert_eq!(experiment["platforms"], json!(["Study::PLATFORM_WINDOWS"]));
        assert_eq!(experiment["is_low_end_device"], "Study::OPTIONAL_BOOL_MISSING");
        assert_eq!(experiment["form_factors"], json!(["Study::DESKTOP", "Study::PHONE"]));
        assert!(experiment.get("enable_features").is_none());
        assert!(experiment.get("forcing_flag").is_none());
    }

    #[test]
    fn test_elements_envelope_bare_and_renamed() {
        let options = ElementsOptions::bare().with_element_name("kTestConfig");
        let value = sample().to_elements(&options);
        let experiment = &value["elements"]["kTestConfig"]["studies"][0]["experiments"][0];
        assert_eq!(experiment["platforms"], json!(["PLATFORM_WINDOWS"]));
    }

    #[test]
    fn test_empty_description() {
        let description = Description::default();
        assert!(description.is_empty());
        assert_eq!(
            description.to_elements(&ElementsOptions::default()),
            json!({"elements": {"kFieldTrialConfig": {"studies": []}}})
        );
    }

    #[test]
    fn test_lookup_helpers() {
        let description = sample();
        assert_eq!(description.len(), 1);
        assert_eq!(description.experiment_count(), 1);
        assert!(description.study("T").is_some());
        assert!(description.study("missing").is_none());
        assert_eq!((&description).into_iter().count(), 1);
    }
}
