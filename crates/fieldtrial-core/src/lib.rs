//! Fieldtrial Core - resolves field trial testing configs for code generation
//!
//! A field trial testing config maps each trial to platform-scoped variants.
//! This crate loads such a config into typed values and resolves it for one
//! target platform into a [`Description`]: the ordered studies, experiments,
//! and symbolic constants a code generator embeds into the built binary.
//!
//! # Main Components
//!
//! - **Config**: typed document model and JSON/YAML loaders ([`TrialConfig`])
//! - **Symbols**: closed tag tables for platforms, form factors and flags
//! - **Transform**: first-match platform selection and enum mapping
//! - **Description**: output model and the emitter-facing `elements` document
//! - **Error Handling**: every rejection is a [`SchemaViolation`] with a path
//!
//! # Example
//!
//! ```
//! use fieldtrial_core::{transform, ElementsOptions, Result, TrialConfig};
//!
//! fn example() -> Result<()> {
//!     let config = TrialConfig::from_json_str(r#"{
//!         "MyTrial": [
//!             {"platforms": ["android"], "form_factors": ["phone"],
//!              "experiments": [{"name": "Enabled", "enable_features": ["MyFeature"]}]}
//!         ]
//!     }"#)?;
//!     let description = transform(&config, "android")?;
//!     let elements = description.to_elements(&ElementsOptions::default());
//!     assert_eq!(
//!         elements["elements"]["kFieldTrialConfig"]["studies"][0]["name"],
//!         "MyTrial"
//!     );
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod config;
pub mod description;
pub mod error;
pub mod ordered;
pub mod symbols;
pub mod transform;

pub use config::{DocumentFormat, Experiment, PlatformConfig, TrialConfig};
pub use description::{
    Description, ElementsOptions, OutputExperiment, Param, Study, DEFAULT_ELEMENT_NAME,
    DEFAULT_SYMBOL_PREFIX,
};
pub use error::{Error, Result, SchemaViolation, Violation};
pub use ordered::OrderedMap;
pub use symbols::{FormFactor, OptionalBool, Platform, UnknownTag};
pub use transform::{parse_platform, transform, transform_all, transform_for, validate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_models_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrialConfig>();
        assert_send_sync::<Description>();
        assert_send_sync::<Error>();
    }
}
