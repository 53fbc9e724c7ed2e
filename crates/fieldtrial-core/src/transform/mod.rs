//! Config-to-description transformer
//!
//! Resolves a [`TrialConfig`] for one target platform:
//!
//! 1. trials are visited in document order;
//! 2. every platform config of a trial is validated against the tag tables;
//! 3. the **first** platform config that lists the target platform is used,
//!    and a trial with no such config is left out of the description;
//! 4. each experiment of the selected config becomes an [`OutputExperiment`]
//!    that inherits the config's low-end-device flag and form factors.
//!
//! The transformation is pure. Any violation aborts the whole run; no partial
//! description is ever returned.
//!
//! ```
//! use fieldtrial_core::{transform, TrialConfig};
//!
//! let config = TrialConfig::from_json_str(
//!     r#"{"T": [{"platforms": ["windows"], "experiments": [{"name": "G1"}]}]}"#,
//! ).unwrap();
//! let description = transform(&config, "windows").unwrap();
//! assert_eq!(description.studies[0].experiments[0].name, "G1");
//! ```

mod context;
mod resolve;


pub use context::SchemaPath;

use crate::config::{Experiment, TrialConfig};
use crate::description::{Description, OutputExperiment, Param, Study};
use crate::error::Result;
use crate::symbols::Platform;
use resolve::{resolve_trial, select, unknown_tag, ResolvedEntry};
use tracing::{debug, info, instrument, trace};

/// Resolve `config` for the platform named by `platform`
///
/// Fails with a schema violation if `platform` is not a known platform tag.
pub fn transform(config: &TrialConfig, platform: &str) -> Result<Description> {
    let platform = parse_platform(platform)?;
    transform_for(config, platform)
}

/// Resolve `config` for an already parsed platform
#[instrument(skip_all, fields(platform = %platform, trials = config.len()))]
pub fn transform_for(config: &TrialConfig, platform: Platform) -> Result<Description> {
    let mut studies = Vec::new();
    let mut omitted = 0usize;

    for (name, entries) in config.trials() {
        let resolved = resolve_trial(entries, &SchemaPath::root().child(name))?;
        match select(&resolved, platform) {
            Some(entry) => {
                debug!(trial = name, entry = entry.index, "Selected platform config");
                studies.push(build_study(name, entry, platform));
            }
            None => {
                debug!(trial = name, "No platform config targets platform, omitting trial");
                omitted += 1;
            }
        }
    }

    info!(studies = studies.len(), omitted, "Resolved trial config");
    Ok(Description { studies })
}

/// Resolve `config` once per platform, in the order given
pub fn transform_all(
    config: &TrialConfig,
    platforms: &[Platform],
) -> Result<Vec<(Platform, Description)>> {
    platforms
        .iter()
        .map(|&platform| transform_for(config, platform).map(|d| (platform, d)))
        .collect()
}

/// Check every trial against the tag tables without picking a platform
pub fn validate(config: &TrialConfig) -> Result<()> {
    for (name, entries) in config.trials() {
        resolve_trial(entries, &SchemaPath::root().child(name))?;
    }
    debug!(trials = config.len(), "Trial config is valid");
    Ok(())
}

/// Parse a target platform tag, reporting failures as schema violations
///
/// The violation path is `platform`, which names the query rather than a
/// location inside the config document.
pub fn parse_platform(tag: &str) -> Result<Platform> {
    tag.parse::<Platform>()
        .map_err(|err| unknown_tag("platform", "platform_tag", err))
}

fn build_study(name: &str, entry: &ResolvedEntry<'_>, platform: Platform) -> Study {
    Study {
        name: name.to_string(),
        experiments: entry
            .experiments
            .iter()
            .map(|experiment| build_experiment(experiment, entry, platform))
            .collect(),
    }
}

fn build_experiment(
    experiment: &Experiment,
    entry: &ResolvedEntry<'_>,
    platform: Platform,
) -> OutputExperiment {
    trace!(experiment = %experiment.name, "Translating experiment");
    OutputExperiment {
        name: experiment.name.clone(),
        platforms: vec![platform],
        params: experiment
            .params
            .as_ref()
            .filter(|params| !params.is_empty())
            .map(|params| params.iter().map(|(k, v)| Param::new(k, v.as_str())).collect()),
        enable_features: experiment.enable_features.clone(),
        disable_features: experiment.disable_features.clone(),
        forcing_flag: experiment.forcing_flag.clone(),
        is_low_end_device: entry.is_low_end_device,
        form_factors: entry.form_factors.clone(),
    }
}
