//! Transform command handler

use super::load_trial_config;
use crate::cli::TransformArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use fieldtrial_core::{parse_platform, transform_for};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Handle the transform command
#[instrument(skip_all, fields(file = %args.config_file.display()))]
pub fn handle_transform(args: TransformArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("transform_command", &args.config_file.display().to_string());

    let tag = args
        .platform
        .as_deref()
        .or(config.default_platform.as_deref())
        .ok_or(Error::MissingPlatform)?;
    let platform = parse_platform(tag)?;

    let trial_config = load_trial_config(&args.config_file)?;
    let description = transform_for(&trial_config, platform)?;

    let mut options = config.output.elements_options();
    if args.bare_symbols {
        options = options.with_symbol_prefix("");
    }
    let elements = description.to_elements(&options);

    info!(
        platform = %platform,
        studies = description.len(),
        experiments = description.experiment_count(),
        "Description resolved"
    );

    match &args.save_to {
        Some(path) => {
            save_elements(path, &elements)?;
            output.success(&format!(
                "✓ Wrote {} studies for {} to {}",
                description.len(),
                platform,
                path.display()
            ))?;
        }
        None => output.description(&description, platform, &elements)?,
    }

    debug!(elapsed_ms = timer.elapsed().as_millis() as u64, "Transform finished");
    Ok(())
}

/// Write the elements document, as YAML for `.yaml`/`.yml` and JSON otherwise
fn save_elements(path: &Path, elements: &serde_json::Value) -> Result<()> {
    let content = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::to_string(elements)?,
        _ => {
            let mut json = serde_json::to_string_pretty(elements)?;
            json.push('\n');
            json
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), "Description saved");
    Ok(())
}
