//! Command handlers for the CLI
//!
//! Each submodule implements one subcommand.

mod completions;
mod platforms;
mod transform;
mod validate;

pub use completions::handle_completions;
pub use platforms::handle_platforms;
pub use transform::handle_transform;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use fieldtrial_core::TrialConfig;
use std::path::Path;
use tracing::debug;

/// Load a trial config, reporting a missing file as such
pub(crate) fn load_trial_config(path: &Path) -> Result<TrialConfig> {
    let _timer = Timer::with_details("load_trial_config", &path.display().to_string());
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let config = TrialConfig::from_path(path)?;
    debug!(trials = config.len(), "Trial config loaded");
    Ok(config)
}
