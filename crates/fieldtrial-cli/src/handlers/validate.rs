//! Validate command handler

use super::load_trial_config;
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde_json::json;
use tracing::{info, instrument, warn};

/// Handle the validate command
#[instrument(skip_all, fields(file = %args.config_file.display()))]
pub fn handle_validate(args: ValidateArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &args.config_file.display().to_string());
    output.info(&format!("Validating trial config: {}", args.config_file.display()))?;

    let checked = load_trial_config(&args.config_file).and_then(|trials| {
        fieldtrial_core::validate(&trials)?;
        Ok(trials.len())
    });

    match checked {
        Ok(trials) => {
            info!(trials, "Validation completed successfully");
            output.success(&format!("✓ Trial config is valid ({} trials)", trials))?;
            if trials == 0 {
                output.warning("Trial config declares no trials")?;
            }
            if output.format() != OutputFormat::Human {
                output.data(&json!({ "valid": true, "trials": trials }))?;
            }
            Ok(())
        }
        Err(Error::Core(err)) => {
            let Some(violation) = err.as_violation() else {
                return Err(Error::Core(err));
            };
            warn!(path = %violation.path, rule = ?violation.rule(), "Validation failed");
            output.error("✗ Trial config validation failed")?;
            if output.format() == OutputFormat::Human {
                output.violation(violation)?;
            } else {
                output.data(&json!({ "valid": false, "violation": violation }))?;
            }
            Err(Error::Core(err))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::Captured;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_trials(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn run(format: OutputFormat, config_file: PathBuf) -> (Result<()>, String) {
        let captured = Captured::default();
        let mut output = OutputWriter::with_writer(format, false, false, Box::new(captured.clone()));
        let result = handle_validate(ValidateArgs { config_file }, &Config::default(), &mut output);
        (result, captured.text())
    }

    #[test]
    fn test_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_trials(
            &dir,
            "trials.yaml",
            "MyTrial:\n  - platforms: [linux]\n    experiments:\n      - name: Enabled\n",
        );

        let (result, text) = run(OutputFormat::Human, path);
        assert!(result.is_ok());
        assert!(text.contains("✓ Trial config is valid (1 trials)"));
    }

    #[test]
    fn test_empty_config_warns() {
        let dir = TempDir::new().unwrap();
        let path = write_trials(&dir, "trials.json", "{}");

        let (result, text) = run(OutputFormat::Human, path);
        assert!(result.is_ok());
        assert!(text.contains("WARNING: Trial config declares no trials"));
    }

    #[test]
    fn test_violation_in_untargeted_entry_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_trials(
            &dir,
            "trials.json",
            r#"{"Retro": [{"platforms": ["windows", "atari"], "experiments": [{"name": "A"}]}]}"#,
        );

        let (result, text) = run(OutputFormat::Human, path);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(text.contains("ERROR: ✗ Trial config validation failed"));
        assert!(text.contains("📍 Path: $.Retro[0].platforms[1]"));
        assert!(text.contains("Rule: platform_tag"));
    }

    #[test]
    fn test_json_report() {
        let dir = TempDir::new().unwrap();
        let path = write_trials(&dir, "trials.json", r#"{"Empty": []}"#);

        let (result, text) = run(OutputFormat::Json, path);
        assert!(result.is_err());
        let report: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(report["valid"], false);
        assert_eq!(report["violation"]["path"], "$.Empty");
        assert_eq!(report["violation"]["violation"]["rule"], "non_empty");
    }
}
