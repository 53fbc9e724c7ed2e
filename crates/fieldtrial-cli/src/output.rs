//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with dedicated
//! renderings for resolved descriptions and schema violations.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use fieldtrial_core::{Description, OutputExperiment, Platform, SchemaViolation};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a resolved description; machine formats get `elements`
    fn format_description(
        &self,
        description: &Description,
        platform: Platform,
        elements: &serde_json::Value,
    ) -> Result<String>;

    /// Format a schema violation
    fn format_violation(&self, violation: &SchemaViolation) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_description(
        &self,
        description: &Description,
        platform: Platform,
        elements: &serde_json::Value,
    ) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_description_human(description, platform)),
            _ => self.format(elements),
        }
    }

    fn format_violation(&self, violation: &SchemaViolation) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_violation_human(violation)),
            _ => self.format(violation),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.write_formatted(&formatted)
    }

    /// Write a resolved description
    pub fn description(
        &mut self,
        description: &Description,
        platform: Platform,
        elements: &serde_json::Value,
    ) -> Result<()> {
        let formatted = self.format.format_description(description, platform, elements)?;
        self.write_formatted(&formatted)
    }

    /// Write a schema violation
    pub fn violation(&mut self, violation: &SchemaViolation) -> Result<()> {
        let formatted = self.format.format_violation(violation)?;
        self.write_formatted(&formatted)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.len()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => format!("{:width$}", cell, width = *width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }

    // Human output ends with a newline; machine formats are written as-is
    fn write_formatted(&mut self, formatted: &str) -> Result<()> {
        if self.format == OutputFormat::Human || self.format == OutputFormat::JsonPretty {
            self.writeln(formatted.trim_end_matches('\n'))
        } else {
            self.write(formatted)
        }
    }
}

/// Format a description for human reading
fn format_description_human(description: &Description, platform: Platform) -> String {
    let mut output = String::new();

    output.push_str(&format!("═══ {} ({}) ═══\n", platform, platform.symbol()));

    if description.is_empty() {
        output.push_str("No studies target this platform\n");
        return output;
    }

    output.push_str(&format!(
        "{} studies, {} experiments\n",
        description.len(),
        description.experiment_count()
    ));

    for study in description {
        output.push('\n');
        output.push_str(&format!("📦 {}\n", study.name));
        for experiment in &study.experiments {
            output.push_str(&format_experiment_human(experiment));
        }
    }

    output
}

fn format_experiment_human(experiment: &OutputExperiment) -> String {
    let mut output = format!("  • {}\n", experiment.name);

    if let Some(params) = &experiment.params {
        let pairs: Vec<String> = params
            .iter()
            .map(|p| format!("{}={}", p.key, p.value))
            .collect();
        output.push_str(&format!("      Params: {}\n", pairs.join(", ")));
    }
    if let Some(features) = &experiment.enable_features {
        output.push_str(&format!("      Enable: {}\n", features.join(", ")));
    }
    if let Some(features) = &experiment.disable_features {
        output.push_str(&format!("      Disable: {}\n", features.join(", ")));
    }
    if let Some(flag) = &experiment.forcing_flag {
        output.push_str(&format!("      Forcing flag: {}\n", flag));
    }
    output.push_str(&format!(
        "      Low-end device: {}\n",
        experiment.is_low_end_device.symbol()
    ));
    if !experiment.form_factors.is_empty() {
        let symbols: Vec<&str> = experiment.form_factors.iter().map(|f| f.symbol()).collect();
        output.push_str(&format!("      Form factors: {}\n", symbols.join(", ")));
    }

    output
}

/// Format a schema violation for human reading
fn format_violation_human(violation: &SchemaViolation) -> String {
    let mut output = String::new();

    output.push_str(&format!("📍 Path: {}\n", violation.path));
    output.push_str(&format!("💬 Message: {}\n", violation.message));

    if let Some(rule) = &violation.violation {
        output.push_str(&format!("  • Rule: {}\n", rule.rule));
        output.push_str(&format!("    Expected: {}\n", rule.expected));
        output.push_str(&format!("    Actual: {}\n", rule.actual));
    }

    output
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// A writer that keeps everything written to it
    #[derive(Clone, Default)]
    pub struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtrial_core::{
        transform, ElementsOptions, Experiment, PlatformConfig, TrialConfig, Violation,
    };
    use super::test_support::Captured;

    fn writer(format: OutputFormat) -> (OutputWriter, Captured) {
        let captured = Captured::default();
        let writer = OutputWriter::with_writer(format, false, false, Box::new(captured.clone()));
        (writer, captured)
    }

    fn sample_description() -> Description {
        let config = TrialConfig::new()
            .with_trial(
                "MyTrial",
                vec![PlatformConfig::new(
                    ["android"],
                    vec![Experiment::new("Enabled")
                        .with_param("x", "1")
                        .with_enable_features(["MyFeature"])],
                )
                .with_form_factors(["phone"])],
            )
            .unwrap();
        transform(&config, "android").unwrap()
    }

    #[test]
    fn test_description_human() {
        let description = sample_description();
        let formatted = format_description_human(&description, Platform::Android);
        assert!(formatted.starts_with("═══ android (PLATFORM_ANDROID) ═══"));
        assert!(formatted.contains("1 studies, 1 experiments"));
        assert!(formatted.contains("📦 MyTrial"));
        assert!(formatted.contains("  • Enabled"));
        assert!(formatted.contains("Params: x=1"));
        assert!(formatted.contains("Enable: MyFeature"));
        assert!(formatted.contains("Low-end device: OPTIONAL_BOOL_MISSING"));
        assert!(formatted.contains("Form factors: PHONE"));
    }

    #[test]
    fn test_empty_description_human() {
        let formatted = format_description_human(&Description::default(), Platform::Fuchsia);
        assert!(formatted.contains("No studies target this platform"));
    }

    #[test]
    fn test_description_json_writes_elements() {
        let description = sample_description();
        let elements = description.to_elements(&ElementsOptions::default());
        let (mut output, captured) = writer(OutputFormat::Json);
        output.description(&description, Platform::Android, &elements).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&captured.text()).unwrap();
        assert_eq!(parsed, elements);
    }

    #[test]
    fn test_violation_human() {
        let violation = SchemaViolation::new("$.T[0].platforms[0]", "unknown platform tag 'atari'")
            .with_violation(Violation::new("platform_tag", "one of: windows", "atari"));
        let formatted = format_violation_human(&violation);
        assert!(formatted.contains("📍 Path: $.T[0].platforms[0]"));
        assert!(formatted.contains("• Rule: platform_tag"));
        assert!(formatted.contains("Actual: atari"));
    }

    #[test]
    fn test_violation_yaml() {
        let violation = SchemaViolation::new("platform", "unknown platform tag 'atari'");
        let formatted = OutputFormat::Yaml.format_violation(&violation).unwrap();
        assert!(formatted.contains("path: platform"));
    }

    #[test]
    fn test_messages_suppressed_for_machine_formats() {
        let (mut output, captured) = writer(OutputFormat::Json);
        output.info("loading").unwrap();
        output.success("done").unwrap();
        output.section("Details").unwrap();
        assert_eq!(captured.text(), "");
    }

    #[test]
    fn test_quiet_suppresses_info_but_not_errors() {
        let captured = Captured::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(captured.clone()));
        output.info("loading").unwrap();
        output.error("failed").unwrap();
        assert_eq!(captured.text(), "ERROR: failed\n");
    }

    #[test]
    fn test_table() {
        let (mut output, captured) = writer(OutputFormat::Human);
        output
            .table(
                &["Tag", "Symbol"],
                vec![vec!["mac".to_string(), "PLATFORM_MAC".to_string()]],
            )
            .unwrap();
        let text = captured.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Tag │ Symbol");
        assert_eq!(lines[2], "mac │ PLATFORM_MAC");
    }
}
