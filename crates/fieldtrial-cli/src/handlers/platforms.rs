//! Platforms command handler

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use fieldtrial_core::{FormFactor, Platform};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TagEntry {
    tag: &'static str,
    symbol: String,
}

#[derive(Debug, Serialize)]
struct TagListing {
    platforms: Vec<TagEntry>,
    form_factors: Vec<TagEntry>,
}

/// Handle the platforms command
pub fn handle_platforms(config: &Config, output: &mut OutputWriter) -> Result<()> {
    let options = config.output.elements_options();
    let listing = TagListing {
        platforms: Platform::ALL
            .iter()
            .map(|p| TagEntry {
                tag: p.tag(),
                symbol: format!("{}{}", options.symbol_prefix, p.symbol()),
            })
            .collect(),
        form_factors: FormFactor::ALL
            .iter()
            .map(|f| TagEntry {
                tag: f.tag(),
                symbol: format!("{}{}", options.symbol_prefix, f.symbol()),
            })
            .collect(),
    };

    if output.format() != OutputFormat::Human {
        return output.data(&listing);
    }

    output.section("Platforms")?;
    output.table(&["Tag", "Symbol"], rows(&listing.platforms))?;
    output.section("Form factors")?;
    output.table(&["Tag", "Symbol"], rows(&listing.form_factors))
}

fn rows(entries: &[TagEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| vec![e.tag.to_string(), e.symbol.clone()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::Captured;

    #[test]
    fn test_json_listing() {
        let captured = Captured::default();
        let mut output = OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(captured.clone()));
        handle_platforms(&Config::default(), &mut output).unwrap();

        let listing: serde_json::Value = serde_json::from_str(&captured.text()).unwrap();
        assert_eq!(listing["platforms"].as_array().unwrap().len(), Platform::ALL.len());
        assert_eq!(listing["platforms"][0]["tag"], "windows");
        assert_eq!(listing["platforms"][0]["symbol"], "Study::PLATFORM_WINDOWS");
        assert_eq!(listing["form_factors"][1]["symbol"], "Study::PHONE");
    }

    #[test]
    fn test_human_listing() {
        let captured = Captured::default();
        let mut output = OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(captured.clone()));
        handle_platforms(&Config::default(), &mut output).unwrap();

        let text = captured.text();
        assert!(text.contains("=== Platforms ==="));
        assert!(text.contains("android_webview │ Study::PLATFORM_ANDROID_WEBVIEW"));
        assert!(text.contains("=== Form factors ==="));
    }
}
