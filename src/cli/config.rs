//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep their lab setup in a file:
//!
//! ```toml
//! # chargelog.toml
//! [analysis]
//! cd_pattern = 2
//! ir_pattern = 1
//! cycles = [1, 2]
//! pad = "zero"
//!
//! [instrument]
//! revision = "sd8"
//!
//! [paths]
//! import_dir = "./untreated"
//! result_dir = "./result"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use chargelog::export::PadPolicy;
use chargelog::record::{ColumnLayout, InstrumentRevision};

/// Root configuration structure for chargelog.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisSection,

    /// Input file layout.
    #[serde(default)]
    pub instrument: InstrumentSection,

    /// Working directories.
    #[serde(default)]
    pub paths: PathsSection,
}

/// `[analysis]` section.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisSection {
    /// Pattern drawn as charge/discharge curves.
    pub cd_pattern: Option<u32>,

    /// Pattern that probes internal resistance.
    pub ir_pattern: Option<u32>,

    /// Cycles to aggregate.
    pub cycles: Option<Vec<u32>>,

    /// Padding of the exported table.
    pub pad: Option<PadPolicy>,

    /// Abort when the resistance fit fails.
    pub strict_resistance: Option<bool>,
}

/// `[instrument]` section.
#[derive(Debug, Default, Deserialize)]
pub struct InstrumentSection {
    /// Firmware revision preset.
    pub revision: Option<InstrumentRevision>,

    /// Header length override.
    pub header_lines: Option<usize>,

    /// Delimiter override (single ASCII character).
    pub delimiter: Option<char>,
}

/// `[paths]` section.
#[derive(Debug, Default, Deserialize)]
pub struct PathsSection {
    /// Directory of unprocessed logs.
    pub import_dir: Option<PathBuf>,

    /// Directory of exported tables and the history log.
    pub result_dir: Option<PathBuf>,

    /// Directory of rendered plots.
    pub figure_dir: Option<PathBuf>,

    /// Directory processed logs are moved to.
    pub rawdata_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Load configuration from an optional path, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Column layout for the given revision (CLI value wins over the file).
    pub fn layout(&self, revision: Option<InstrumentRevision>) -> Result<ColumnLayout> {
        let revision = revision.or(self.instrument.revision).unwrap_or_default();
        let mut layout = ColumnLayout::for_revision(revision);

        if let Some(header_lines) = self.instrument.header_lines {
            layout = layout.with_header_lines(header_lines);
        }
        if let Some(delimiter) = self.instrument.delimiter {
            let byte = u8::try_from(delimiter)
                .ok()
                .filter(u8::is_ascii)
                .with_context(|| format!("Delimiter must be a single ASCII character, got {:?}", delimiter))?;
            layout = layout.with_delimiter(byte);
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [analysis]
            cd_pattern = 3
            ir_pattern = 4
            cycles = [1, 5, 10]
            pad = "empty"
            strict_resistance = true

            [instrument]
            revision = "sd8-legacy"
            header_lines = 17
            delimiter = ";"

            [paths]
            import_dir = "in"
            result_dir = "out"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.analysis.cd_pattern, Some(3));
        assert_eq!(config.analysis.ir_pattern, Some(4));
        assert_eq!(config.analysis.cycles, Some(vec![1, 5, 10]));
        assert_eq!(config.analysis.pad, Some(PadPolicy::Empty));
        assert_eq!(config.analysis.strict_resistance, Some(true));
        assert_eq!(config.instrument.revision, Some(InstrumentRevision::Sd8Legacy));
        assert_eq!(config.paths.import_dir, Some(PathBuf::from("in")));
        assert_eq!(config.paths.figure_dir, None);

        let layout = config.layout(None).unwrap();
        assert_eq!(layout.header_lines, 17);
        assert_eq!(layout.delimiter, b';');
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [analysis]
            cycles = [2, 3]
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.analysis.cycles, Some(vec![2, 3]));
        assert_eq!(config.analysis.cd_pattern, None);
        assert_eq!(config.layout(None).unwrap(), ColumnLayout::default());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.analysis.cd_pattern, None);
        assert_eq!(config.instrument.revision, None);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = Config::from_str("[instrument]\ndelimiter = \"、\"").unwrap();
        assert!(config.layout(None).is_err());
    }
}
