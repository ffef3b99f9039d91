use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Settings for the `chainlog` binary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub format: OutputFormat,
    /// Colored terminal output.
    pub color: bool,
    /// Prompt printed by `chainlog shell`.
    pub prompt: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            format: OutputFormat::Text,
            color: true,
            prompt: "chainlog> ".into(),
        }
    }
}

impl CliConfig {
    /// Load settings from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config file (if any) with command line flags applied on top.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(format) = cli.format {
            config.format = format;
        }
        if cli.verbose {
            config.log_level = "debug".into();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert_eq!(c.log_level, "warn");
        assert_eq!(c.format, OutputFormat::Text);
        assert!(c.color);
        assert_eq!(c.prompt, "chainlog> ");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("format = \"json\"\ncolor = false\n");
        let c = CliConfig::load(file.path()).unwrap();
        assert_eq!(c.format, OutputFormat::Json);
        assert!(!c.color);
        assert_eq!(c.log_level, "warn");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("format = 42");
        assert!(CliConfig::load(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn flags_override_file() {
        let file = write_config("format = \"json\"\nlog_level = \"info\"\n");
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "chainlog", "--config", path, "--format", "text", "--verbose", "genesis",
        ])
        .unwrap();
        let c = CliConfig::resolve(&cli).unwrap();
        assert_eq!(c.format, OutputFormat::Text);
        assert_eq!(c.log_level, "debug");
    }
}
