//! Configuration file support for bom-engine.
//!
//! Provides YAML-based configuration through `bom-engine.config.yml` files,
//! and the merge of CLI flags, config values and built-in defaults.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::OutputFormat;
use crate::bom_analysis::domain::{
    DEFAULT_ROUND_DECIMALS, DEFAULT_VARIANCE_THRESHOLD_PERCENT, MAX_ROUND_DECIMALS,
};
use crate::bom_analysis::services::DEFAULT_MAX_DEPTH;
use crate::shared::security::read_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bom-engine.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
    pub max_depth: Option<u8>,
    pub round_decimals: Option<u8>,
    pub variance_threshold_percent: Option<f64>,
    pub fail_on_warning: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    eprintln!("📄 Auto-discovered config file: {}", config_path.display());
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_depth == Some(0) {
        bail!(
            "Invalid config: max_depth must be at least 1.\n\n\
             💡 Hint: Use max_depth: 1 to return only the BOM's own lines."
        );
    }

    if let Some(round_decimals) = config.round_decimals {
        if round_decimals > MAX_ROUND_DECIMALS {
            bail!(
                "Invalid config: round_decimals must be at most {}, got {}.",
                MAX_ROUND_DECIMALS,
                round_decimals
            );
        }
    }

    if let Some(threshold) = config.variance_threshold_percent {
        if !threshold.is_finite() || threshold < 0.0 {
            bail!(
                "Invalid config: variance_threshold_percent must be a non-negative number, got {}.",
                threshold
            );
        }
    }

    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}

/// Values given on the command line; `None` means "not specified"
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub format: Option<OutputFormat>,
    pub max_depth: Option<u8>,
    pub round_decimals: Option<u8>,
    pub variance_threshold_percent: Option<f64>,
    pub fail_on_warning: bool,
}

/// Effective settings after applying CLI > config file > defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub max_depth: u8,
    pub round_decimals: u8,
    pub variance_threshold_percent: f64,
    pub fail_on_warning: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            round_decimals: DEFAULT_ROUND_DECIMALS,
            variance_threshold_percent: DEFAULT_VARIANCE_THRESHOLD_PERCENT,
            fail_on_warning: false,
        }
    }
}

impl Settings {
    pub fn resolve(overrides: &SettingsOverrides, config: Option<&ConfigFile>) -> Self {
        let defaults = Self::default();

        Self {
            format: overrides
                .format
                .or_else(|| config.and_then(|c| c.format))
                .unwrap_or(defaults.format),
            max_depth: overrides
                .max_depth
                .or_else(|| config.and_then(|c| c.max_depth))
                .unwrap_or(defaults.max_depth),
            round_decimals: overrides
                .round_decimals
                .or_else(|| config.and_then(|c| c.round_decimals))
                .unwrap_or(defaults.round_decimals),
            variance_threshold_percent: overrides
                .variance_threshold_percent
                .or_else(|| config.and_then(|c| c.variance_threshold_percent))
                .unwrap_or(defaults.variance_threshold_percent),
            fail_on_warning: overrides.fail_on_warning
                || config.and_then(|c| c.fail_on_warning).unwrap_or(false),
        }
    }
}
