use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{MigrationNames, PrinterOptions};

/// Engine configuration as read from an `etm.json` file.
///
/// Missing sections fall back to the defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EtmConfig {
    pub names: MigrationNames,
    pub printer: PrinterOptions,
}

pub fn parse_config(text: &str) -> Result<EtmConfig> {
    let config: EtmConfig =
        serde_json::from_str(text).context("failed to parse etm configuration")?;
    validate(&config)?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<EtmConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn validate(config: &EtmConfig) -> Result<()> {
    let names = &config.names;
    if names.legacy_module.is_empty() || names.helpers_module.is_empty() {
        bail!("module sources must not be empty");
    }
    if names.plain_setup == names.rendering_setup {
        bail!(
            "plain and rendering setup names must differ (both are '{}')",
            names.plain_setup
        );
    }
    if names.render_helpers.iter().any(|h| h.is_empty()) {
        bail!("render helper names must not be empty");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
