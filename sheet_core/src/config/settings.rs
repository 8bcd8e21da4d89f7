//! Sheet settings: the world-level switches a derivation runs under

use super::{ConfigError, RuleTables};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Explicit configuration for a derivation pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetSettings {
    /// Recompute experience costs from aptitudes instead of summing stored costs
    #[serde(default)]
    pub auto_calc_xp_costs: bool,
    #[serde(default)]
    pub rules: RuleTables,
}

impl SheetSettings {
    /// Settings with automatic experience costing turned on
    pub fn auto_xp() -> Self {
        SheetSettings {
            auto_calc_xp_costs: true,
            ..Default::default()
        }
    }
}

/// Load and validate settings from a TOML file
pub fn load_settings(path: &Path) -> Result<SheetSettings, ConfigError> {
    let settings: SheetSettings = super::load_toml(path)?;
    settings.rules.validate()?;
    Ok(settings)
}

/// Parse and validate settings from a TOML string
pub fn parse_settings(content: &str) -> Result<SheetSettings, ConfigError> {
    let settings: SheetSettings = super::parse_toml(content)?;
    settings.rules.validate()?;
    Ok(settings)
}

/// Settings shipped with the crate
pub fn default_settings() -> SheetSettings {
    let toml = include_str!("../../config/sheet.toml");
    parse_settings(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "embedded sheet.toml rejected, using built-in tables");
        SheetSettings::default()
    })
}
