//! Planner and mission configuration with documented constants
//!
//! All tunable numbers and content identifiers the AI relies on are
//! collected here. Values load from TOML (see `data/ai.toml`); every
//! section falls back to its defaults when omitted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{AiError, Result};
use crate::core::types::Tick;

/// Settings for the starmap discovery and satellite planner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    // === FLEET SELECTION ===
    /// Minimum fleet radar range able to resolve one exploration cell
    ///
    /// Fleets below this range are ignored when picking an explorer, and
    /// the planner falls back to building a discovery fleet instead.
    pub fleet_radar_unit_size: i32,

    // === PRODUCTION ===
    /// Satellites ordered when no satellite type is in inventory
    pub satellite_order_quantity: u32,

    /// Standalone radar items ordered when none are in stock
    pub radar_order_quantity: u32,

    /// Ships ordered when a radar-capable hull is missing
    pub ship_order_quantity: u32,

    // === CONTENT IDENTIFIERS ===
    /// Building type that can launch new fleets
    pub military_spaceport_id: String,

    /// Lower-priority spaceport that may be demolished to make room
    pub traders_spaceport_id: String,

    /// Name given to fleets created for exploration
    pub discovery_fleet_name: String,

    /// Attribute key holding radar strength on equipment
    pub radar_attribute: String,

    /// Attribute key holding detector strength on satellites
    pub detector_attribute: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            fleet_radar_unit_size: 1,
            satellite_order_quantity: 10,
            radar_order_quantity: 5,
            ship_order_quantity: 1,
            military_spaceport_id: "MilitarySpaceport".to_string(),
            traders_spaceport_id: "TradersSpaceport".to_string(),
            discovery_fleet_name: "Discovery fleet".to_string(),
            radar_attribute: "radar".to_string(),
            detector_attribute: "detector".to_string(),
        }
    }
}

/// Settings shared by scripted missions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// Hours a task stays open before its deadline fails it
    ///
    /// 168 hours is one in-game week.
    pub deadline_hours: Tick,

    /// Real-time delay before finished objectives are hidden (milliseconds)
    pub hide_delay_ms: u64,

    /// Campaign level on which the spy report quest runs
    pub spy_report_level: u32,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            deadline_hours: 7 * 24,
            hide_delay_ms: 13_000,
            spy_report_level: 2,
        }
    }
}

/// Complete AI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub missions: MissionConfig,
}

impl AiConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AiConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let d = &self.discovery;

        if d.fleet_radar_unit_size < 0 {
            return Err(AiError::InvalidConfig(format!(
                "fleet_radar_unit_size ({}) must not be negative",
                d.fleet_radar_unit_size
            )));
        }

        if d.satellite_order_quantity == 0 || d.radar_order_quantity == 0 || d.ship_order_quantity == 0 {
            return Err(AiError::InvalidConfig(
                "production order quantities must be positive".into(),
            ));
        }

        if d.military_spaceport_id == d.traders_spaceport_id {
            return Err(AiError::InvalidConfig(format!(
                "military and traders spaceport share the id {}",
                d.military_spaceport_id
            )));
        }

        if self.missions.deadline_hours == 0 {
            return Err(AiError::InvalidConfig("deadline_hours must be positive".into()));
        }

        Ok(())
    }
}

/// Load and validate the AI configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AiConfig> {
    let contents = fs::read_to_string(path)?;
    let config = AiConfig::from_toml_str(&contents)?;
    tracing::debug!("Loaded AI config from {:?}", path);
    Ok(config)
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<AiConfig> = OnceLock::new();

/// Get the global AI config (initializes with defaults if not set)
pub fn config() -> &'static AiConfig {
    CONFIG.get_or_init(AiConfig::default)
}

/// Set the global AI config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: AiConfig) -> std::result::Result<(), AiConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.discovery.satellite_order_quantity, 10);
        assert_eq!(config.missions.deadline_hours, 168);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AiConfig::from_toml_str(
            r#"
            [discovery]
            fleet_radar_unit_size = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.discovery.fleet_radar_unit_size, 3);
        assert_eq!(config.discovery.radar_order_quantity, 5);
        assert_eq!(config.missions.hide_delay_ms, 13_000);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let result = AiConfig::from_toml_str(
            r#"
            [discovery]
            satellite_order_quantity = 0
            "#,
        );
        assert!(matches!(result, Err(AiError::InvalidConfig(_))));
    }

    #[test]
    fn test_identical_spaceport_ids_rejected() {
        let mut config = AiConfig::default();
        config.discovery.traders_spaceport_id = config.discovery.military_spaceport_id.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = AiConfig::from_toml_str("[discovery\nbroken");
        assert!(matches!(result, Err(AiError::TomlError(_))));
    }

    #[test]
    fn test_load_sample_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/ai.toml");
        let config = load_config(&path).expect("sample config should load");
        assert_eq!(config.discovery.military_spaceport_id, "MilitarySpaceport");
    }
}
