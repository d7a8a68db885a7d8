use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub radius: RadiusSettings,
    #[serde(default)]
    pub entities: EntitySettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Radius menu offered by the UI and the starting selection
#[derive(Debug, Clone, Deserialize)]
pub struct RadiusSettings {
    #[serde(default = "default_radius_menu")]
    pub menu_km: Vec<f64>,
    #[serde(default = "default_radius")]
    pub default_km: f64,
}

impl Default for RadiusSettings {
    fn default() -> Self {
        Self {
            menu_km: default_radius_menu(),
            default_km: default_radius(),
        }
    }
}

fn default_radius_menu() -> Vec<f64> {
    crate::models::RADIUS_MENU_KM.to_vec()
}

fn default_radius() -> f64 {
    crate::models::DEFAULT_RADIUS_KM
}

/// Candidate sourcing strategy for the demo binary
///
/// `source` selects between the built-in sample ("sample"), a TOML file
/// ("file", requires `path`), and seeded random placement around the user
/// ("randomized").
#[derive(Debug, Clone, Deserialize)]
pub struct EntitySettings {
    #[serde(default = "default_entity_source")]
    pub source: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for EntitySettings {
    fn default() -> Self {
        Self {
            source: default_entity_source(),
            path: None,
            seed: default_seed(),
        }
    }
}

fn default_entity_source() -> String {
    "sample".to_string()
}

fn default_seed() -> u64 {
    0
}

/// Hints passed through to the map-rendering collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            tile_url: default_tile_url(),
        }
    }
}

fn default_zoom() -> u8 {
    12
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PROXIMO_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. PROXIMO__RADIUS__DEFAULT_KM -> radius.default_km
            .add_source(
                Environment::with_prefix("PROXIMO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PROXIMO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radius_settings() {
        let radius = RadiusSettings::default();
        assert_eq!(radius.default_km, 10.0);
        assert_eq!(radius.menu_km, vec![10.0, 20.0, 30.0, 40.0, 300.0]);
    }

    #[test]
    fn test_default_entity_settings() {
        let entities = EntitySettings::default();
        assert_eq!(entities.source, "sample");
        assert!(entities.path.is_none());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
