//! Application settings. Every field has a default, so a config file only
//! needs to name what it changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Zoom used when centering on the user and on workouts
    pub map_zoom: f64,
    pub tile_url: String,
    pub tile_attribution: String,
    /// Local storage key holding the workouts
    pub storage_key: String,
    /// How long the form stays out of the layout after a submit
    pub form_reveal_delay_ms: u32,
    pub pan_duration_s: f64,
    pub popup_min_width: f64,
    pub popup_max_width: f64,
    /// tracing filter directive, e.g. "info" or "workout_tracker_lib=debug"
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_zoom: 13.,
            tile_url: "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png".to_owned(),
            tile_attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_owned(),
            storage_key: "workouts".to_owned(),
            form_reveal_delay_ms: 1000,
            pan_duration_s: 1.,
            popup_min_width: 100.,
            popup_max_width: 250.,
            log_level: "info".to_owned(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.map_zoom > 0.) {
            return Err(ConfigError::NotPositive("map_zoom"));
        }
        if !(self.pan_duration_s > 0.) {
            return Err(ConfigError::NotPositive("pan_duration_s"));
        }
        if !(self.popup_min_width > 0. && self.popup_max_width >= self.popup_min_width) {
            return Err(ConfigError::NotPositive("popup_min_width"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn overrides_named_fields_only() {
        let config = AppConfig::from_json(r#"{ "map_zoom": 15, "storage_key": "test-workouts" }"#).unwrap();

        assert_eq!(config.map_zoom, 15.);
        assert_eq!(config.storage_key, "test-workouts");
        assert_eq!(config.form_reveal_delay_ms, 1000);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(AppConfig::from_json(r#"{ "map_zoom": 0 }"#), Err(ConfigError::NotPositive("map_zoom"))));
        assert!(matches!(AppConfig::from_json("[1, 2]"), Err(ConfigError::Parse(_))));
    }
}
