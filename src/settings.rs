//! Lane and physics tuning
//!
//! All knobs the simulation reads live here, so a whole lane setup can be
//! described by one JSON file. Values are in lane units (dimensionless).

use std::fs;
use std::io;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield dimensions
    pub lane_width: f32,
    pub lane_length: f32,

    /// Ball collision radius
    pub ball_radius: f32,

    /// Rack geometry
    pub pin_radius: f32,
    pub pin_row_spacing: f32,
    pub pin_in_row_spacing: f32,
    /// Y of the apex pin (the head pin, nearest the ball)
    pub pin_base_y: f32,

    /// Per-tick velocity multiplier, must be in (0, 1)
    pub friction: f32,
    /// Speed below which the ball halts
    pub stop_threshold: f32,
    /// Upper clamp on launch speed
    pub max_velocity: f32,
    /// Launch speed when the driver does not specify one
    pub default_throw_speed: f32,

    /// Fraction of the lane length (from the far end) past which a shot
    /// settles even if the ball is still rolling
    pub past_pins_fraction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lane_width: consts::LANE_WIDTH,
            lane_length: consts::LANE_LENGTH,
            ball_radius: consts::BALL_RADIUS,
            pin_radius: consts::PIN_RADIUS,
            pin_row_spacing: consts::PIN_ROW_SPACING,
            pin_in_row_spacing: consts::PIN_IN_ROW_SPACING,
            pin_base_y: consts::PIN_BASE_Y,
            friction: consts::FRICTION,
            stop_threshold: consts::STOP_THRESHOLD,
            max_velocity: consts::MAX_VELOCITY,
            default_throw_speed: consts::DEFAULT_THROW_SPEED,
            past_pins_fraction: consts::PAST_PINS_FRACTION,
        }
    }
}

impl Settings {
    /// X of the lane centerline
    pub fn lane_center_x(&self) -> f32 {
        self.lane_width / 2.0
    }

    /// Launch origin: lane center, near the foul-line end
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(
            self.lane_center_x(),
            self.lane_length * consts::ANCHOR_Y_FRACTION,
        )
    }

    /// Y below which a shot is declared settled
    pub fn past_pins_line(&self) -> f32 {
        self.lane_length * self.past_pins_fraction
    }

    /// Sanity-check the tuning values
    pub fn validate(&self) -> Result<(), String> {
        if self.lane_width <= 0.0 || self.lane_length <= 0.0 {
            return Err("lane dimensions must be positive".into());
        }
        if self.ball_radius <= 0.0 || self.pin_radius <= 0.0 {
            return Err("ball and pin radii must be positive".into());
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(format!("friction must be in (0, 1), got {}", self.friction));
        }
        if self.stop_threshold <= 0.0 {
            return Err("stop threshold must be positive".into());
        }
        if self.default_throw_speed <= self.stop_threshold {
            return Err("default throw speed must exceed the stop threshold".into());
        }
        if self.max_velocity < self.default_throw_speed {
            return Err("max velocity must be at least the default throw speed".into());
        }
        if !(self.past_pins_fraction > 0.0 && self.past_pins_fraction < 1.0) {
            return Err("past-pins fraction must be in (0, 1)".into());
        }
        Ok(())
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Bad settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_bad_friction_rejected() {
        let mut settings = Settings::default();
        settings.friction = 1.0;
        assert!(settings.validate().is_err());
        settings.friction = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_throw_speed_must_exceed_stop_threshold() {
        let mut settings = Settings::default();
        settings.default_throw_speed = settings.stop_threshold;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_derived_geometry() {
        let settings = Settings::default();
        assert_eq!(settings.lane_center_x(), settings.lane_width / 2.0);
        assert_eq!(
            settings.past_pins_line(),
            settings.lane_length * settings.past_pins_fraction
        );
        assert!(settings.anchor().y > settings.pin_base_y);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.friction = 0.97;
        settings.lane_width = 320.0;

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: Settings = serde_json::from_str(r#"{"friction": 0.95}"#).unwrap();
        assert_eq!(parsed.friction, 0.95);
        assert_eq!(parsed.lane_width, consts::LANE_WIDTH);
    }
}
