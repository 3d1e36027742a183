//! Session configuration
//!
//! Every tunable of the scene lives here. Values are fixed once a session
//! starts; load them from JSON or take the defaults.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Road quads per unit along the high-detail stretch
    pub fn quad_density(&self) -> u32 {
        match self {
            QualityPreset::Low => 2,
            QualityPreset::Medium => QUAD_DENSITY,
            QualityPreset::High => 8,
        }
    }

    /// Raindrop pool size
    pub fn raindrops(&self) -> usize {
        match self {
            QualityPreset::Low => RAINDROP_COUNT / 4,
            QualityPreset::Medium => RAINDROP_COUNT,
            QualityPreset::High => RAINDROP_COUNT,
        }
    }
}

/// Scene settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Road ===
    pub road_amplitude: f32,
    pub road_period: f32,
    pub road_half_width: f32,
    pub border_margin: f32,
    pub render_distance: f32,
    pub high_detail_distance: f32,

    // === Tunnels ===
    pub tunnel_spacing: f32,
    pub tunnel_length: f32,

    // === Roadside ===
    pub lamp_spacing: f32,
    pub sign_cadence: u32,

    // === Driving ===
    pub max_speed: f32,
    pub speed_increment: f32,
    pub max_angle: f32,
    pub angle_increment: f32,

    /// Rain RNG seed
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            road_amplitude: ROAD_AMPLITUDE,
            road_period: ROAD_PERIOD,
            road_half_width: ROAD_HALF_WIDTH,
            border_margin: BORDER_MARGIN,
            render_distance: RENDER_DISTANCE,
            high_detail_distance: HIGH_DETAIL_DISTANCE,

            tunnel_spacing: TUNNEL_SPACING,
            tunnel_length: TUNNEL_LENGTH,

            lamp_spacing: LAMP_SPACING,
            sign_cadence: SIGN_CADENCE,

            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_angle: MAX_ANGLE,
            angle_increment: ANGLE_INCREMENT,

            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Check the invariants the scene relies on
    pub fn validate(&self) -> Result<()> {
        ensure!(self.road_period > 0.0, "road_period must be positive");
        ensure!(self.road_amplitude >= 0.0, "road_amplitude must not be negative");
        ensure!(
            self.border_margin >= 0.0 && self.border_margin < self.road_half_width,
            "border_margin ({}) must lie in [0, road_half_width = {})",
            self.border_margin,
            self.road_half_width
        );
        ensure!(self.render_distance > 0.0, "render_distance must be positive");
        ensure!(
            self.high_detail_distance >= 0.0,
            "high_detail_distance must not be negative"
        );
        ensure!(self.tunnel_length > 0.0, "tunnel_length must be positive");
        ensure!(
            self.tunnel_length < self.tunnel_spacing,
            "tunnel_length ({}) must be shorter than tunnel_spacing ({})",
            self.tunnel_length,
            self.tunnel_spacing
        );
        ensure!(self.lamp_spacing > 0.0, "lamp_spacing must be positive");
        ensure!(self.sign_cadence > 0, "sign_cadence must be at least 1");
        ensure!(
            self.max_speed > 0.0 && self.speed_increment > 0.0,
            "speed limits must be positive"
        );
        ensure!(
            self.max_angle > 0.0 && self.max_angle < 90.0 && self.angle_increment > 0.0,
            "turn limits must lie in (0, 90) degrees"
        );
        Ok(())
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("malformed settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Read settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Settings::default().validate().unwrap();
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            Settings::from_preset(preset).validate().unwrap();
        }
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let settings = Settings::from_json(r#"{ "road_amplitude": 12.0, "quality": "High" }"#)
            .unwrap();
        assert_eq!(settings.road_amplitude, 12.0);
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.tunnel_spacing, TUNNEL_SPACING);
    }

    #[test]
    fn test_degenerate_tunnels_rejected() {
        let err = Settings::from_json(r#"{ "tunnel_spacing": 300.0, "tunnel_length": 400.0 }"#)
            .unwrap_err();
        assert!(err.to_string().contains("tunnel_length"));
    }

    #[test]
    fn test_sign_cadence_bounds() {
        let short = Settings {
            sign_cadence: 3,
            ..Settings::default()
        };
        assert!(short.validate().is_ok());
        let never = Settings {
            sign_cadence: 0,
            ..Settings::default()
        };
        assert!(never.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::from_preset(QualityPreset::Low);
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back.quality, QualityPreset::Low);
        assert_eq!(back.seed, settings.seed);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/night-highway.json"));
        assert_eq!(settings.sign_cadence, SIGN_CADENCE);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }
}
