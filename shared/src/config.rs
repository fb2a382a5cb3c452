use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::Extent;

/// Errors concerning a [`RainConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Opaque RGB fill colour. Serialized as a `#rrggbb` string.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);

    /// CSS representation, usable as a canvas fill style.
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    /// Accepts `#rgb`, `#rrggbb` and the name `white`.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let invalid = || ConfigError(format!("invalid colour {value:?}"));

        if value.eq_ignore_ascii_case("white") {
            return Ok(Color::WHITE);
        }

        let hex = value.strip_prefix('#').ok_or_else(invalid)?;

        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Color(r * 17, g * 17, b * 17))
            }
            6 => Ok(Color(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.css()
    }
}

/// Half-open interval `[min, max)` that speeds are drawn from.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    pub fn new(min: f64, max: f64) -> SpeedRange {
        SpeedRange { min, max }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError(format!(
                "{name} must satisfy min < max, got [{}, {})",
                self.min, self.max
            )))
        }
    }
}

/// Tunables for the rain animation and the hand tracker.
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Side length of a freshly spawned pixel.
    pub pixel_size: f64,
    /// Pixels spawned per group.
    pub batch_size: usize,
    /// Chance per tick that a group spawns.
    pub spawn_probability: f64,
    pub pixel_speed: SpeedRange,
    pub particle_speed: SpeedRange,
    /// Particles produced by one split.
    pub split_count: usize,
    /// Per-tick size multiplier for particles.
    pub decay: f64,
    /// Particles smaller than this collapse to zero.
    pub decay_threshold: f64,
    pub color: Color,
    /// Resolution requested from the camera.
    pub video: Extent,
    pub landmark_count: usize,
    pub fingertip_index: usize,
    pub umbrella_src: String,
}

impl Default for RainConfig {
    fn default() -> Self {
        RainConfig {
            pixel_size: 4.0,
            batch_size: 50,
            spawn_probability: 0.1,
            pixel_speed: SpeedRange::new(1.0, 3.0),
            particle_speed: SpeedRange::new(1.0, 4.0),
            split_count: 8,
            decay: 0.95,
            decay_threshold: 0.5,
            color: Color::WHITE,
            video: Extent::new(640.0, 480.0),
            landmark_count: crate::LANDMARK_COUNT,
            fingertip_index: crate::FINGERTIP_INDEX,
            umbrella_src: "umbrella.png".to_string(),
        }
    }
}

impl RainConfig {
    /// Parses and validates a JSON object. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<RainConfig, ConfigError> {
        let config: RainConfig =
            serde_json::from_str(json).map_err(|err| ConfigError(err.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Checks every invariant the animator and tracker rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixel_size.is_finite() && self.pixel_size > 0.0) {
            return Err(ConfigError(format!(
                "pixel_size must be positive, got {}",
                self.pixel_size
            )));
        }

        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError(format!(
                "spawn_probability must lie in [0, 1], got {}",
                self.spawn_probability
            )));
        }

        self.pixel_speed.validate("pixel_speed")?;

        if self.pixel_speed.min <= 0.0 {
            return Err(ConfigError(format!(
                "pixel_speed must be positive so pixels reach the floor, got min {}",
                self.pixel_speed.min
            )));
        }

        self.particle_speed.validate("particle_speed")?;

        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(ConfigError(format!(
                "decay must lie in (0, 1), got {}",
                self.decay
            )));
        }

        if !(self.decay_threshold.is_finite() && self.decay_threshold > 0.0) {
            return Err(ConfigError(format!(
                "decay_threshold must be positive, got {}",
                self.decay_threshold
            )));
        }

        if self.video.is_empty() {
            return Err(ConfigError(format!(
                "video must have a non-zero area, got {}x{}",
                self.video.width, self.video.height
            )));
        }

        if self.fingertip_index >= self.landmark_count {
            return Err(ConfigError(format!(
                "fingertip_index {} is out of range for {} landmarks",
                self.fingertip_index, self.landmark_count
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RainConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.split_count, 8);
        assert_eq!(config.fingertip_index, 8);
        assert_eq!(config.landmark_count, 21);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            RainConfig::from_json(r##"{ "batch_size": 10, "color": "#0af" }"##).unwrap();

        assert_eq!(config.batch_size, 10);
        assert_eq!(config.color, Color(0x00, 0xaa, 0xff));
        assert_eq!(config.pixel_size, 4.0);
        assert_eq!(config.video, Extent::new(640.0, 480.0));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(RainConfig::from_json(r#"{ "spawn_probability": 1.5 }"#).is_err());
        assert!(RainConfig::from_json(r#"{ "pixel_speed": { "min": 3, "max": 1 } }"#).is_err());
        assert!(RainConfig::from_json(r#"{ "pixel_speed": { "min": -3, "max": -1 } }"#).is_err());
        assert!(RainConfig::from_json(r#"{ "pixel_speed": { "min": 0, "max": 2 } }"#).is_err());
        assert!(RainConfig::from_json(r#"{ "decay": 1.0 }"#).is_err());
        assert!(RainConfig::from_json(r#"{ "pixel_size": 0 }"#).is_err());
        assert!(RainConfig::from_json(r#"{ "fingertip_index": 21 }"#).is_err());
        assert!(RainConfig::from_json(r#"{ "video": { "width": 0, "height": 480 } }"#).is_err());
        assert!(RainConfig::from_json(r#"{ "color": "blue" }"#).is_err());
        assert!(RainConfig::from_json("not json").is_err());
    }

    #[test]
    fn colour_round_trips_through_css() {
        let color = Color::try_from("#1A2b3C".to_string()).unwrap();

        assert_eq!(color, Color(0x1a, 0x2b, 0x3c));
        assert_eq!(color.css(), "#1a2b3c");
        assert_eq!(Color::try_from("WHITE".to_string()), Ok(Color::WHITE));
        assert!(Color::try_from("#12345".to_string()).is_err());
    }
}
