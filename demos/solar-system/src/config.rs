/// Startup flags and the per-frame control-panel options.

use serde::Deserialize;

use crate::orbit::SPIN_RATE;

/// Startup configuration. Every field has a default, so `{}` is valid JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolarConfig {
    /// Initial animation speed, clamped into `[0, 1]`.
    pub speed: f64,
    pub replace_planets: bool,
    pub play_music: bool,
    /// Give the ringed body its ring.
    pub rings: bool,
    /// Wire up the music track. When off, music toggles are ignored.
    pub music: bool,
    /// Manifest key of the shared detailed model.
    pub model: String,
    /// Manifest key of the music track.
    pub music_track: String,
    /// Per-frame self-rotation of visible bodies, in radians.
    pub spin_rate: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            speed: 0.01,
            replace_planets: false,
            play_music: false,
            rings: true,
            music: true,
            model: "amaina".to_string(),
            music_track: "space".to_string(),
            spin_rate: SPIN_RATE,
        }
    }
}

impl SolarConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Control-panel state at startup.
    pub fn options(&self) -> Options {
        Options::new(self.speed, self.replace_planets, self.play_music)
    }
}

/// Control-panel state. Owned by the game, read by the driver every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    speed: f64,
    pub replace_planets: bool,
    pub play_music: bool,
}

impl Options {
    pub fn new(speed: f64, replace_planets: bool, play_music: bool) -> Self {
        let mut options = Self { speed: 0.0, replace_planets, play_music };
        options.set_speed(speed);
        options
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Clamps into `[0, 1]`. NaN counts as zero.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed.is_nan() { 0.0 } else { speed.clamp(0.0, 1.0) };
    }
}

impl Default for Options {
    fn default() -> Self {
        SolarConfig::default().options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = SolarConfig::from_json("{}").unwrap();
        assert_eq!(config, SolarConfig::default());
        assert_eq!(config.speed, 0.01);
        assert!(config.rings);
        assert!(config.music);
        assert_eq!(config.model, "amaina");
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = SolarConfig::from_json(r#"{"rings": false, "speed": 0.5}"#).unwrap();
        assert!(!config.rings);
        assert_eq!(config.speed, 0.5);
        assert_eq!(config.music_track, "space");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SolarConfig::from_json(r#"{"speed": "fast"}"#).is_err());
    }

    #[test]
    fn speed_is_clamped() {
        let mut options = Options::new(3.0, false, false);
        assert_eq!(options.speed(), 1.0);
        options.set_speed(-0.2);
        assert_eq!(options.speed(), 0.0);
        options.set_speed(f64::NAN);
        assert_eq!(options.speed(), 0.0);
        options.set_speed(0.25);
        assert_eq!(options.speed(), 0.25);
    }
}
