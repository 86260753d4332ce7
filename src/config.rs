//! Scene configuration.
//!
//! Every constant the scene uses lives here so a celebration can be re-themed
//! from a TOML file without recompiling. `SceneConfig::default()` reproduces
//! the stock scene; any key missing from a file falls back to that default.
//!
//! ```toml
//! seed = 7
//!
//! [confetti]
//! count = 800
//! palette = [0xffd700, 0xff69b4]
//!
//! [thanks]
//! phone = "+15551234567"
//! message = "Thanks!"
//! ```

use crate::error::ConfigError;
use crate::palette;
use crate::spawn::SpawnBand;
use crate::tween::Ease;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Complete scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RNG seed for placement and recycling. Drawn from the clock when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Background color (`0xRRGGBB`, sRGB).
    pub background: u32,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub confetti: ConfettiConfig,
    pub hearts: HeartsConfig,
    pub timeline: TimelineConfig,
    pub overlay: OverlayConfig,
    pub thanks: ThanksConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            background: palette::BACKGROUND,
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            confetti: ConfettiConfig::default(),
            hearts: HeartsConfig::default(),
            timeline: TimelineConfig::default(),
            overlay: OverlayConfig::default(),
            thanks: ThanksConfig::default(),
        }
    }
}

/// Window title and initial size (logical pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Happy Birthday!".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Perspective camera and its two layout positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Windows narrower than this (logical pixels) use the compact position.
    pub compact_width: f32,
    pub compact_position: [f32; 3],
    pub wide_position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            compact_width: 768.0,
            compact_position: [0.0, 2.0, 10.0],
            wide_position: [0.0, 1.5, 6.0],
        }
    }
}

/// Confetti creation and recycling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub count: usize,
    /// Cube edge length.
    pub size: f32,
    /// Horizontal velocity is sampled in `[-drift, drift)` on X and Z.
    pub drift: f32,
    /// Downward speed is sampled in `(fall_min, fall_max]`.
    pub fall_min: f32,
    pub fall_max: f32,
    /// Particles below this height are recycled.
    pub floor: f32,
    /// Velocities are per frame at this rate; the updater scales by `delta * frame_rate`.
    pub frame_rate: f32,
    pub palette: Vec<u32>,
    /// Where confetti is created and where it is recycled to.
    #[serde(deserialize_with = "confetti_spawn")]
    pub spawn: SpawnBand,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            count: 500,
            size: 0.05,
            spawn: SpawnBand::new(4.0, 8.0..13.0, 4.0),
            drift: 0.05,
            fall_min: 0.1,
            fall_max: 0.2,
            floor: -5.0,
            frame_rate: 60.0,
            palette: palette::CONFETTI.to_vec(),
        }
    }
}

/// Heart cluster placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartsConfig {
    pub count: usize,
    pub scale: f32,
    pub palette: Vec<u32>,
    /// Samples per Bezier segment of the heart outline.
    pub curve_segments: usize,
    #[serde(deserialize_with = "hearts_spread")]
    pub spread: SpawnBand,
}

impl Default for HeartsConfig {
    fn default() -> Self {
        Self {
            count: 20,
            spread: SpawnBand::new(1.0, -2.0..2.0, 1.0),
            scale: 0.1,
            palette: palette::HEARTS.to_vec(),
            curve_segments: 12,
        }
    }
}

/// A staggered move-and-fade applied to every member of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTweenConfig {
    /// Vertical distance each member travels (negative moves down).
    pub lift: f32,
    /// Opacity each member ends at.
    pub fade_to: f32,
    /// Seconds per member.
    pub duration: f32,
    /// Start offset between consecutive members, in seconds.
    pub stagger: f32,
    pub ease: Ease,
}

/// Timings of the reveal sequence, in seconds from the trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Start overlay fade-out.
    pub overlay_fade: f32,
    /// Delay before the final message panel appears.
    pub message_delay: f32,
    /// Length of the panel's fade/scale in.
    pub message_duration: f32,
    /// Panel scale when it first appears; it grows to 1.0.
    pub message_start_scale: f32,
    #[serde(deserialize_with = "hearts_tween")]
    pub hearts: GroupTweenConfig,
    #[serde(deserialize_with = "confetti_tween")]
    pub confetti: GroupTweenConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            overlay_fade: 0.5,
            hearts: GroupTweenConfig {
                lift: 2.0,
                fade_to: 0.0,
                duration: 2.0,
                stagger: 0.05,
                ease: Ease::Power1Out,
            },
            confetti: GroupTweenConfig {
                lift: -10.0,
                fade_to: 0.0,
                duration: 5.0,
                stagger: 0.01,
                ease: Ease::Power1In,
            },
            message_delay: 1.0,
            message_duration: 1.0,
            message_start_scale: 0.8,
        }
    }
}

/// A `[..spawn]` or `[..spread]` table; absent keys keep the group's default.
#[derive(Deserialize)]
struct SpawnBandPatch {
    half_width: Option<f32>,
    y_min: Option<f32>,
    y_max: Option<f32>,
    half_depth: Option<f32>,
}

impl SpawnBandPatch {
    fn apply(self, base: SpawnBand) -> SpawnBand {
        SpawnBand {
            half_width: self.half_width.unwrap_or(base.half_width),
            y_min: self.y_min.unwrap_or(base.y_min),
            y_max: self.y_max.unwrap_or(base.y_max),
            half_depth: self.half_depth.unwrap_or(base.half_depth),
        }
    }
}

/// A `[timeline.hearts]` or `[timeline.confetti]` table; absent keys keep the group's default.
#[derive(Deserialize)]
struct GroupTweenPatch {
    lift: Option<f32>,
    fade_to: Option<f32>,
    duration: Option<f32>,
    stagger: Option<f32>,
    ease: Option<Ease>,
}

impl GroupTweenPatch {
    fn apply(self, base: GroupTweenConfig) -> GroupTweenConfig {
        GroupTweenConfig {
            lift: self.lift.unwrap_or(base.lift),
            fade_to: self.fade_to.unwrap_or(base.fade_to),
            duration: self.duration.unwrap_or(base.duration),
            stagger: self.stagger.unwrap_or(base.stagger),
            ease: self.ease.unwrap_or(base.ease),
        }
    }
}

fn confetti_spawn<'de, D: Deserializer<'de>>(d: D) -> Result<SpawnBand, D::Error> {
    Ok(SpawnBandPatch::deserialize(d)?.apply(ConfettiConfig::default().spawn))
}

fn hearts_spread<'de, D: Deserializer<'de>>(d: D) -> Result<SpawnBand, D::Error> {
    Ok(SpawnBandPatch::deserialize(d)?.apply(HeartsConfig::default().spread))
}

fn hearts_tween<'de, D: Deserializer<'de>>(d: D) -> Result<GroupTweenConfig, D::Error> {
    Ok(GroupTweenPatch::deserialize(d)?.apply(TimelineConfig::default().hearts))
}

fn confetti_tween<'de, D: Deserializer<'de>>(d: D) -> Result<GroupTweenConfig, D::Error> {
    Ok(GroupTweenPatch::deserialize(d)?.apply(TimelineConfig::default().confetti))
}

/// Texts shown on the start screen and the final message panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub start_heading: String,
    pub start_button: String,
    pub message_heading: String,
    pub message_body: String,
    pub thanks_button: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            start_heading: "Someone has a surprise for you".to_string(),
            start_button: "Open it".to_string(),
            message_heading: "Happy Birthday!".to_string(),
            message_body: "Wishing you a year full of joy, laughter and everything you love."
                .to_string(),
            thanks_button: "Say thanks".to_string(),
        }
    }
}

/// Target of the "say thanks" deep link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThanksConfig {
    /// International phone number; non-digits are stripped when building the link.
    pub phone: String,
    pub message: String,
}

impl Default for ThanksConfig {
    fn default() -> Self {
        Self {
            phone: "+923315484629".to_string(),
            message: "Thank you so much for the beautiful birthday surprise! It means a lot to me. 😊"
                .to_string(),
        }
    }
}

impl SceneConfig {
    /// Read, parse and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render this configuration as TOML.
    ///
    /// Fails for values TOML cannot hold, such as a seed above `i64::MAX`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the configuration describes a scene that can run.
    ///
    /// Collects every problem instead of stopping at the first one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.window.width == 0 || self.window.height == 0 {
            errors.push("window.width and window.height must be greater than 0".to_string());
        }

        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            errors.push(format!(
                "camera.fov_degrees must be between 0 and 180, got {}",
                cam.fov_degrees
            ));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            errors.push(format!(
                "camera.near ({}) must be positive and less than camera.far ({})",
                cam.near, cam.far
            ));
        }

        let c = &self.confetti;
        if c.count == 0 {
            errors.push("confetti.count must be greater than 0".to_string());
        }
        if c.palette.is_empty() {
            errors.push("confetti.palette must not be empty".to_string());
        }
        check_band("confetti.spawn", &c.spawn, &mut errors);
        if c.floor >= c.spawn.y_min {
            errors.push(format!(
                "confetti.floor ({}) must be below confetti.spawn.y_min ({})",
                c.floor, c.spawn.y_min
            ));
        }
        if c.fall_min < 0.0 {
            errors.push(format!(
                "confetti.fall_min must not be negative, got {}",
                c.fall_min
            ));
        }
        if c.fall_min > c.fall_max {
            errors.push(format!(
                "confetti.fall_min ({}) must not exceed confetti.fall_max ({})",
                c.fall_min, c.fall_max
            ));
        }
        if c.fall_max <= 0.0 {
            errors.push("confetti.fall_max must be positive or confetti never falls".to_string());
        }
        if c.frame_rate <= 0.0 {
            errors.push("confetti.frame_rate must be positive".to_string());
        }

        let h = &self.hearts;
        if h.count == 0 {
            errors.push("hearts.count must be greater than 0".to_string());
        }
        if h.palette.is_empty() {
            errors.push("hearts.palette must not be empty".to_string());
        }
        if h.curve_segments == 0 {
            errors.push("hearts.curve_segments must be greater than 0".to_string());
        }
        check_band("hearts.spread", &h.spread, &mut errors);

        let t = &self.timeline;
        for (name, value) in [
            ("timeline.overlay_fade", t.overlay_fade),
            ("timeline.message_delay", t.message_delay),
            ("timeline.message_duration", t.message_duration),
            ("timeline.hearts.duration", t.hearts.duration),
            ("timeline.hearts.stagger", t.hearts.stagger),
            ("timeline.confetti.duration", t.confetti.duration),
            ("timeline.confetti.stagger", t.confetti.stagger),
        ] {
            if value < 0.0 {
                errors.push(format!("{name} must not be negative, got {value}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn check_band(name: &str, band: &SpawnBand, errors: &mut Vec<String>) {
    if band.y_min > band.y_max {
        errors.push(format!(
            "{name}.y_min ({}) must not exceed {name}.y_max ({})",
            band.y_min, band.y_max
        ));
    }
    if band.half_width < 0.0 || band.half_depth < 0.0 {
        errors.push(format!("{name} half extents must not be negative"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_constants() {
        let config = SceneConfig::default();
        assert_eq!(config.confetti.count, 500);
        assert_eq!(config.hearts.count, 20);
        assert_eq!(config.confetti.floor, -5.0);
        assert_eq!(config.confetti.spawn.y_min, 8.0);
        assert_eq!(config.confetti.spawn.y_max, 13.0);
        assert_eq!(config.background, 0xf0f8ff);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SceneConfig::from_toml(
            r#"
            seed = 7

            [confetti]
            count = 42
            palette = [0xffd700]
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.confetti.count, 42);
        assert_eq!(config.confetti.palette, vec![0xffd700]);
        assert_eq!(config.confetti.floor, -5.0);
        assert_eq!(config.hearts, HeartsConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = SceneConfig::default();
        config.seed = Some(123);
        config.timeline.hearts.ease = Ease::Linear;
        let parsed = SceneConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_sub_tables_keep_group_defaults() {
        let config = SceneConfig::from_toml(
            r#"
            [confetti.spawn]
            y_max = 20.0

            [hearts.spread]
            half_width = 3.0

            [timeline.hearts]
            duration = 3.0

            [timeline.confetti]
            ease = "linear"
            "#,
        )
        .unwrap();

        let defaults = SceneConfig::default();
        assert_eq!(config.confetti.spawn.y_max, 20.0);
        assert_eq!(config.confetti.spawn.y_min, 8.0);
        assert_eq!(config.confetti.spawn.half_width, 4.0);
        assert_eq!(config.hearts.spread.half_width, 3.0);
        assert_eq!(config.hearts.spread.y_min, -2.0);

        assert_eq!(config.timeline.hearts.duration, 3.0);
        assert_eq!(config.timeline.hearts.lift, 2.0);
        assert_eq!(config.timeline.hearts.ease, Ease::Power1Out);
        assert_eq!(config.timeline.confetti.ease, Ease::Linear);
        assert_eq!(config.timeline.confetti.lift, -10.0);
        assert_eq!(config.timeline.confetti.duration, defaults.timeline.confetti.duration);
    }

    #[test]
    fn test_unrepresentable_seed_fails_to_serialize() {
        let config = SceneConfig {
            seed: Some(u64::MAX),
            ..SceneConfig::default()
        };
        assert!(matches!(config.to_toml(), Err(ConfigError::Serialize(_))));

        let config = SceneConfig {
            seed: Some(i64::MAX as u64),
            ..SceneConfig::default()
        };
        assert!(config.to_toml().unwrap().contains("seed = 9223372036854775807"));
    }

    #[test]
    fn test_negative_fall_min_rejected() {
        let mut config = SceneConfig::default();
        config.confetti.fall_min = -0.1;
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1, "{errors:?}");
                assert!(errors[0].contains("confetti.fall_min"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_reports_every_problem() {
        let mut config = SceneConfig::default();
        config.confetti.count = 0;
        config.hearts.palette.clear();
        config.confetti.floor = 20.0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3, "{errors:?}");
                assert!(errors.iter().any(|e| e.contains("confetti.count")));
                assert!(errors.iter().any(|e| e.contains("hearts.palette")));
                assert!(errors.iter().any(|e| e.contains("confetti.floor")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut config = SceneConfig::default();
        config.hearts.spread.y_min = 3.0;
        config.hearts.spread.y_max = -3.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let err = SceneConfig::from_toml("confetti = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
