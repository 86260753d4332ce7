//! # Celebrate
//!
//! A one-off celebratory 3D scene: a start screen, then on a single button
//! press a cluster of hearts floats up and fades while 500 confetti cubes
//! rain down, and a final message appears with a "say thanks" button that
//! hands a pre-filled message link to the platform.
//!
//! ## Quick Start
//!
//! ```ignore
//! use celebrate::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let config = SceneConfig::default();
//!     celebrate::run(config)
//! }
//! ```
//!
//! ## Structure
//!
//! The scene itself ([`Scene`]) has no window or GPU dependency and can be
//! stepped directly, which is how the tests drive it:
//!
//! ```
//! use celebrate::{Phase, Scene, SceneConfig};
//!
//! let config = SceneConfig { seed: Some(1), ..SceneConfig::default() };
//! let mut scene = Scene::new(config, 1280.0, 720.0);
//!
//! assert!(scene.trigger_reveal());
//! for _ in 0..720 {
//!     scene.update(1.0 / 60.0);
//! }
//! assert_eq!(scene.phase(), Phase::Done);
//! assert_eq!(scene.confetti().group().len(), 500);
//! ```
//!
//! - [`confetti`]: falling cubes that recycle to the top when they pass the floor
//! - [`hearts`]: flat heart meshes built from a bezier outline
//! - [`timeline`]: the scripted reveal and overlay state
//! - [`tween`]: easing and staggered per-member tweens
//! - [`camera`]: perspective camera that moves back on narrow viewports
//! - [`deeplink`]: the thanks link and its percent-encoding
//! - [`config`]: every constant, loadable from TOML
//!
//! [`run`] opens a window and drives the scene with wgpu and egui.

pub mod camera;
pub mod confetti;
pub mod config;
pub mod deeplink;
pub mod error;
mod gpu;
pub mod group;
pub mod hearts;
pub mod palette;
pub mod scene;
pub mod shader;
pub mod spawn;
pub mod time;
pub mod timeline;
pub mod tween;
mod ui;
mod window;

pub use camera::{Camera, Layout};
pub use confetti::{Confetti, ConfettiField};
pub use config::SceneConfig;
pub use error::{ConfigError, GpuError, SceneError};
pub use glam::{Vec2, Vec3};
pub use group::Group;
pub use hearts::{Heart, HeartCluster, HeartShape};
pub use scene::Scene;
pub use spawn::{SpawnBand, Spawner};
pub use time::FrameClock;
pub use timeline::{Cue, Overlay, Phase, Timeline};
pub use tween::{Ease, StaggeredTween, Tween, Tweenable};
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use celebrate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{
        CameraConfig, ConfettiConfig, HeartsConfig, OverlayConfig, SceneConfig, ThanksConfig,
        TimelineConfig, WindowConfig,
    };
    pub use crate::error::{ConfigError, GpuError, SceneError};
    pub use crate::scene::Scene;
    pub use crate::timeline::Phase;
    pub use crate::window::run;
    pub use crate::{Vec2, Vec3};
}
