//! The whole celebration, independent of any window or GPU.
//!
//! A [`Scene`] owns both member groups, the reveal timeline, the camera and
//! the RNG. The render loop calls [`Scene::update`] once per frame and reads
//! the result back to draw it; the UI calls [`Scene::trigger_reveal`] when the
//! start button is pressed.

use crate::camera::{Camera, Layout};
use crate::config::SceneConfig;
use crate::confetti::ConfettiField;
use crate::deeplink;
use crate::hearts::HeartCluster;
use crate::spawn::{clock_seed, Spawner};
use crate::timeline::{Cue, Phase, Timeline};

pub struct Scene {
    config: SceneConfig,
    seed: u64,
    elapsed: f32,
    spawner: Spawner,
    confetti: ConfettiField,
    hearts: HeartCluster,
    timeline: Timeline,
    camera: Camera,
    thanks_link: String,
}

impl Scene {
    /// Build the scene for a viewport of `width` x `height` logical pixels.
    ///
    /// Uses `config.seed` if set, otherwise seeds from the clock.
    pub fn new(config: SceneConfig, width: f32, height: f32) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let mut spawner = Spawner::seeded(seed);

        let confetti = ConfettiField::new(&config.confetti, &mut spawner);
        let hearts = HeartCluster::new(&config.hearts, &mut spawner);
        let timeline = Timeline::new(&config.timeline);
        let camera = Camera::new(&config.camera, width, height);
        let thanks_link = deeplink::whatsapp_link(&config.thanks.phone, &config.thanks.message);

        log::info!(
            "Scene ready: {} confetti, {} hearts, seed {}",
            confetti.group().len(),
            hearts.group().len(),
            seed
        );

        Self {
            config,
            seed,
            elapsed: 0.0,
            spawner,
            confetti,
            hearts,
            timeline,
            camera,
            thanks_link,
        }
    }

    /// Advance the scene by `delta` seconds: timeline first, then confetti physics.
    ///
    /// Negative deltas are treated as zero.
    pub fn update(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        self.elapsed += delta;

        for cue in self.timeline.advance(
            self.elapsed,
            self.hearts.group_mut(),
            self.confetti.group_mut(),
        ) {
            match cue {
                Cue::StartScreenHidden => log::debug!("Start screen hidden at {:.2}s", self.elapsed),
                Cue::MessageShown => log::info!("Final message shown"),
                Cue::Finished => log::debug!("Reveal sequence finished at {:.2}s", self.elapsed),
            }
        }

        self.confetti.update(delta, &mut self.spawner);
    }

    /// Start the reveal sequence (start button). Returns `false` if it already ran.
    pub fn trigger_reveal(&mut self) -> bool {
        let started = self.timeline.trigger(
            self.elapsed,
            self.hearts.group_mut(),
            self.confetti.group_mut(),
        );
        if started {
            log::info!("Reveal triggered at {:.2}s", self.elapsed);
        } else {
            log::debug!("Reveal already triggered; ignoring");
        }
        started
    }

    /// Track a new viewport size (logical pixels).
    pub fn resize(&mut self, width: f32, height: f32) -> Layout {
        let before = self.camera.layout();
        let layout = self.camera.resize(width, height);
        if layout != before {
            log::debug!("Camera layout switched to {:?} at {}x{}", layout, width, height);
        }
        layout
    }

    /// Link opened by the "say thanks" button.
    pub fn thanks_link(&self) -> &str {
        &self.thanks_link
    }

    /// Seconds of scene time since creation.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.timeline.phase()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn confetti(&self) -> &ConfettiField {
        &self.confetti
    }

    pub fn hearts(&self) -> &HeartCluster {
        &self.hearts
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        let config = SceneConfig {
            seed: Some(17),
            ..SceneConfig::default()
        };
        Scene::new(config, 1280.0, 720.0)
    }

    #[test]
    fn test_nothing_moves_before_trigger() {
        let mut scene = scene();
        let before = scene.confetti().group().members().to_vec();
        for _ in 0..120 {
            scene.update(1.0 / 60.0);
        }
        assert_eq!(scene.confetti().group().members(), &before[..]);
        assert_eq!(scene.phase(), Phase::Waiting);
    }

    #[test]
    fn test_trigger_then_update_moves_confetti() {
        let mut scene = scene();
        let y0 = scene.confetti().group().members()[0].position.y;
        assert!(scene.trigger_reveal());
        assert!(!scene.trigger_reveal());

        scene.update(1.0 / 60.0);
        assert!(scene.confetti().group().members()[0].position.y < y0);
    }

    #[test]
    fn test_negative_delta_moves_nothing() {
        let mut scene = scene();
        scene.trigger_reveal();
        scene.update(1.0 / 60.0);
        let before = scene.confetti().group().members().to_vec();
        let elapsed = scene.elapsed();

        scene.update(-0.5);
        assert_eq!(scene.elapsed(), elapsed);
        assert_eq!(scene.confetti().group().members(), &before[..]);
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = scene();
        let b = scene();
        assert_eq!(a.confetti().group().members(), b.confetti().group().members());
        assert_eq!(a.hearts().group().members(), b.hearts().group().members());
        assert_eq!(a.seed(), 17);
    }

    #[test]
    fn test_thanks_link_from_config() {
        let scene = scene();
        assert!(scene.thanks_link().starts_with("https://wa.me/923315484629?text=Thank%20you"));
    }

    #[test]
    fn test_resize_switches_layout() {
        let mut scene = scene();
        assert_eq!(scene.resize(500.0, 900.0), Layout::Compact);
        assert_eq!(scene.resize(1024.0, 768.0), Layout::Wide);
    }
}
