//! Confetti: small cubes that fall through the scene and are recycled to the
//! top when they drop below the floor.

use crate::config::ConfettiConfig;
use crate::group::Group;
use crate::palette;
use crate::spawn::{SpawnBand, Spawner};
use crate::tween::Tweenable;
use glam::Vec3;

/// One confetti cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confetti {
    pub position: Vec3,
    /// Units per frame at the configured frame rate. Never changes.
    pub velocity: Vec3,
    /// Linear RGB.
    pub color: Vec3,
    pub opacity: f32,
}

impl Tweenable for Confetti {
    fn lift(&mut self, dy: f32) {
        self.position.y += dy;
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }
}

/// The confetti group plus the rules that keep it falling.
#[derive(Debug, Clone)]
pub struct ConfettiField {
    group: Group<Confetti>,
    spawn: SpawnBand,
    floor: f32,
    frame_rate: f32,
    size: f32,
}

impl ConfettiField {
    /// Create `config.count` hidden particles inside the spawn band.
    pub fn new(config: &ConfettiConfig, spawner: &mut Spawner) -> Self {
        let group = Group::from_fn(config.count, |_| {
            let color = spawner
                .pick(&config.palette)
                .copied()
                .map(palette::hex_to_linear)
                .unwrap_or(Vec3::ONE);
            let position = spawner.point_in_band(&config.spawn);
            // (fall_min, fall_max]: flip a [0, 1) sample so the slow end is open
            let fall = config.fall_max - spawner.random() * (config.fall_max - config.fall_min);
            let velocity = Vec3::new(
                spawner.random_symmetric(config.drift),
                -fall,
                spawner.random_symmetric(config.drift),
            );
            Confetti {
                position,
                velocity,
                color,
                opacity: 1.0,
            }
        });

        Self {
            group,
            spawn: config.spawn,
            floor: config.floor,
            frame_rate: config.frame_rate,
            size: config.size,
        }
    }

    /// Advance every particle by `delta` seconds.
    ///
    /// Does nothing while the group is hidden. A particle that ends below the
    /// floor is moved to a fresh random point in the spawn band and made fully
    /// opaque again; its velocity is kept. Returns how many were recycled.
    pub fn update(&mut self, delta: f32, spawner: &mut Spawner) -> usize {
        let step = delta * self.frame_rate;
        let floor = self.floor;
        let spawn = self.spawn;
        let mut recycled = 0;

        self.group.for_each_visible(|p| {
            p.position += p.velocity * step;
            if p.position.y < floor {
                p.position = spawner.point_in_band(&spawn);
                p.opacity = 1.0;
                recycled += 1;
            }
        });

        recycled
    }

    pub fn group(&self) -> &Group<Confetti> {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut Group<Confetti> {
        &mut self.group
    }

    pub fn spawn_band(&self) -> &SpawnBand {
        &self.spawn
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    /// Cube edge length.
    pub fn size(&self) -> f32 {
        self.size
    }
}
