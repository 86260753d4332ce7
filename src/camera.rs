//! Perspective camera with a responsive layout.
//!
//! The camera never orbits. It looks straight down -Z from one of two fixed
//! positions: a closer one for wide windows and a farther, higher one for
//! narrow (phone-sized) windows so the whole scene still fits.

use crate::config::CameraConfig;
use glam::{Mat4, Vec3};

/// Which of the two camera positions is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Narrow window.
    Compact,
    /// Everything else.
    Wide,
}

/// Fixed-orientation perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World position of the eye.
    pub position: Vec3,
    /// Width over height of the viewport.
    pub aspect: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    layout: Layout,
    compact_width: f32,
    compact_position: Vec3,
    wide_position: Vec3,
}

impl Camera {
    /// Camera for a viewport `width` x `height` logical pixels.
    pub fn new(config: &CameraConfig, width: f32, height: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from(config.wide_position),
            aspect: 1.0,
            fov_y: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            layout: Layout::Wide,
            compact_width: config.compact_width,
            compact_position: Vec3::from(config.compact_position),
            wide_position: Vec3::from(config.wide_position),
        };
        camera.resize(width, height);
        camera
    }

    /// Update aspect ratio and layout for a new viewport size (logical pixels).
    ///
    /// Zero-sized viewports (minimised windows) are ignored. Returns the
    /// layout now in effect.
    pub fn resize(&mut self, width: f32, height: f32) -> Layout {
        if width <= 0.0 || height <= 0.0 {
            return self.layout;
        }
        self.aspect = width / height;
        self.layout = if width < self.compact_width {
            Layout::Compact
        } else {
            Layout::Wide
        };
        self.position = match self.layout {
            Layout::Compact => self.compact_position,
            Layout::Wide => self.wide_position,
        };
        self.layout
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// View matrix looking along -Z with +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    /// Projection matrix with wgpu's `0..1` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_threshold() {
        let config = CameraConfig::default();
        let mut camera = Camera::new(&config, 1280.0, 720.0);
        assert_eq!(camera.layout(), Layout::Wide);
        assert_eq!(camera.position, Vec3::new(0.0, 1.5, 6.0));

        assert_eq!(camera.resize(767.0, 1000.0), Layout::Compact);
        assert_eq!(camera.position, Vec3::new(0.0, 2.0, 10.0));

        assert_eq!(camera.resize(768.0, 1000.0), Layout::Wide);
        assert_eq!(camera.position, Vec3::new(0.0, 1.5, 6.0));
    }

    #[test]
    fn test_aspect_follows_resize() {
        let mut camera = Camera::new(&CameraConfig::default(), 800.0, 400.0);
        assert_eq!(camera.aspect, 2.0);
        camera.resize(400.0, 800.0);
        assert_eq!(camera.aspect, 0.5);
    }

    #[test]
    fn test_zero_size_ignored() {
        let mut camera = Camera::new(&CameraConfig::default(), 1000.0, 500.0);
        camera.resize(0.0, 0.0);
        assert_eq!(camera.aspect, 2.0);
        assert_eq!(camera.layout(), Layout::Wide);
    }

    #[test]
    fn test_point_ahead_projects_to_centre() {
        let camera = Camera::new(&CameraConfig::default(), 1000.0, 1000.0);
        let ahead = camera.position + Vec3::new(0.0, 0.0, -5.0);
        let clip = camera.view_proj() * ahead.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
