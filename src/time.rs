//! Frame timing for the render loop.
//!
//! [`FrameClock`] turns wall-clock instants into the per-frame delta the scene
//! consumes, and keeps a running FPS figure for the logs.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // Once per redraw:
//! let delta = clock.tick();
//! scene.update(delta);
//! ```

use std::time::{Duration, Instant};

/// Longest delta a single frame may report, in seconds.
///
/// A window that was dragged, minimised or stalled in a debugger would
/// otherwise hand the scene one enormous step.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Per-frame timing.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Sum of all reported deltas.
    elapsed_secs: f32,
    /// Delta reported by the most recent tick.
    delta_secs: f32,
    /// Upper bound on a single delta.
    max_delta: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock whose first frame is measured from now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock whose first frame is measured from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: start,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance to the current instant. Call once per frame.
    ///
    /// Returns the frame delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.advance_to(Instant::now())
    }

    /// Advance to `now`, returning the clamped frame delta in seconds.
    ///
    /// Instants earlier than the previous frame yield a zero delta.
    pub fn advance_to(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = raw.min(self.max_delta);
        self.last_frame = self.last_frame.max(now);
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;

        let since_fps = now.saturating_duration_since(self.fps_update_time);
        if since_fps >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Scene time in seconds: the sum of clamped deltas.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Delta reported by the most recent tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Change the per-frame delta cap. Negative values clamp to zero.
    pub fn set_max_delta(&mut self, max_delta: f32) {
        self.max_delta = max_delta.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn test_advance_reports_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let delta = clock.advance_to(start + Duration::from_millis(16));
        assert!((delta - 0.016).abs() < 1e-4);
        assert_eq!(clock.frame(), 1);
        assert!((clock.elapsed() - 0.016).abs() < 1e-4);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let delta = clock.advance_to(start + Duration::from_secs(3));
        assert_eq!(delta, DEFAULT_MAX_DELTA);
        assert_eq!(clock.elapsed(), DEFAULT_MAX_DELTA);
    }

    #[test]
    fn test_backwards_instant_is_zero_delta() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.advance_to(start - Duration::from_millis(500)), 0.0);
    }

    #[test]
    fn test_fps_after_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        for i in 1..=30 {
            clock.advance_to(start + Duration::from_millis(i * 20));
        }
        // 30 frames over 600ms, measured at the 500ms mark: 25 frames / 0.5s
        assert!((clock.fps() - 50.0).abs() < 1.0, "fps = {}", clock.fps());
    }

    #[test]
    fn test_max_delta_clamps_negative() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.set_max_delta(-1.0);
        assert_eq!(clock.advance_to(start + Duration::from_millis(10)), 0.0);
    }
}
