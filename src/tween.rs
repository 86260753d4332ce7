//! Easing curves and tweens driven by the scene clock.
//!
//! Two kinds of tween exist:
//!
//! - [`Tween`]: a single scalar (overlay opacity, panel scale) computed from
//!   the clock each frame.
//! - [`StaggeredTween`]: a move-and-fade applied to every member of a group,
//!   member `i` starting `i * stagger` seconds after the first.
//!
//! Staggered tweens apply their eased progress *incrementally*: each frame a
//! member receives only the change since the previous frame. That lets them
//! compose with anything else moving the same members, such as confetti
//! falling under its own velocity or being recycled to the top.

use crate::config::GroupTweenConfig;
use serde::{Deserialize, Serialize};

/// Easing curve mapping linear progress `0..=1` to eased progress `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// Quadratic ease-in: slow start.
    Power1In,
    /// Quadratic ease-out: slow finish.
    #[default]
    Power1Out,
    /// Quadratic ease-in-out.
    Power1InOut,
}

impl Ease {
    /// Eased progress for linear progress `t`. `t` is clamped to `0..=1`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1In => t * t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Linear progress of a tween that started `local` seconds ago.
///
/// Zero-length tweens jump straight to the end once started.
#[inline]
fn linear_progress(local: f32, duration: f32) -> f32 {
    if local < 0.0 {
        0.0
    } else if duration <= 0.0 {
        1.0
    } else {
        (local / duration).min(1.0)
    }
}

/// A scalar animated from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Clock time the tween starts at.
    pub start: f32,
    pub duration: f32,
    pub from: f32,
    pub to: f32,
    pub ease: Ease,
}

impl Tween {
    pub fn new(start: f32, duration: f32, from: f32, to: f32, ease: Ease) -> Self {
        Self {
            start,
            duration,
            from,
            to,
            ease,
        }
    }

    /// Eased progress at clock time `now`.
    pub fn progress(&self, now: f32) -> f32 {
        self.ease.apply(linear_progress(now - self.start, self.duration))
    }

    /// Value at clock time `now`; `from` before the start, `to` after the end.
    pub fn value(&self, now: f32) -> f32 {
        self.from + (self.to - self.from) * self.progress(now)
    }

    pub fn has_started(&self, now: f32) -> bool {
        now >= self.start
    }

    pub fn is_finished(&self, now: f32) -> bool {
        now >= self.start + self.duration.max(0.0)
    }
}

/// Something a [`StaggeredTween`] can move and fade.
pub trait Tweenable {
    /// Move vertically by `dy`.
    fn lift(&mut self, dy: f32);
    /// Current opacity, `0.0..=1.0`.
    fn opacity(&self) -> f32;
    fn set_opacity(&mut self, opacity: f32);
}

/// Per-member bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
struct Track {
    /// Eased progress already applied.
    applied: f32,
    /// Opacity change over the whole tween, captured when the member starts.
    fade_span: Option<f32>,
}

/// Staggered move-and-fade over every member of a group.
#[derive(Debug, Clone)]
pub struct StaggeredTween {
    start: f32,
    lift: f32,
    fade_to: f32,
    duration: f32,
    stagger: f32,
    ease: Ease,
    tracks: Vec<Track>,
}

impl StaggeredTween {
    /// Tween for `members` group members, starting at clock time `start`.
    pub fn new(start: f32, members: usize, config: &GroupTweenConfig) -> Self {
        Self {
            start,
            lift: config.lift,
            fade_to: config.fade_to,
            duration: config.duration,
            stagger: config.stagger,
            ease: config.ease,
            tracks: vec![Track::default(); members],
        }
    }

    /// Clock time the last member finishes.
    pub fn end(&self) -> f32 {
        let last = self.tracks.len().saturating_sub(1) as f32;
        self.start + last * self.stagger + self.duration.max(0.0)
    }

    pub fn is_finished(&self, now: f32) -> bool {
        now >= self.end()
    }

    /// Advance every member to clock time `now`.
    ///
    /// Members beyond the length the tween was built for are left alone.
    pub fn apply<T: Tweenable>(&mut self, now: f32, members: &mut [T]) {
        for (i, (member, track)) in members.iter_mut().zip(self.tracks.iter_mut()).enumerate() {
            let local = now - self.start - i as f32 * self.stagger;
            if local < 0.0 {
                // Later members start later still.
                break;
            }

            let fade_span = *track
                .fade_span
                .get_or_insert_with(|| self.fade_to - member.opacity());

            let progress = self.ease.apply(linear_progress(local, self.duration));
            let step = progress - track.applied;
            if step == 0.0 {
                continue;
            }

            member.lift(self.lift * step);
            member.set_opacity((member.opacity() + fade_span * step).clamp(0.0, 1.0));
            track.applied = progress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct Dot {
        y: f32,
        opacity: f32,
    }

    impl Tweenable for Dot {
        fn lift(&mut self, dy: f32) {
            self.y += dy;
        }
        fn opacity(&self) -> f32 {
            self.opacity
        }
        fn set_opacity(&mut self, opacity: f32) {
            self.opacity = opacity;
        }
    }

    fn rise(duration: f32, stagger: f32) -> GroupTweenConfig {
        GroupTweenConfig {
            lift: 2.0,
            fade_to: 0.0,
            duration,
            stagger,
            ease: Ease::Power1Out,
        }
    }

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::Power1In, Ease::Power1Out, Ease::Power1InOut] {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
            assert_eq!(ease.apply(-3.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(7.0), 1.0, "{ease:?}");
        }
    }

    #[test]
    fn test_ease_shapes() {
        assert_eq!(Ease::Power1In.apply(0.5), 0.25);
        assert_eq!(Ease::Power1Out.apply(0.5), 0.75);
        assert_eq!(Ease::Power1InOut.apply(0.5), 0.5);
        assert!(Ease::Power1InOut.apply(0.25) < 0.25);
    }

    #[test]
    fn test_scalar_tween() {
        let t = Tween::new(1.0, 2.0, 1.0, 0.0, Ease::Linear);
        assert_eq!(t.value(0.0), 1.0);
        assert!(!t.has_started(0.5));
        assert_eq!(t.value(2.0), 0.5);
        assert!(!t.is_finished(2.9));
        assert_eq!(t.value(3.0), 0.0);
        assert!(t.is_finished(3.0));
        assert_eq!(t.value(100.0), 0.0);
    }

    #[test]
    fn test_zero_duration_tween_jumps() {
        let t = Tween::new(0.0, 0.0, 0.0, 1.0, Ease::Power1Out);
        assert_eq!(t.value(-0.1), 0.0);
        assert_eq!(t.value(0.0), 1.0);
    }

    #[test]
    fn test_staggered_members_start_in_order() {
        let mut dots = [Dot { y: 0.0, opacity: 1.0 }; 3];
        let mut tween = StaggeredTween::new(0.0, dots.len(), &rise(1.0, 0.5));

        tween.apply(0.25, &mut dots);
        assert!(dots[0].y > 0.0);
        assert_eq!(dots[1].y, 0.0);
        assert_eq!(dots[2].y, 0.0);

        tween.apply(0.75, &mut dots);
        assert!(dots[1].y > 0.0);
        assert_eq!(dots[2].y, 0.0);
        assert_eq!(tween.end(), 2.0);
    }

    #[test]
    fn test_staggered_lands_exactly() {
        let mut dots = [Dot { y: 0.0, opacity: 1.0 }; 4];
        let mut tween = StaggeredTween::new(0.0, dots.len(), &rise(2.0, 0.05));

        let mut now = 0.0;
        while !tween.is_finished(now) {
            now += 1.0 / 60.0;
            tween.apply(now, &mut dots);
        }

        for dot in &dots {
            assert!((dot.y - 2.0).abs() < 1e-4, "{dot:?}");
            assert!(dot.opacity.abs() < 1e-4, "{dot:?}");
        }
    }

    #[test]
    fn test_staggered_composes_with_external_motion() {
        let mut dots = [Dot { y: 0.0, opacity: 1.0 }];
        let mut tween = StaggeredTween::new(0.0, 1, &rise(1.0, 0.0));

        tween.apply(0.5, &mut dots);
        let y_mid = dots[0].y;

        // Someone else moves the member and resets its opacity.
        dots[0].y += 10.0;
        dots[0].opacity = 1.0;

        tween.apply(1.0, &mut dots);
        let remaining = 2.0 * (1.0 - Ease::Power1Out.apply(0.5));
        assert!((dots[0].y - (y_mid + 10.0 + remaining)).abs() < 1e-5);
        // Only the remaining quarter of the fade is applied to the reset value.
        assert!((dots[0].opacity - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_staggered_before_start_does_nothing() {
        let mut dots = [Dot { y: 1.0, opacity: 1.0 }; 2];
        let mut tween = StaggeredTween::new(5.0, dots.len(), &rise(1.0, 0.1));
        tween.apply(4.0, &mut dots);
        assert!(dots.iter().all(|d| d.y == 1.0 && d.opacity == 1.0));
    }
}
