//! The reveal sequence.
//!
//! Nothing happens until [`Timeline::trigger`] is called (the start button).
//! From that instant `t0` the sequence runs without branching:
//!
//! | When | What |
//! |------|------|
//! | `t0` | start screen begins fading out; hearts and confetti become visible |
//! | `t0 + i * stagger` | member `i` of each group starts its move-and-fade |
//! | `t0 + overlay_fade` | start screen hidden, stops taking input |
//! | `t0 + message_delay` | final message panel appears, fading and growing in |
//!
//! A second trigger is ignored. There is no cancel.

use crate::confetti::Confetti;
use crate::config::TimelineConfig;
use crate::group::Group;
use crate::hearts::Heart;
use crate::tween::{Ease, StaggeredTween, Tween};

/// Where the sequence is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the start button.
    Waiting,
    /// Triggered; at least one tween is still running.
    Running,
    /// Every tween has completed.
    Done,
}

/// Milestones reported by [`Timeline::advance`], each exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// The start screen finished fading and is now hidden.
    StartScreenHidden,
    /// The final message panel became visible.
    MessageShown,
    /// Every tween has completed.
    Finished,
}

/// Visibility state of a full-screen overlay or panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub opacity: f32,
    pub scale: f32,
    /// Hidden overlays are not drawn at all.
    pub hidden: bool,
    /// Whether the overlay's buttons respond to input.
    pub interactive: bool,
}

impl Overlay {
    fn shown() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            hidden: false,
            interactive: true,
        }
    }

    fn hidden(scale: f32) -> Self {
        Self {
            opacity: 0.0,
            scale,
            hidden: true,
            interactive: false,
        }
    }
}

/// Scripted reveal sequence and the overlay state it drives.
#[derive(Debug, Clone)]
pub struct Timeline {
    config: TimelineConfig,
    started_at: Option<f32>,
    phase: Phase,
    start_fade: Option<Tween>,
    message_fade: Option<Tween>,
    message_grow: Option<Tween>,
    hearts: Option<StaggeredTween>,
    confetti: Option<StaggeredTween>,
    start_screen: Overlay,
    final_message: Overlay,
}

impl Timeline {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            config: config.clone(),
            started_at: None,
            phase: Phase::Waiting,
            start_fade: None,
            message_fade: None,
            message_grow: None,
            hearts: None,
            confetti: None,
            start_screen: Overlay::shown(),
            final_message: Overlay::hidden(config.message_start_scale),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Clock time of the trigger, if it has happened.
    pub fn started_at(&self) -> Option<f32> {
        self.started_at
    }

    pub fn start_screen(&self) -> &Overlay {
        &self.start_screen
    }

    pub fn final_message(&self) -> &Overlay {
        &self.final_message
    }

    /// Start the sequence at clock time `now`.
    ///
    /// Reveals both groups immediately. Returns `false` (and changes nothing)
    /// if the sequence was already triggered.
    pub fn trigger(
        &mut self,
        now: f32,
        hearts: &mut Group<Heart>,
        confetti: &mut Group<Confetti>,
    ) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        let c = &self.config;

        self.started_at = Some(now);
        self.phase = Phase::Running;
        self.start_fade = Some(Tween::new(now, c.overlay_fade, 1.0, 0.0, Ease::Power1Out));

        let shown_at = now + c.message_delay;
        self.message_fade = Some(Tween::new(shown_at, c.message_duration, 0.0, 1.0, Ease::Power1Out));
        self.message_grow = Some(Tween::new(
            shown_at,
            c.message_duration,
            c.message_start_scale,
            1.0,
            Ease::Power1Out,
        ));

        hearts.set_visible(true);
        self.hearts = Some(StaggeredTween::new(now, hearts.len(), &c.hearts));
        confetti.set_visible(true);
        self.confetti = Some(StaggeredTween::new(now, confetti.len(), &c.confetti));

        true
    }

    /// Advance every running tween to clock time `now`.
    ///
    /// Returns the milestones crossed during this call.
    pub fn advance(
        &mut self,
        now: f32,
        hearts: &mut Group<Heart>,
        confetti: &mut Group<Confetti>,
    ) -> Vec<Cue> {
        let mut cues = Vec::new();
        if self.phase != Phase::Running {
            return cues;
        }

        if let Some(fade) = &self.start_fade {
            if !self.start_screen.hidden {
                self.start_screen.opacity = fade.value(now);
                if fade.is_finished(now) {
                    self.start_screen.hidden = true;
                    self.start_screen.interactive = false;
                    cues.push(Cue::StartScreenHidden);
                }
            }
        }

        if let Some(tween) = &mut self.hearts {
            tween.apply(now, hearts.members_mut());
        }
        if let Some(tween) = &mut self.confetti {
            tween.apply(now, confetti.members_mut());
        }

        if let (Some(fade), Some(grow)) = (&self.message_fade, &self.message_grow) {
            if fade.has_started(now) {
                if self.final_message.hidden {
                    self.final_message.hidden = false;
                    self.final_message.interactive = true;
                    cues.push(Cue::MessageShown);
                }
                self.final_message.opacity = fade.value(now);
                self.final_message.scale = grow.value(now);
            }
        }

        if self.is_complete(now) {
            self.phase = Phase::Done;
            cues.push(Cue::Finished);
        }

        cues
    }

    fn is_complete(&self, now: f32) -> bool {
        let scalar_done = [self.start_fade, self.message_fade, self.message_grow]
            .into_iter()
            .flatten()
            .all(|t| t.is_finished(now));
        let groups_done = self.hearts.iter().chain(&self.confetti).all(|t| t.is_finished(now));
        scalar_done && groups_done && self.start_screen.hidden && !self.final_message.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfettiConfig, HeartsConfig};
    use crate::confetti::ConfettiField;
    use crate::hearts::HeartCluster;
    use crate::spawn::Spawner;

    fn groups() -> (Group<Heart>, Group<Confetti>) {
        let mut spawner = Spawner::seeded(21);
        let hearts = HeartCluster::new(&HeartsConfig::default(), &mut spawner);
        let confetti = ConfettiField::new(&ConfettiConfig::default(), &mut spawner);
        (hearts.group().clone(), confetti.group().clone())
    }

    /// Step the timeline at 60 fps from `from` to `to`, collecting cues with their times.
    fn run(
        timeline: &mut Timeline,
        hearts: &mut Group<Heart>,
        confetti: &mut Group<Confetti>,
        from: f32,
        to: f32,
    ) -> Vec<(f32, Cue)> {
        let mut seen = Vec::new();
        let mut now = from;
        while now < to {
            now += 1.0 / 60.0;
            for cue in timeline.advance(now, hearts, confetti) {
                seen.push((now, cue));
            }
        }
        seen
    }

    #[test]
    fn test_waits_for_trigger() {
        let (mut hearts, mut confetti) = groups();
        let mut timeline = Timeline::new(&TimelineConfig::default());

        assert!(run(&mut timeline, &mut hearts, &mut confetti, 0.0, 3.0).is_empty());
        assert_eq!(timeline.phase(), Phase::Waiting);
        assert!(!hearts.is_visible() && !confetti.is_visible());
        assert!(!timeline.start_screen().hidden);
        assert!(timeline.final_message().hidden);
    }

    #[test]
    fn test_trigger_reveals_groups_once() {
        let (mut hearts, mut confetti) = groups();
        let mut timeline = Timeline::new(&TimelineConfig::default());

        assert!(timeline.trigger(2.0, &mut hearts, &mut confetti));
        assert!(hearts.is_visible() && confetti.is_visible());
        assert_eq!(timeline.phase(), Phase::Running);

        assert!(!timeline.trigger(3.0, &mut hearts, &mut confetti));
        assert_eq!(timeline.started_at(), Some(2.0));
    }

    #[test]
    fn test_sequence_order() {
        let (mut hearts, mut confetti) = groups();
        let config = TimelineConfig::default();
        let mut timeline = Timeline::new(&config);
        timeline.trigger(0.0, &mut hearts, &mut confetti);

        let cues = run(&mut timeline, &mut hearts, &mut confetti, 0.0, 20.0);
        let kinds: Vec<Cue> = cues.iter().map(|&(_, c)| c).collect();
        assert_eq!(kinds, vec![Cue::StartScreenHidden, Cue::MessageShown, Cue::Finished]);

        let (hidden_at, _) = cues[0];
        assert!(hidden_at >= config.overlay_fade && hidden_at < config.overlay_fade + 0.02);
        let (shown_at, _) = cues[1];
        assert!(shown_at >= config.message_delay && shown_at < config.message_delay + 0.02);

        assert_eq!(timeline.phase(), Phase::Done);
        let message = timeline.final_message();
        assert_eq!(message.opacity, 1.0);
        assert_eq!(message.scale, 1.0);
        assert!(message.interactive);
        assert!(!timeline.start_screen().interactive);
    }

    #[test]
    fn test_start_screen_fades_before_hiding() {
        let (mut hearts, mut confetti) = groups();
        let mut timeline = Timeline::new(&TimelineConfig::default());
        timeline.trigger(0.0, &mut hearts, &mut confetti);

        timeline.advance(0.25, &mut hearts, &mut confetti);
        let screen = timeline.start_screen();
        assert!(screen.opacity > 0.0 && screen.opacity < 1.0);
        assert!(!screen.hidden && screen.interactive);
    }

    #[test]
    fn test_hearts_rise_and_fade() {
        let (mut hearts, mut confetti) = groups();
        let before: Vec<f32> = hearts.members().iter().map(|h| h.position.y).collect();
        let mut timeline = Timeline::new(&TimelineConfig::default());
        timeline.trigger(0.0, &mut hearts, &mut confetti);

        run(&mut timeline, &mut hearts, &mut confetti, 0.0, 4.0);

        for (heart, y0) in hearts.members().iter().zip(before) {
            assert!((heart.position.y - (y0 + 2.0)).abs() < 1e-3);
            assert!(heart.opacity < 1e-3);
        }
    }

    #[test]
    fn test_message_grows_in() {
        let (mut hearts, mut confetti) = groups();
        let config = TimelineConfig::default();
        let mut timeline = Timeline::new(&config);
        timeline.trigger(0.0, &mut hearts, &mut confetti);

        timeline.advance(config.message_delay + 0.5, &mut hearts, &mut confetti);
        let message = timeline.final_message();
        assert!(!message.hidden);
        assert!(message.opacity > 0.0 && message.opacity < 1.0);
        assert!(message.scale > config.message_start_scale && message.scale < 1.0);
    }
}
