//! Timeline: a group of tweens sharing one playhead, duration and easing.
//!
//! Timelines are built and owned by a [`crate::TimelineController`]; consumers
//! only observe them through the controller's accessors.

use crate::access::PropertyAccess;
use crate::easing::Ease;
use crate::events::{Callbacks, TimelineEvent};
use crate::outputs::{Change, TickOutputs};
use crate::tween::Tween;

/// Identifier of a timeline within its controller. Never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimelineId(pub u32);

/// What happened during one `step`, for the controller's playback state.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum StepOutcome {
    /// Nothing rendered (paused, waiting out a delay, zero dt before start).
    Idle,
    Advanced,
    Completed,
    Looped,
    ReverseCompleted,
    /// A target could not be read or written; message for the diagnostic.
    TargetLost(String),
}

#[derive(Debug)]
pub struct Timeline {
    id: TimelineId,
    tweens: Vec<Tween>,
    duration: f32,
    delay_remaining: f32,
    ease: Ease,
    repeat: bool,
    /// Playhead in [0, duration].
    time: f32,
    reversed: bool,
    paused: bool,
    started: bool,
    captured: bool,
    pending_render: bool,
    callbacks: Callbacks,
}

impl Timeline {
    pub(crate) fn new(
        id: TimelineId,
        tweens: Vec<Tween>,
        duration: f32,
        delay: f32,
        ease: Ease,
        repeat: bool,
        callbacks: Callbacks,
    ) -> Self {
        Self {
            id,
            tweens,
            duration,
            delay_remaining: delay.max(0.0),
            ease,
            repeat,
            time: 0.0,
            reversed: false,
            paused: true,
            started: false,
            captured: false,
            pending_render: false,
            callbacks,
        }
    }

    #[inline]
    pub fn id(&self) -> TimelineId {
        self.id
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        (self.time / self.duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn ease(&self) -> Ease {
        self.ease
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.repeat
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub(crate) fn play(&mut self) {
        self.reversed = false;
        self.paused = false;
    }

    pub(crate) fn resume(&mut self) {
        self.paused = false;
    }

    pub(crate) fn pause(&mut self) {
        self.paused = true;
    }

    pub(crate) fn reverse(&mut self) {
        self.reversed = true;
        self.paused = false;
    }

    /// Back to time 0, forward, playing. The delay is not replayed.
    pub(crate) fn restart(&mut self) {
        self.time = 0.0;
        self.started = false;
        self.delay_remaining = 0.0;
        self.play();
    }

    /// Move the playhead; the next step renders there without start/complete.
    pub(crate) fn seek(&mut self, time: f32) {
        self.time = time.clamp(0.0, self.duration);
        self.delay_remaining = 0.0;
        self.pending_render = true;
    }

    /// Start values of every captured tween, for rewinding on stop.
    pub(crate) fn rewind_changes(&self) -> Vec<Change> {
        self.tweens
            .iter()
            .filter_map(|t| {
                t.start_value().map(|value| Change {
                    target: t.target,
                    prop: t.prop,
                    value,
                })
            })
            .collect()
    }

    pub(crate) fn emit(&mut self, event: TimelineEvent, out: &mut TickOutputs) {
        self.callbacks.dispatch(&event);
        out.push_event(event);
    }

    pub(crate) fn notify(&mut self, event: &TimelineEvent) {
        self.callbacks.dispatch(event);
    }

    /// Advance by `dt`. At most `max_wraps` loop boundaries report events in
    /// one step; the playhead still wraps past the rest.
    pub(crate) fn step(
        &mut self,
        dt: f32,
        max_wraps: usize,
        host: &mut dyn PropertyAccess,
        out: &mut TickOutputs,
    ) -> StepOutcome {
        let pending = std::mem::take(&mut self.pending_render);
        if self.paused {
            if !pending {
                return StepOutcome::Idle;
            }
            return self.render(host, out);
        }
        let outcome = if self.reversed {
            self.step_backward(dt, host, out)
        } else {
            self.step_forward(dt, max_wraps, host, out)
        };
        if pending && outcome == StepOutcome::Idle {
            return self.render(host, out);
        }
        outcome
    }

    fn step_forward(
        &mut self,
        dt: f32,
        max_wraps: usize,
        host: &mut dyn PropertyAccess,
        out: &mut TickOutputs,
    ) -> StepOutcome {
        let mut dt = dt;
        if self.delay_remaining > 0.0 {
            let consumed = dt.min(self.delay_remaining);
            self.delay_remaining -= consumed;
            dt -= consumed;
            if self.delay_remaining > 0.0 {
                return StepOutcome::Idle;
            }
        }
        if !self.started {
            if dt <= 0.0 {
                return StepOutcome::Idle;
            }
            self.started = true;
            self.emit(TimelineEvent::Started, out);
        }

        self.time += dt;
        if self.time < self.duration {
            return self.render(host, out);
        }

        let overshoot = self.time - self.duration;
        self.time = self.duration;
        if let lost @ StepOutcome::TargetLost(_) = self.render(host, out) {
            return lost;
        }
        self.emit(TimelineEvent::Completed, out);
        if !self.repeat {
            self.paused = true;
            return StepOutcome::Completed;
        }

        // One boundary at `duration`, plus one per whole iteration in the overshoot.
        let crossed = 1 + (overshoot / self.duration).floor() as usize;
        let reported = crossed.min(max_wraps.max(1));
        if crossed > reported {
            log::debug!(
                "timeline {:?}: {} loop boundaries in one step, reporting {reported}",
                self.id,
                crossed
            );
        }
        self.emit(TimelineEvent::Restarted, out);
        self.emit(TimelineEvent::Started, out);
        for _ in 1..reported {
            self.emit(TimelineEvent::Completed, out);
            self.emit(TimelineEvent::Restarted, out);
            self.emit(TimelineEvent::Started, out);
        }
        self.time = overshoot % self.duration;
        if let lost @ StepOutcome::TargetLost(_) = self.render(host, out) {
            return lost;
        }
        StepOutcome::Looped
    }

    fn step_backward(
        &mut self,
        dt: f32,
        host: &mut dyn PropertyAccess,
        out: &mut TickOutputs,
    ) -> StepOutcome {
        self.time -= dt;
        if self.time > 0.0 {
            return self.render(host, out);
        }
        self.time = 0.0;
        if let lost @ StepOutcome::TargetLost(_) = self.render(host, out) {
            return lost;
        }
        self.paused = true;
        self.started = false;
        self.emit(TimelineEvent::ReverseCompleted, out);
        StepOutcome::ReverseCompleted
    }

    /// Write eased values at the current playhead. Captures start values on
    /// the first render.
    fn render(&mut self, host: &mut dyn PropertyAccess, out: &mut TickOutputs) -> StepOutcome {
        if !self.captured {
            for tween in &mut self.tweens {
                if !tween.capture(host) {
                    return StepOutcome::TargetLost(format!(
                        "target {:?} has no readable {}",
                        tween.target, tween.prop
                    ));
                }
            }
            self.captured = true;
        }

        let progress = self.progress();
        let eased = self.ease.apply(progress);
        for tween in &self.tweens {
            let value = tween.value_at(eased);
            if !host.set(tween.target, tween.prop, value) {
                return StepOutcome::TargetLost(format!(
                    "target {:?} rejected write to {}",
                    tween.target, tween.prop
                ));
            }
            out.push_change(Change {
                target: tween.target,
                prop: tween.prop,
                value,
            });
        }
        self.emit(TimelineEvent::Updated { progress }, out);
        StepOutcome::Advanced
    }
}
