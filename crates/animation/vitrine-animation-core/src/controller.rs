//! Timeline controller: single-owner playback of one timeline at a time.

use serde::{Deserialize, Serialize};

use crate::access::PropertyAccess;
use crate::config::ControllerConfig;
use crate::events::TimelineEvent;
use crate::outputs::{Change, TickOutputs};
use crate::request::AnimationRequest;
use crate::timeline::{StepOutcome, Timeline, TimelineId};
use crate::tween::Tween;

/// Coarse playback state of a controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// No timeline, or a timeline that has not started / was reversed to 0.
    #[default]
    Idle,
    Playing,
    Paused,
    /// A non-looping timeline reached its end.
    Completed,
}

impl PlaybackPhase {
    /// Returns true if the phase represents active playback
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackPhase::Playing)
    }

    /// Returns true if pausing makes sense in this phase
    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, PlaybackPhase::Playing)
    }
}

/// Owns at most one [`Timeline`] and exposes transport controls over it.
///
/// Hosts call [`TimelineController::tick`] once per frame. Transport calls
/// made between ticks take effect on the next tick.
#[derive(Debug)]
pub struct TimelineController {
    config: ControllerConfig,
    timeline: Option<Timeline>,
    next_id: u32,
    phase: PlaybackPhase,
    is_playing: bool,
    /// Rewind writes queued by `stop`, flushed on the next tick.
    pending_writes: Vec<Change>,
    /// Events raised outside a tick (release, diagnostics).
    pending_events: Vec<TimelineEvent>,
    outputs: TickOutputs,
}

impl TimelineController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            timeline: None,
            next_id: 0,
            phase: PlaybackPhase::Idle,
            is_playing: false,
            pending_writes: Vec::new(),
            pending_events: Vec::new(),
            outputs: TickOutputs::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Build a timeline from `request`, replacing (and disposing) any current one.
    ///
    /// A request without a target establishes nothing: the condition is
    /// logged, reported as a `Diagnostic` on the next tick, and any existing
    /// timeline is left untouched.
    pub fn create_timeline(&mut self, request: AnimationRequest) -> Option<TimelineId> {
        let AnimationRequest {
            target,
            properties,
            duration,
            easing,
            looping,
            autoplay,
            delay,
            callbacks,
        } = request;

        let Some(target) = target else {
            log::error!("create_timeline: target object is missing");
            self.pending_events.push(TimelineEvent::Diagnostic {
                message: "create_timeline: target object is missing".to_string(),
            });
            return None;
        };

        if self.timeline.is_some() {
            log::debug!("create_timeline: replacing active timeline");
            self.release();
        }

        let duration = match duration {
            Some(d) if d.is_finite() && d > 0.0 => d,
            Some(d) => {
                log::warn!(
                    "create_timeline: invalid duration {d}, using {}",
                    self.config.default_duration
                );
                self.config.default_duration
            }
            None => self.config.default_duration,
        };
        let delay = if delay.is_finite() { delay } else { 0.0 };
        let tweens = properties
            .into_iter()
            .map(|(prop, value)| Tween::new(target, prop, value))
            .collect();

        let id = TimelineId(self.next_id);
        self.next_id += 1;
        let mut timeline = Timeline::new(
            id,
            tweens,
            duration,
            delay,
            easing.unwrap_or(self.config.default_easing),
            looping,
            callbacks,
        );
        if autoplay {
            timeline.play();
            self.phase = PlaybackPhase::Playing;
        } else {
            self.phase = PlaybackPhase::Idle;
        }
        self.is_playing = autoplay;
        self.timeline = Some(timeline);
        Some(id)
    }

    /// Begin forward playback. A completed timeline replays from time 0.
    pub fn start(&mut self) {
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        if self.phase == PlaybackPhase::Completed {
            timeline.restart();
        } else {
            timeline.play();
        }
        self.phase = PlaybackPhase::Playing;
        self.is_playing = true;
    }

    /// Continue in the current direction. No effect on a completed timeline.
    pub fn resume(&mut self) {
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        if self.phase == PlaybackPhase::Completed {
            log::debug!("resume: timeline already completed");
            return;
        }
        timeline.resume();
        self.phase = PlaybackPhase::Playing;
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        timeline.pause();
        if self.phase != PlaybackPhase::Completed {
            self.phase = PlaybackPhase::Paused;
        }
        self.is_playing = false;
    }

    /// Rewind to time 0 and release the timeline. The rewind writes reach
    /// the host on the next tick.
    pub fn stop(&mut self) {
        let Some(timeline) = self.timeline.as_ref() else {
            return;
        };
        self.pending_writes.extend(timeline.rewind_changes());
        self.release();
    }

    /// Jump to `time` seconds (clamped to the duration) without changing
    /// play/pause state.
    pub fn seek(&mut self, time: f32) {
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        if time.is_nan() {
            log::warn!("seek: ignoring NaN time");
            return;
        }
        timeline.seek(time);
        if self.phase == PlaybackPhase::Completed && timeline.time() < timeline.duration() {
            self.phase = PlaybackPhase::Paused;
        }
    }

    /// Play backward from the current position.
    pub fn reverse(&mut self) {
        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        timeline.reverse();
        self.phase = PlaybackPhase::Playing;
        self.is_playing = true;
    }

    /// Release the active timeline and its callbacks now.
    pub fn dispose(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut timeline) = self.timeline.take() {
            let event = TimelineEvent::Released;
            timeline.notify(&event);
            self.pending_events.push(event);
            log::debug!("released timeline {:?}", timeline.id());
        }
        self.phase = PlaybackPhase::Idle;
        self.is_playing = false;
    }

    /// Advance by `dt` seconds, writing through `host`.
    pub fn tick(&mut self, dt: f32, host: &mut dyn PropertyAccess) -> &TickOutputs {
        self.outputs.clear();
        for change in self.pending_writes.drain(..) {
            if !host.set(change.target, change.prop, change.value) {
                log::debug!("rewind skipped: target {:?} is gone", change.target);
                continue;
            }
            self.outputs.push_change(change);
        }
        self.outputs.events.append(&mut self.pending_events);

        let dt = self.config.smooth_dt(dt);
        if let Some(timeline) = self.timeline.as_mut() {
            // Each wrap reports Completed, Restarted and Started.
            let max_wraps = self.config.max_events_per_tick / 3;
            match timeline.step(dt, max_wraps, host, &mut self.outputs) {
                StepOutcome::Idle | StepOutcome::Advanced => {}
                StepOutcome::Completed => {
                    self.phase = PlaybackPhase::Completed;
                    self.is_playing = false;
                }
                StepOutcome::Looped => {
                    self.phase = PlaybackPhase::Playing;
                    self.is_playing = true;
                }
                StepOutcome::ReverseCompleted => {
                    self.phase = PlaybackPhase::Idle;
                    self.is_playing = false;
                }
                StepOutcome::TargetLost(message) => {
                    log::warn!("releasing timeline: {message}");
                    timeline.emit(TimelineEvent::Diagnostic { message }, &mut self.outputs);
                    self.release();
                    self.outputs.events.append(&mut self.pending_events);
                }
            }
        }

        let max = self.config.max_events_per_tick;
        if self.outputs.events.len() > max {
            log::warn!(
                "dropping {} events over the per-tick limit of {max}",
                self.outputs.events.len() - max
            );
            self.outputs.events.truncate(max);
        }
        &self.outputs
    }

    /// Whether a timeline is currently advancing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[inline]
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    #[inline]
    pub fn has_timeline(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn progress(&self) -> f32 {
        self.timeline.as_ref().map_or(0.0, Timeline::progress)
    }

    pub fn time(&self) -> f32 {
        self.timeline.as_ref().map_or(0.0, Timeline::time)
    }

    pub fn duration(&self) -> f32 {
        self.timeline.as_ref().map_or(0.0, Timeline::duration)
    }

    pub fn is_reversed(&self) -> bool {
        self.timeline.as_ref().is_some_and(Timeline::is_reversed)
    }

    /// Outputs of the most recent tick.
    #[inline]
    pub fn outputs(&self) -> &TickOutputs {
        &self.outputs
    }
}

impl Default for TimelineController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl Drop for TimelineController {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::TargetHandle;
    use crate::props::AnimProp;
    use vitrine_scene_core::{Node, Scene};

    fn scene_with_node() -> (Scene, TargetHandle) {
        let mut scene = Scene::new();
        let id = scene.add_root(Node::group("target"));
        (scene, id.into())
    }

    #[test]
    fn transport_without_timeline_is_noop() {
        let mut c = TimelineController::default();
        c.start();
        c.pause();
        c.resume();
        c.seek(1.0);
        c.reverse();
        c.stop();
        c.stop();
        assert!(!c.is_playing());
        assert_eq!(c.phase(), PlaybackPhase::Idle);
        assert!(!c.has_timeline());
    }

    #[test]
    fn non_positive_duration_falls_back_to_default() {
        let (_, target) = scene_with_node();
        let mut c = TimelineController::default();
        c.create_timeline(
            AnimationRequest::new(target)
                .to(AnimProp::PositionX, 1.0)
                .duration(0.0),
        );
        assert_eq!(c.duration(), 1.0);
    }

    #[test]
    fn paused_creation_waits_for_start() {
        let (mut scene, target) = scene_with_node();
        let mut c = TimelineController::default();
        c.create_timeline(
            AnimationRequest::new(target)
                .to(AnimProp::PositionX, 10.0)
                .autoplay(false),
        );
        assert!(!c.is_playing());
        assert!(c.tick(0.1, &mut scene).is_empty());
        c.start();
        c.tick(0.1, &mut scene);
        assert!(c.time() > 0.0);
        assert!(c.phase().is_playing());
    }

    #[test]
    fn oversized_dt_is_smoothed() {
        let (mut scene, target) = scene_with_node();
        let mut c = TimelineController::default();
        c.create_timeline(AnimationRequest::new(target).to(AnimProp::PositionX, 10.0));
        c.tick(5.0, &mut scene);
        assert!((c.time() - 0.033).abs() < 1e-6);
    }
}
