//! Timeline lifecycle events and the observer slot that receives them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete lifecycle signals emitted while a timeline plays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum TimelineEvent {
    /// Forward playback left time 0 (also after every loop restart and replay).
    Started,
    /// Values were rendered at `progress` in [0, 1].
    Updated { progress: f32 },
    /// Progress reached 1 (once per loop iteration for looping timelines).
    Completed,
    /// A looping timeline jumped back to time 0.
    Restarted,
    /// Reverse playback reached time 0.
    ReverseCompleted,
    /// The timeline was stopped, replaced or disposed.
    Released,
    /// Non-fatal problem (missing target, invalid input).
    Diagnostic { message: String },
}

type Hook = Box<dyn FnMut() + Send + Sync>;
type ProgressHook = Box<dyn FnMut(f32) + Send + Sync>;
type EventHook = Box<dyn FnMut(&TimelineEvent) + Send + Sync>;

/// Callbacks attached to one timeline. Dropped together with it.
#[derive(Default)]
pub struct Callbacks {
    pub(crate) on_start: Option<Hook>,
    pub(crate) on_update: Option<ProgressHook>,
    pub(crate) on_complete: Option<Hook>,
    pub(crate) on_event: Option<EventHook>,
}

impl Callbacks {
    pub fn is_empty(&self) -> bool {
        self.on_start.is_none()
            && self.on_update.is_none()
            && self.on_complete.is_none()
            && self.on_event.is_none()
    }

    pub(crate) fn dispatch(&mut self, event: &TimelineEvent) {
        match event {
            TimelineEvent::Started => {
                if let Some(f) = self.on_start.as_mut() {
                    f();
                }
            }
            TimelineEvent::Updated { progress } => {
                if let Some(f) = self.on_update.as_mut() {
                    f(*progress);
                }
            }
            TimelineEvent::Completed => {
                if let Some(f) = self.on_complete.as_mut() {
                    f();
                }
            }
            _ => {}
        }
        if let Some(f) = self.on_event.as_mut() {
            f(event);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_event", &self.on_event.is_some())
            .finish()
    }
}
