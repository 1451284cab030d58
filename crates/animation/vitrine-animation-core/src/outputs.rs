//! Per-tick output contract.
//!
//! Hosts that apply writes themselves (the wasm adapter) read `changes`;
//! hosts that were written through `PropertyAccess` can ignore them.

use serde::{Deserialize, Serialize};

use crate::access::TargetHandle;
use crate::events::TimelineEvent;
use crate::props::AnimProp;

/// One property written this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub target: TargetHandle,
    pub prop: AnimProp,
    pub value: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

impl TickOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: TimelineEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Final value written for `target.prop` this tick, if any.
    pub fn value_of(&self, target: TargetHandle, prop: AnimProp) -> Option<f32> {
        self.changes
            .iter()
            .rev()
            .find(|c| c.target == target && c.prop == prop)
            .map(|c| c.value)
    }

    pub fn has_event(&self, event: &TimelineEvent) -> bool {
        self.events.contains(event)
    }
}
