//! Animation requests: what a consumer asks a controller to build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::access::TargetHandle;
use crate::easing::Ease;
use crate::error::AnimationError;
use crate::events::{Callbacks, TimelineEvent};
use crate::props::AnimProp;

/// A declared tween: target, end values, timing and callbacks.
///
/// Consumed by [`crate::TimelineController::create_timeline`]; the callbacks
/// move into the timeline and are dropped with it.
#[derive(Debug, Default)]
pub struct AnimationRequest {
    pub target: Option<TargetHandle>,
    pub properties: Vec<(AnimProp, f32)>,
    /// Seconds. `None` (or a non-positive value) uses the controller default.
    pub duration: Option<f32>,
    pub easing: Option<Ease>,
    pub looping: bool,
    pub autoplay: bool,
    /// Seconds before the first render.
    pub delay: f32,
    pub callbacks: Callbacks,
}

impl AnimationRequest {
    pub fn new(target: impl Into<TargetHandle>) -> Self {
        Self::with_target(Some(target.into()))
    }

    /// Request whose target may be absent (a not-yet-mounted object).
    pub fn with_target(target: Option<TargetHandle>) -> Self {
        Self {
            target,
            autoplay: true,
            ..Self::default()
        }
    }

    /// Tween `prop` to `value`. Setting the same property twice keeps the last value.
    pub fn to(mut self, prop: AnimProp, value: f32) -> Self {
        match self.properties.iter_mut().find(|(p, _)| *p == prop) {
            Some(entry) => entry.1 = value,
            None => self.properties.push((prop, value)),
        }
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn easing(mut self, ease: Ease) -> Self {
        self.easing = Some(ease);
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn on_start(mut self, f: impl FnMut() + Send + Sync + 'static) -> Self {
        self.callbacks.on_start = Some(Box::new(f));
        self
    }

    /// Called after every render with normalized progress.
    pub fn on_update(mut self, f: impl FnMut(f32) + Send + Sync + 'static) -> Self {
        self.callbacks.on_update = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnMut() + Send + Sync + 'static) -> Self {
        self.callbacks.on_complete = Some(Box::new(f));
        self
    }

    /// Observe every lifecycle event, including restarts and release.
    pub fn on_event(mut self, f: impl FnMut(&TimelineEvent) + Send + Sync + 'static) -> Self {
        self.callbacks.on_event = Some(Box::new(f));
        self
    }
}

fn default_true() -> bool {
    true
}

/// Serializable form of [`AnimationRequest`] using property and easing names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationDesc {
    #[serde(default)]
    pub target: Option<TargetHandle>,
    pub properties: BTreeMap<String, f32>,
    #[serde(default)]
    pub duration: Option<f32>,
    #[serde(default)]
    pub easing: Option<String>,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default = "default_true")]
    pub autoplay: bool,
    #[serde(default)]
    pub delay: f32,
}

impl AnimationDesc {
    pub fn from_json(json: &str) -> Result<Self, AnimationError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<AnimationDesc> for AnimationRequest {
    type Error = AnimationError;

    fn try_from(desc: AnimationDesc) -> Result<Self, Self::Error> {
        if desc.properties.is_empty() {
            return Err(AnimationError::EmptyProperties);
        }
        let mut request = AnimationRequest::with_target(desc.target)
            .looping(desc.looping)
            .autoplay(desc.autoplay)
            .delay(desc.delay);
        for (name, value) in &desc.properties {
            request = request.to(name.parse::<AnimProp>()?, *value);
        }
        request.duration = desc.duration;
        request.easing = desc.easing.as_deref().map(str::parse::<Ease>).transpose()?;
        Ok(request)
    }
}
