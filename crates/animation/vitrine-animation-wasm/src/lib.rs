use std::collections::HashMap;

use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vitrine_animation_core::{
    AnimProp, AnimationRequest, AnimationDesc, ControllerConfig, PlaybackPhase, PropertyAccess,
    TargetHandle, TickOutputs, TimelineController,
};

#[wasm_bindgen]
pub struct VitrineTimeline {
    core: TimelineController,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Host backed by a JS getter `(target: number, prop: string) -> number | null`.
///
/// Writes are not pushed into JS; they are kept locally so later reads in the
/// same tick agree, and reach JS through the returned outputs.
struct JsHost {
    getter: Function,
    written: HashMap<(TargetHandle, AnimProp), f32>,
}

impl JsHost {
    fn new(getter: Function) -> Self {
        Self {
            getter,
            written: HashMap::new(),
        }
    }
}

impl PropertyAccess for JsHost {
    fn get(&self, target: TargetHandle, prop: AnimProp) -> Option<f32> {
        if let Some(v) = self.written.get(&(target, prop)) {
            return Some(*v);
        }
        let t = JsValue::from_f64(target.0 as f64);
        let p = JsValue::from_str(prop.as_str());
        match self.getter.call2(&JsValue::UNDEFINED, &t, &p) {
            Ok(val) => val.as_f64().map(|n| n as f32).filter(|n| n.is_finite()),
            Err(_) => None,
        }
    }

    fn set(&mut self, target: TargetHandle, prop: AnimProp, value: f32) -> bool {
        self.written.insert((target, prop), value);
        true
    }
}

/// Playback snapshot returned by `state()`.
#[derive(Serialize)]
struct TimelineState {
    phase: PlaybackPhase,
    is_playing: bool,
    has_timeline: bool,
    time: f32,
    duration: f32,
    progress: f32,
}

#[wasm_bindgen]
impl VitrineTimeline {
    /// Create a controller. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new VitrineTimeline({ default_duration: 0.8 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VitrineTimeline, JsError> {
        console_error_panic_hook::set_once();

        let cfg: ControllerConfig = if jsvalue_is_undefined_or_null(&config) {
            ControllerConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(VitrineTimeline {
            core: TimelineController::new(cfg),
        })
    }

    /// Build a timeline from an animation description object:
    ///   { target, properties: { "position.x": 1 }, duration?, easing?, loop?, autoplay?, delay? }
    /// Returns the timeline id, or undefined when `target` is missing.
    #[wasm_bindgen(js_name = create_timeline)]
    pub fn create_timeline(&mut self, desc: JsValue) -> Result<Option<u32>, JsError> {
        if jsvalue_is_undefined_or_null(&desc) {
            return Err(JsError::new("create_timeline: description is null/undefined"));
        }
        let desc: AnimationDesc = swb::from_value(desc)
            .map_err(|e| JsError::new(&format!("create_timeline parse error: {e}")))?;
        let request = AnimationRequest::try_from(desc)
            .map_err(|e| JsError::new(&format!("create_timeline: {e}")))?;
        Ok(self.core.create_timeline(request).map(|id| id.0))
    }

    pub fn start(&mut self) {
        self.core.start();
    }

    pub fn pause(&mut self) {
        self.core.pause();
    }

    pub fn resume(&mut self) {
        self.core.resume();
    }

    pub fn stop(&mut self) {
        self.core.stop();
    }

    pub fn seek(&mut self, time: f32) {
        self.core.seek(time);
    }

    pub fn reverse(&mut self) {
        self.core.reverse();
    }

    pub fn dispose(&mut self) {
        self.core.dispose();
    }

    /// Advance by dt (seconds). `getter(target, prop)` supplies start values.
    /// Returns `{ changes, events }` for the caller to apply.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32, getter: Function) -> Result<JsValue, JsError> {
        let mut host = JsHost::new(getter);
        let out: &TickOutputs = self.core.tick(dt, &mut host);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    #[wasm_bindgen(js_name = is_playing)]
    pub fn is_playing(&self) -> bool {
        self.core.is_playing()
    }

    pub fn progress(&self) -> f32 {
        self.core.progress()
    }

    /// Phase, playhead and duration as a plain object.
    pub fn state(&self) -> Result<JsValue, JsError> {
        let state = TimelineState {
            phase: self.core.phase(),
            is_playing: self.core.is_playing(),
            has_timeline: self.core.has_timeline(),
            time: self.core.time(),
            duration: self.core.duration(),
            progress: self.core.progress(),
        };
        swb::to_value(&state).map_err(|e| JsError::new(&format!("state error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

/// Parse an animation description from JSON text and report the first error, if any.
#[wasm_bindgen(js_name = validate_animation_json)]
pub fn validate_animation_json(json: &str) -> Result<(), JsError> {
    let desc = AnimationDesc::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
    AnimationRequest::try_from(desc)
        .map(|_| ())
        .map_err(|e| JsError::new(&e.to_string()))
}
