//! Page-wide scene state shared by slices.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Explicit store passed to slices instead of a global.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneContext {
    is_scene_ready: bool,
    scroll_y: f32,
    is_dark_mode: bool,
    model_data: Option<Value>,
}

impl SceneContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_scene_ready(&self) -> bool {
        self.is_scene_ready
    }

    #[inline]
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    #[inline]
    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    pub fn model_data(&self) -> Option<&Value> {
        self.model_data.as_ref()
    }

    pub fn set_scene_ready(&mut self, ready: bool) {
        self.is_scene_ready = ready;
    }

    pub fn set_scroll_y(&mut self, y: f32) {
        self.scroll_y = y;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.is_dark_mode = !self.is_dark_mode;
    }

    pub fn set_model_data(&mut self, data: Option<Value>) {
        self.model_data = data;
    }
}
