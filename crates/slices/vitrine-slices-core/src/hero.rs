//! Hero slice: a spinning product model with a headline and call to action.

use serde::{Deserialize, Serialize};
use serde_json::json;
use vitrine_scene_core::{Model, NodeId, Vector3, MOBILE_BREAKPOINT};

use crate::context::SceneContext;

/// Radians added to the model's Y rotation every frame.
pub const SPIN_PER_FRAME: f32 = 0.01;

pub const LOADING_MESSAGE: &str = "Loading 3D model...";
pub const ERROR_MESSAGE: &str = "Error loading 3D model. Please try again later.";

fn default_camera_position() -> [f32; 3] {
    [0.0, 1.0, 5.0]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroProps {
    pub model_path: String,
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    pub cta_link: String,
    #[serde(default = "default_camera_position")]
    pub initial_camera_position: [f32; 3],
    #[serde(default)]
    pub initial_rotation: [f32; 3],
}

/// Orbit control limits for the hero camera. Rotation only.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct OrbitConstraints {
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub enable_rotate: bool,
}

impl Default for OrbitConstraints {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 10.0,
            enable_zoom: false,
            enable_pan: false,
            enable_rotate: true,
        }
    }
}

impl OrbitConstraints {
    /// Clamp a camera distance into the allowed orbit range. `max_distance`
    /// wins when the bounds are inverted.
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.max(self.min_distance).min(self.max_distance)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HeroStatus {
    Loading,
    Ready,
    Failed { reason: String },
}

/// Call-to-action link rendered over the scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CallToAction {
    pub text: String,
    pub link: String,
    pub aria_label: String,
}

#[derive(Debug)]
pub struct Hero {
    props: HeroProps,
    status: HeroStatus,
    model: Option<Model>,
    rotation: Vector3<f32>,
    orbit: OrbitConstraints,
}

impl Hero {
    pub fn new(props: HeroProps) -> Self {
        let rotation = Vector3::from(props.initial_rotation);
        Self {
            props,
            status: HeroStatus::Loading,
            model: None,
            rotation,
            orbit: OrbitConstraints::default(),
        }
    }

    pub fn props(&self) -> &HeroProps {
        &self.props
    }

    pub fn status(&self) -> &HeroStatus {
        &self.status
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn orbit(&self) -> &OrbitConstraints {
        &self.orbit
    }

    #[inline]
    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    /// Take ownership of a loaded model. The hero stays in `Loading` until
    /// the model carries both nodes and materials.
    pub fn attach_model(&mut self, model: Model, ctx: &mut SceneContext) {
        if matches!(self.status, HeroStatus::Failed { .. }) {
            log::warn!("hero: ignoring model '{}' after load failure", model.name);
            return;
        }
        if model.is_loaded() {
            self.status = HeroStatus::Ready;
            ctx.set_scene_ready(true);
            ctx.set_model_data(Some(json!({
                "name": model.name,
                "path": self.props.model_path,
                "meshes": model.mesh_nodes().len(),
            })));
        } else {
            log::debug!("hero: model '{}' has no nodes or materials yet", model.name);
        }
        self.model = Some(model);
        self.apply_rotation();
    }

    /// Mark the model load as failed. The model, if any, is dropped.
    pub fn fail(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("hero: failed to load '{}': {reason}", self.props.model_path);
        self.status = HeroStatus::Failed { reason };
        self.model = None;
    }

    /// Per-frame update: spin the model group about Y.
    pub fn frame(&mut self) {
        if self.model.is_none() {
            return;
        }
        self.rotation.y += SPIN_PER_FRAME;
        self.apply_rotation();
    }

    fn apply_rotation(&mut self) {
        let rotation = self.rotation;
        if let Some(model) = self.model.as_mut() {
            let root = model.root;
            if let Some(group) = model.scene.get_mut(root) {
                group.transform.rotation = rotation;
            }
        }
    }

    /// Mesh nodes to render, in scene order. Empty until ready.
    pub fn meshes(&self) -> Vec<NodeId> {
        match (&self.status, &self.model) {
            (HeroStatus::Ready, Some(model)) => model.mesh_nodes(),
            _ => Vec::new(),
        }
    }

    /// Overlay text for the current status, if any.
    pub fn overlay_message(&self) -> Option<&'static str> {
        match self.status {
            HeroStatus::Loading => Some(LOADING_MESSAGE),
            HeroStatus::Failed { .. } => Some(ERROR_MESSAGE),
            HeroStatus::Ready => None,
        }
    }

    pub fn call_to_action(&self) -> CallToAction {
        CallToAction {
            text: self.props.cta_text.clone(),
            link: self.props.cta_link.clone(),
            aria_label: format!("Learn more about {}", self.props.headline),
        }
    }

    /// Camera start position; pulled back to the max orbit distance on
    /// viewports up to and including the mobile breakpoint.
    pub fn camera_position(&self, viewport_width: u32) -> [f32; 3] {
        let [x, y, z] = self.props.initial_camera_position;
        if viewport_width <= MOBILE_BREAKPOINT {
            [x, y, self.orbit.max_distance.max(z)]
        } else {
            [x, y, self.orbit.clamp_distance(z)]
        }
    }
}
