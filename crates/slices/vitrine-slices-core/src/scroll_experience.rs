//! Scroll experience: model animations scrubbed by page scroll position.
//!
//! Every configured animation gets its own paused [`TimelineController`].
//! Scrolling maps the window offset between an animation's `start` and `end`
//! onto its timeline and seeks there; rendering happens on the next `tick`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vitrine_animation_core::{AnimationRequest, AnimationDesc, TickOutputs, TimelineController};
use vitrine_scene_core::{Camera, Light, LightKind, Model, Node, NodeId, NodeKind, Transform};

use crate::context::SceneContext;
use crate::error::SliceError;

/// Timeline length of every scroll animation, in seconds.
pub const SCROLL_TIMELINE_DURATION: f32 = 1.0;
pub const SCROLL_EASE: &str = "power2.inOut";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightsConfig {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub lights: LightsConfig,
    pub camera_position: [f32; 3],
    #[serde(rename = "type")]
    pub kind: String,
}

/// One scroll-driven tween: `props` are reached as scroll goes from
/// `start` to `end` (pixels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollAnimation {
    pub start: f32,
    pub end: f32,
    /// Node name in the mounted model.
    pub target: String,
    pub props: BTreeMap<String, f32>,
}

impl ScrollAnimation {
    /// Scroll offset mapped into [0, 1]. A zero or inverted range acts as a
    /// step at `start`.
    pub fn progress_at(&self, scroll_y: f32) -> f32 {
        let span = self.end - self.start;
        if span > 0.0 {
            ((scroll_y - self.start) / span).clamp(0.0, 1.0)
        } else if scroll_y >= self.start {
            1.0
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollExperienceProps {
    pub scene_config: SceneConfig,
    #[serde(default)]
    pub animations: Vec<ScrollAnimation>,
}

impl ScrollExperienceProps {
    pub fn from_json(json: &str) -> Result<Self, SliceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Scene nodes added for the configured lights and camera.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rig {
    pub ambient: NodeId,
    pub directional: NodeId,
    pub camera: NodeId,
}

#[derive(Debug)]
pub struct ScrollExperience {
    props: ScrollExperienceProps,
    model: Model,
    rig: Rig,
    tracks: Vec<TimelineController>,
    outputs: TickOutputs,
}

impl ScrollExperience {
    /// Mount the lights and camera into `model` and build one paused
    /// timeline per animation.
    ///
    /// Unknown property or easing names fail the mount. An unknown target
    /// name only leaves that track without a timeline (reported as a
    /// diagnostic on the first tick).
    pub fn mount(props: ScrollExperienceProps, mut model: Model) -> Result<Self, SliceError> {
        let rig = Self::mount_rig(&props.scene_config, &mut model);

        let mut tracks = Vec::with_capacity(props.animations.len());
        for anim in &props.animations {
            let target = model.nodes.get(&anim.target).copied();
            if target.is_none() {
                log::warn!("scroll experience: no node named '{}'", anim.target);
            }
            let desc = AnimationDesc {
                target: target.map(Into::into),
                properties: anim.props.clone(),
                duration: Some(SCROLL_TIMELINE_DURATION),
                easing: Some(SCROLL_EASE.to_string()),
                looping: false,
                autoplay: false,
                delay: 0.0,
            };
            let request = AnimationRequest::try_from(desc)?;
            let mut controller = TimelineController::default();
            controller.create_timeline(request);
            tracks.push(controller);
        }

        Ok(Self {
            props,
            model,
            rig,
            tracks,
            outputs: TickOutputs::default(),
        })
    }

    fn mount_rig(config: &SceneConfig, model: &mut Model) -> Rig {
        let scene = &mut model.scene;
        let ambient = scene.add_root(Node::new(
            "ambient",
            NodeKind::Light(Light {
                kind: LightKind::Ambient,
                intensity: config.lights.ambient_intensity,
            }),
        ));
        let [x, y, z] = config.lights.directional_position;
        let directional = scene.add_root(
            Node::new(
                "directional",
                NodeKind::Light(Light {
                    kind: LightKind::Directional,
                    intensity: config.lights.directional_intensity,
                }),
            )
            .with_transform(Transform::from_position(x, y, z)),
        );
        let [x, y, z] = config.camera_position;
        let camera = scene.add_root(
            Node::new("camera", NodeKind::Camera(Camera::default()))
                .with_transform(Transform::from_position(x, y, z)),
        );
        Rig {
            ambient,
            directional,
            camera,
        }
    }

    pub fn props(&self) -> &ScrollExperienceProps {
        &self.props
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    #[inline]
    pub fn rig(&self) -> Rig {
        self.rig
    }

    pub fn tracks(&self) -> &[TimelineController] {
        &self.tracks
    }

    /// Record the scroll offset and seek every track to match it.
    pub fn on_scroll(&mut self, scroll_y: f32, ctx: &mut SceneContext) {
        ctx.set_scroll_y(scroll_y);
        for (anim, track) in self.props.animations.iter().zip(&mut self.tracks) {
            let progress = anim.progress_at(scroll_y);
            track.seek(progress * track.duration());
        }
    }

    /// Render pending seeks into the model. Outputs of all tracks are merged
    /// in animation order.
    pub fn tick(&mut self, dt: f32) -> &TickOutputs {
        self.outputs.clear();
        for track in &mut self.tracks {
            let out = track.tick(dt, &mut self.model.scene);
            self.outputs.changes.extend_from_slice(&out.changes);
            self.outputs.events.extend_from_slice(&out.events);
        }
        &self.outputs
    }

    /// Release every track's timeline. The model keeps its current pose.
    pub fn teardown(&mut self) {
        for track in &mut self.tracks {
            track.dispose();
        }
    }
}
