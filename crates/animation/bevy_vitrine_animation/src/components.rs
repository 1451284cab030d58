use bevy::prelude::*;
use vitrine_animation_core::{
    AnimationRequest, ControllerConfig, TargetHandle, TimelineController, TimelineId,
};

/// Owns a timeline controller ticked every frame by the plugin.
///
/// The controller's targets are other entities, addressed with
/// [`target_handle`]. The driver entity itself needs no `Transform`.
#[derive(Component, Debug, Default)]
pub struct VitrineTimeline {
    pub controller: TimelineController,
}

impl VitrineTimeline {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            controller: TimelineController::new(config),
        }
    }

    /// Controller with default config and `request` already built.
    pub fn with_request(request: AnimationRequest) -> Self {
        let mut timeline = Self::default();
        timeline.controller.create_timeline(request);
        timeline
    }

    pub fn create_timeline(&mut self, request: AnimationRequest) -> Option<TimelineId> {
        self.controller.create_timeline(request)
    }
}

/// Handle under which `entity` is addressed by timelines.
#[inline]
pub fn target_handle(entity: Entity) -> TargetHandle {
    TargetHandle(entity.to_bits())
}

/// Inverse of [`target_handle`]; `None` for bits that are not a valid entity.
#[inline]
pub fn handle_entity(handle: TargetHandle) -> Option<Entity> {
    Entity::try_from_bits(handle.0).ok()
}
