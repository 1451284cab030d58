//! Bevy adapter for the Vitrine animation core.
//!
//! Spawn a [`VitrineTimeline`] component, point its requests at target
//! entities via [`target_handle`], and the plugin ticks it from Bevy's frame
//! clock every `Update`, emitting [`TimelineFired`] events.

use bevy::prelude::*;

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{handle_entity, target_handle, VitrineTimeline};
pub use resources::{TimelineFired, TransformAccess};

/// System set containing the timeline tick, for ordering user systems around it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct VitrineAnimationSet;

pub struct VitrineAnimationPlugin;

impl Plugin for VitrineAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TimelineFired>().add_systems(
            Update,
            systems::tick_timelines_system.in_set(VitrineAnimationSet),
        );
    }
}
