//! Host-side property access.
//!
//! The controller never owns scene objects. Each tick it reads start values
//! and writes interpolated values through a [`PropertyAccess`] supplied by
//! the rendering host (a [`Scene`], a Bevy world, a JS callback).

use serde::{Deserialize, Serialize};
use vitrine_scene_core::{NodeId, Scene};

use crate::props::{AnimProp, Channel};

/// Opaque reference to an animatable object, meaningful only to its host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetHandle(pub u64);

impl From<NodeId> for TargetHandle {
    fn from(id: NodeId) -> Self {
        TargetHandle(u64::from(id.0))
    }
}

/// Read/write access to animatable properties.
///
/// `get` returns `None` and `set` returns `false` when the target no longer
/// exists; the controller then releases the timeline instead of writing.
pub trait PropertyAccess {
    fn get(&self, target: TargetHandle, prop: AnimProp) -> Option<f32>;
    fn set(&mut self, target: TargetHandle, prop: AnimProp, value: f32) -> bool;
}

fn node_id(target: TargetHandle) -> Option<NodeId> {
    u32::try_from(target.0).ok().map(NodeId)
}

impl PropertyAccess for Scene {
    fn get(&self, target: TargetHandle, prop: AnimProp) -> Option<f32> {
        let node = self.get(node_id(target)?)?;
        let t = &node.transform;
        let channel = match prop.channel() {
            Channel::Position => &t.position,
            Channel::Rotation => &t.rotation,
            Channel::Scale => &t.scale,
        };
        Some(channel[prop.axis()])
    }

    fn set(&mut self, target: TargetHandle, prop: AnimProp, value: f32) -> bool {
        let Some(node) = node_id(target).and_then(|id| self.get_mut(id)) else {
            return false;
        };
        let t = &mut node.transform;
        let channel = match prop.channel() {
            Channel::Position => &mut t.position,
            Channel::Rotation => &mut t.rotation,
            Channel::Scale => &mut t.scale,
        };
        channel[prop.axis()] = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_scene_core::Node;

    #[test]
    fn scene_reads_and_writes_transform_components() {
        let mut scene = Scene::new();
        let id = scene.add_root(Node::group("g"));
        let handle = TargetHandle::from(id);
        assert_eq!(PropertyAccess::get(&scene, handle, AnimProp::ScaleY), Some(1.0));
        assert!(PropertyAccess::set(&mut scene, handle, AnimProp::RotationZ, 0.5));
        assert_eq!(scene.get(id).unwrap().transform.rotation.z, 0.5);
    }

    #[test]
    fn missing_nodes_are_reported() {
        let mut scene = Scene::new();
        let ghost = TargetHandle(42);
        assert_eq!(PropertyAccess::get(&scene, ghost, AnimProp::PositionX), None);
        assert!(!PropertyAccess::set(&mut scene, ghost, AnimProp::PositionX, 1.0));
        assert!(!PropertyAccess::set(&mut scene, TargetHandle(u64::MAX), AnimProp::PositionX, 1.0));
    }
}
