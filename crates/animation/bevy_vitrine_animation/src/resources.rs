use bevy::prelude::*;
use vitrine_animation_core::{AnimProp, Channel, PropertyAccess, TargetHandle, TimelineEvent};

use crate::components::handle_entity;

/// Lifecycle event of a timeline, tagged with the entity that drives it.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TimelineFired {
    pub driver: Entity,
    pub event: TimelineEvent,
}

/// `PropertyAccess` over entity transforms. Rotation components are XYZ
/// Euler angles derived from (and written back to) the quaternion.
pub struct TransformAccess<'q, 'w, 's> {
    pub transforms: &'q mut Query<'w, 's, &'static mut Transform>,
}

fn read(tf: &Transform, prop: AnimProp) -> f32 {
    let axis = prop.axis();
    match prop.channel() {
        Channel::Position => tf.translation[axis],
        Channel::Scale => tf.scale[axis],
        Channel::Rotation => {
            let (x, y, z) = tf.rotation.to_euler(EulerRot::XYZ);
            [x, y, z][axis]
        }
    }
}

fn write(tf: &mut Transform, prop: AnimProp, value: f32) {
    let axis = prop.axis();
    match prop.channel() {
        Channel::Position => tf.translation[axis] = value,
        Channel::Scale => tf.scale[axis] = value,
        Channel::Rotation => {
            let (x, y, z) = tf.rotation.to_euler(EulerRot::XYZ);
            let mut euler = [x, y, z];
            euler[axis] = value;
            tf.rotation = Quat::from_euler(EulerRot::XYZ, euler[0], euler[1], euler[2]);
        }
    }
}

impl PropertyAccess for TransformAccess<'_, '_, '_> {
    fn get(&self, target: TargetHandle, prop: AnimProp) -> Option<f32> {
        let entity = handle_entity(target)?;
        self.transforms.get(entity).ok().map(|tf| read(tf, prop))
    }

    fn set(&mut self, target: TargetHandle, prop: AnimProp, value: f32) -> bool {
        let Some(entity) = handle_entity(target) else {
            return false;
        };
        match self.transforms.get_mut(entity) {
            Ok(mut tf) => {
                write(&mut tf, prop, value);
                true
            }
            Err(_) => false,
        }
    }
}
