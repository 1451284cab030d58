use bevy::prelude::*;

use crate::components::VitrineTimeline;
use crate::resources::{TimelineFired, TransformAccess};

/// Advance every controller by the frame delta, writing into target transforms
/// and forwarding lifecycle events.
pub fn tick_timelines_system(
    time: Res<Time>,
    mut drivers: Query<(Entity, &mut VitrineTimeline)>,
    mut transforms: Query<&'static mut Transform>,
    mut fired: EventWriter<TimelineFired>,
) {
    let dt = time.delta_seconds();
    let mut access = TransformAccess {
        transforms: &mut transforms,
    };
    for (driver, mut timeline) in drivers.iter_mut() {
        let outputs = timeline.controller.tick(dt, &mut access);
        for event in &outputs.events {
            fired.send(TimelineFired {
                driver,
                event: event.clone(),
            });
        }
    }
}
