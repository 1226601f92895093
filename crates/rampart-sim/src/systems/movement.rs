//! Path-following movement system.
//!
//! Advances every walking enemy along the path by `speed * dt` and marks it
//! finished once it reaches the last waypoint.

use hecs::World;

use rampart_core::components::{Health, PathProgress, Speed};
use rampart_core::types::Position;

use crate::path::PathModel;

pub fn run(world: &mut World, path: &PathModel, dt: f64) {
    let length = path.length();
    for (_entity, (progress, speed, health, pos)) in
        world.query_mut::<(&mut PathProgress, &Speed, &Health, &mut Position)>()
    {
        if progress.finished || !health.is_alive() {
            continue;
        }
        progress.distance += speed.current.max(0.0) * dt;
        if progress.distance >= length {
            progress.distance = length;
            progress.finished = true;
        }
        let (segment, offset) = path.locate(progress.distance);
        progress.segment = segment;
        progress.offset = offset;
        *pos = Position::from(path.position_at(progress.distance));
    }
}
