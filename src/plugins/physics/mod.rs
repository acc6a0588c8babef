//! Physics plugin: Avian for collision detection only.
//!
//! Stage units are already "meters" from Avian's point of view, and nothing falls.

use avian2d::prelude::*;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default().with_length_unit(1.0));
    app.insert_resource(Gravity(Vec2::ZERO));
}
