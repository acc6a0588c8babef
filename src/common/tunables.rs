//! Tunable gameplay constants.
//!
//! Stage positions are expressed in stage units (the play field spans roughly 30×20 units);
//! `pixels_per_unit` only affects how the camera frames them.

use bevy::prelude::*;

/// Constants shared by the movement evaluators.
///
/// Defaults reproduce the tuned values the stage data was authored against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternConstants {
    pub sine_amplitude: f32,
    pub sine_frequency: f32,
    pub circle_radius: f32,
    pub circle_drift: f32,
    pub waypoint_epsilon: f32,
}

impl Default for PatternConstants {
    fn default() -> Self {
        Self {
            sine_amplitude: 2.0,
            sine_frequency: 3.0,
            circle_radius: 2.0,
            circle_drift: 0.5,
            waypoint_epsilon: 0.1,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_unit: f32,
    /// Half extents of the play field. Enemies and bullets outside it are removed.
    pub play_bounds: Vec2,
    /// Leftward drift for enemies whose move pattern is missing.
    pub default_drift_speed: f32,
    pub patterns: PatternConstants,
    pub enemy_bullet_damage: i32,
    pub bullet_lifetime: f32,
    pub bullet_pool_capacity: usize,
    pub rng_seed: u64,
    /// Guards against timelines that jump to themselves (or to each other) at time zero.
    /// Plain due events are never capped.
    pub max_timeline_switches_per_tick: u32,
    /// When false, pausing only stops the playhead; formation spawns and destroy-watchers
    /// keep running.
    pub pause_freezes_tasks: bool,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_unit: 32.0,
            play_bounds: Vec2::new(15.0, 10.0),
            default_drift_speed: 3.0,
            patterns: PatternConstants::default(),
            enemy_bullet_damage: 1,
            bullet_lifetime: 5.0,
            bullet_pool_capacity: 512,
            rng_seed: 0x5EED_57A6E,
            max_timeline_switches_per_tick: 16,
            pause_freezes_tasks: true,
        }
    }
}

impl Tunables {
    #[inline]
    pub fn in_bounds(&self, pos: Vec2) -> bool {
        pos.x.abs() <= self.play_bounds.x && pos.y.abs() <= self.play_bounds.y
    }
}
