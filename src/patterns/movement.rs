//! Movement evaluation.
//!
//! `Straight`, `Sin` and `Circle` are closed-form in the elapsed time since spawn.
//! `Waypoint` and `Target` are incremental and read the current position.

use bevy::math::Vec2;

use crate::common::tunables::PatternConstants;
use crate::data::{MovePattern, MovePatternType};

/// What an entity carries between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub position: Vec2,
    /// Seconds since spawn.
    pub elapsed: f32,
    pub waypoint: usize,
}

impl MotionState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            elapsed: 0.0,
            waypoint: 0,
        }
    }
}

#[inline]
pub fn straight(start: Vec2, speed: f32, t: f32) -> Vec2 {
    start + Vec2::new(-speed * t, 0.0)
}

#[inline]
pub fn sine(start: Vec2, speed: f32, t: f32, k: &PatternConstants) -> Vec2 {
    Vec2::new(
        start.x - speed * t,
        start.y + k.sine_amplitude * (k.sine_frequency * t).sin(),
    )
}

#[inline]
pub fn circle(start: Vec2, speed: f32, t: f32, k: &PatternConstants) -> Vec2 {
    let angle = speed * t;
    start + Vec2::new(angle.cos(), angle.sin()) * k.circle_radius - Vec2::new(k.circle_drift * t, 0.0)
}

/// Move toward `origin + waypoints[cursor]` without overshooting.
///
/// Arrival (distance below epsilon) advances the cursor instead of moving. Past the end the
/// cursor wraps when looped, otherwise it parks on the last waypoint.
pub fn step_waypoint(
    pattern: &MovePattern,
    origin: Vec2,
    position: Vec2,
    cursor: usize,
    dt: f32,
    epsilon: f32,
) -> (Vec2, usize) {
    let len = pattern.waypoints.len();
    if len == 0 {
        return (position, 0);
    }
    let cursor = cursor.min(len - 1);
    let target = origin + pattern.waypoints[cursor];
    let to_target = target - position;
    let distance = to_target.length();

    if distance < epsilon {
        let next = if cursor + 1 < len {
            cursor + 1
        } else if pattern.looped {
            0
        } else {
            len - 1
        };
        return (position, next);
    }

    let step = (pattern.speed * dt).min(distance);
    (position + to_target / distance * step, cursor)
}

/// Home in on `target`; without one, drift left like `Straight`.
pub fn step_toward(position: Vec2, target: Option<Vec2>, speed: f32, dt: f32) -> Vec2 {
    match target {
        Some(target) => position + (target - position).normalize_or_zero() * speed * dt,
        None => position + Vec2::new(-speed * dt, 0.0),
    }
}

/// Advance one tick.
///
/// `origin` is the spawn point. A missing pattern drifts left at `default_speed`.
pub fn advance(
    pattern: Option<&MovePattern>,
    state: MotionState,
    origin: Vec2,
    dt: f32,
    target: Option<Vec2>,
    k: &PatternConstants,
    default_speed: f32,
) -> MotionState {
    let elapsed = state.elapsed + dt;
    let Some(pattern) = pattern else {
        return MotionState {
            position: straight(origin, default_speed, elapsed),
            elapsed,
            ..state
        };
    };

    let (position, waypoint) = match pattern.kind {
        MovePatternType::Straight => (straight(origin, pattern.speed, elapsed), state.waypoint),
        MovePatternType::Sin => (sine(origin, pattern.speed, elapsed, k), state.waypoint),
        MovePatternType::Circle => (circle(origin, pattern.speed, elapsed, k), state.waypoint),
        MovePatternType::Waypoint => step_waypoint(
            pattern,
            origin,
            state.position,
            state.waypoint,
            dt,
            k.waypoint_epsilon,
        ),
        MovePatternType::Target => (
            step_toward(state.position, target, pattern.speed, dt),
            state.waypoint,
        ),
        MovePatternType::Custom => (state.position, state.waypoint),
    };

    MotionState {
        position,
        elapsed,
        waypoint,
    }
}
