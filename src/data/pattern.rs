//! Movement and bullet pattern definitions.

use bevy::math::Vec2;
use bevy::platform::collections::HashMap;
use bevy::prelude::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovePatternType {
    #[default]
    Straight,
    Sin,
    Circle,
    Waypoint,
    Target,
    /// Reserved for hand-written behaviour; evaluates as stationary.
    Custom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovePattern {
    pub id: String,
    pub kind: MovePatternType,
    /// Units per second (radians per second for `Circle`).
    pub speed: f32,
    /// Offsets from the spawn point. Must be non-empty for `Waypoint`.
    pub waypoints: Vec<Vec2>,
    pub looped: bool,
}

impl MovePattern {
    pub fn new(id: impl Into<String>, kind: MovePatternType, speed: f32) -> Self {
        Self {
            id: id.into(),
            kind,
            speed,
            waypoints: Vec::new(),
            looped: false,
        }
    }

    pub fn with_waypoints(mut self, waypoints: impl IntoIterator<Item = Vec2>, looped: bool) -> Self {
        self.waypoints = waypoints.into_iter().collect();
        self.looped = looped;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BulletPatternType {
    #[default]
    Single,
    Spread,
    Circle,
    Aimed,
    Random,
    /// Reserved for hand-written behaviour; fires nothing.
    Custom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletPattern {
    pub id: String,
    pub kind: BulletPatternType,
    pub bullet_count: u32,
    pub bullet_speed: f32,
    /// Seconds between volleys. Must be positive.
    pub fire_rate: f32,
    /// Degrees.
    pub spread_angle: f32,
    pub aim_at_target: bool,
}

impl BulletPattern {
    pub fn new(id: impl Into<String>, kind: BulletPatternType) -> Self {
        Self {
            id: id.into(),
            kind,
            bullet_count: 1,
            bullet_speed: 5.0,
            fire_rate: 1.0,
            spread_angle: 30.0,
            aim_at_target: false,
        }
    }

    pub fn with_volley(mut self, count: u32, speed: f32, fire_rate: f32) -> Self {
        self.bullet_count = count.max(1);
        self.bullet_speed = speed;
        self.fire_rate = fire_rate;
        self
    }

    pub fn with_spread(mut self, degrees: f32) -> Self {
        self.spread_angle = degrees;
        self
    }

    pub fn aimed(mut self) -> Self {
        self.aim_at_target = true;
        self
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PatternDatabase {
    pub move_patterns: HashMap<String, MovePattern>,
    pub bullet_patterns: HashMap<String, BulletPattern>,
}

impl PatternDatabase {
    pub fn with_move(mut self, pattern: MovePattern) -> Self {
        self.move_patterns.insert(pattern.id.clone(), pattern);
        self
    }

    pub fn with_bullet(mut self, pattern: BulletPattern) -> Self {
        self.bullet_patterns.insert(pattern.id.clone(), pattern);
        self
    }

    pub fn move_pattern(&self, id: &str) -> Option<&MovePattern> {
        self.move_patterns.get(id)
    }

    pub fn bullet_pattern(&self, id: &str) -> Option<&BulletPattern> {
        self.bullet_patterns.get(id)
    }
}
