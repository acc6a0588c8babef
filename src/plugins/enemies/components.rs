use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::data::{BulletPattern, MovePattern};
use crate::patterns::MotionState;

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

/// Tags an enemy spawned by a `SpawnBoss` event.
#[derive(Component, Debug, Clone, Copy)]
pub struct Boss;

/// Which definition this enemy came from, plus what its death is worth.
#[derive(Component, Debug, Clone)]
pub struct EnemyInstance {
    pub def_id: String,
    pub score: i32,
    pub item_drop: Option<(String, f32)>,
}

#[derive(Component, Debug, Clone)]
pub struct Health {
    pub hp: i32,
}

/// Resolved move pattern (if any) plus the spawn-relative motion state.
#[derive(Component, Debug, Clone)]
pub struct Motion {
    pub pattern: Option<MovePattern>,
    pub origin: Vec2,
    pub state: MotionState,
}

impl Motion {
    pub fn new(pattern: Option<MovePattern>, origin: Vec2) -> Self {
        Self {
            pattern,
            origin,
            state: MotionState::at(origin),
        }
    }
}

/// Resolved bullet pattern. Only present when the pattern resolved and its fire rate is valid.
#[derive(Component, Debug, Clone)]
pub struct Firing {
    pub pattern: BulletPattern,
    /// Seconds until the next volley. Starts at zero so the first volley goes out on the
    /// first tick.
    pub cooldown: f32,
}

impl Firing {
    pub fn new(pattern: BulletPattern) -> Self {
        Self { pattern, cooldown: 0.0 }
    }

    /// Returns true when a volley is due this tick.
    #[inline]
    pub fn tick(&mut self, dt: f32) -> bool {
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return false;
        }
        self.cooldown = self.pattern.fire_rate;
        true
    }
}

/// Marker: enemy should be removed from the world.
///
/// Destruction is decided in `Update`; the despawn itself happens in `PostUpdate`.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Where enemies should aim and home in. Written once per tick by whoever owns the target.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct AimTarget(pub Option<Vec2>);

/// RNG behind `Random` volleys and item drop rolls.
#[derive(Resource, Debug)]
pub struct StageRng(pub SmallRng);

impl StageRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
