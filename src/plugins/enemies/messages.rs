//! Enemy lifecycle messages.

use bevy::prelude::*;

/// Inbound: something (bullets, bombs, scripts) took hp off an enemy.
#[derive(Message, Clone, Copy, Debug)]
pub struct DamageEnemy {
    pub entity: Entity,
    pub amount: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestroyCause {
    Killed,
    OutOfBounds,
}

/// Outbound: an enemy is gone. Scoring listens for `Killed`.
#[derive(Message, Clone, Debug)]
pub struct EnemyDestroyed {
    pub entity: Entity,
    pub enemy_id: String,
    pub score: i32,
    pub cause: DestroyCause,
}

/// Outbound: a killed enemy rolled its item drop.
#[derive(Message, Clone, Debug)]
pub struct ItemDropRequest {
    pub item_id: String,
    pub position: Vec2,
}
