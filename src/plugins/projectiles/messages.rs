//! Bullet spawn intent.
//!
//! Enemy firing patterns and the player write `SpawnBulletRequest`; only the allocator
//! touches the pool. A request the pool can't serve is dropped.

use bevy::prelude::*;

/// Which side fired. Decides collision layers and what a hit means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletKind {
    Player,
    Enemy,
}

/// One bullet, in stage units. `vel` already carries the pattern's speed.
#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnBulletRequest {
    pub kind: BulletKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    /// The shooter, for logs only. `None` for test or scripted bullets.
    pub owner: Option<Entity>,
}
