use bevy::prelude::*;

use super::messages::BulletKind;

#[derive(Component)]
pub struct PooledBullet;

/// Pool handle. Only the allocator and the commit system move these around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletEntity(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

#[derive(Component, Debug, Clone)]
pub struct Bullet {
    pub kind: BulletKind,
    pub damage: i32,
    /// Seconds until the bullet is recycled even if it never hits anything.
    pub lifetime: f32,
}

impl Bullet {
    pub fn inactive() -> Self {
        Self {
            kind: BulletKind::Enemy,
            damage: 0,
            lifetime: 0.0,
        }
    }

    #[inline]
    pub fn reset_for_fire(&mut self, kind: BulletKind, damage: i32, lifetime: f32) {
        self.kind = kind;
        self.damage = damage;
        self.lifetime = lifetime;
    }
}
