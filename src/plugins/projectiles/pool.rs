use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, tunables::Tunables};

use super::components::{Bullet, BulletEntity, BulletState, PooledBullet};

pub const BULLET_RADIUS: f32 = 0.12;

#[derive(Resource, Debug)]
pub struct BulletPool {
    free: Vec<BulletEntity>,
    pub capacity: usize,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<BulletEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, bullet: BulletEntity) {
        self.free.push(bullet);
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

#[inline]
pub fn active_player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [Layer::Enemy])
}

#[inline]
pub fn active_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::EnemyBullet, [Layer::Player])
}

/// “Disabled” without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::EnemyBullet, [] as [Layer; 0])
}

/// Pre-spawn pooled bullets (inactive).
///
/// Physics components stay present; inactive bullets have empty collision filters, so they
/// never generate collision events. Bullets are sensors: hits are reported, never resolved.
pub fn init_bullet_pool(mut commands: Commands, tunables: Res<Tunables>, mut pool: ResMut<BulletPool>) {
    pool.capacity = tunables.bullet_pool_capacity;
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Bullet(Pooled)"),
                PooledBullet,
                BulletState::Inactive,
                Bullet::inactive(),
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(BULLET_RADIUS * 2.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::circle(BULLET_RADIUS),
                Sensor,
                inactive_bullet_layers(),
                LinearVelocity(Vec2::ZERO),
                // Keep this always; inactive bullets won’t collide anyway because layers are empty.
                CollisionEventsEnabled,
            ))
            .id();

        pool.free.push(BulletEntity(e));
    }

    debug!("bullet pool ready ({cap} bullets)");
}
