//! Expiry + return commit: recycle bullets back into the pool.
//!
//! `return_to_pool_commit` is the "owner" of the *Inactive invariants*.
//!
//! Invariant: Inactive bullets must be:
//! - hidden
//! - velocity = 0
//! - collide with nothing (filters empty)
//!
//! Centralizing these writes here prevents inconsistencies.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{Bullet, BulletEntity, BulletState, PooledBullet};
use super::pool::{BulletPool, inactive_bullet_layers};

/// Mark active bullets whose lifetime ran out, or that left the play field, for return.
pub fn expire_bullets(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut Bullet, &mut BulletState, &Transform), With<PooledBullet>>,
) {
    let dt = time.delta_secs();

    for (mut bullet, mut state, tf) in &mut q {
        if *state != BulletState::Active {
            continue;
        }

        bullet.lifetime -= dt;
        if bullet.lifetime <= 0.0 || !tunables.in_bounds(tf.translation.truncate()) {
            *state = BulletState::PendingReturn;
        }
    }
}

pub fn return_to_pool_commit(
    mut pool: ResMut<BulletPool>,
    mut q: Query<(
        Entity,
        &mut BulletState,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    ), With<PooledBullet>>,
) {
    for (e, mut state, mut vis, mut vel, mut layers) in &mut q {
        if *state != BulletState::PendingReturn { continue; }

        *state = BulletState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_bullet_layers();

        pool.push_free(BulletEntity(e));
    }
}
