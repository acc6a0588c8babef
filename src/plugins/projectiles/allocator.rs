//! Spawn consumer: activate bullets from the pool.
//!
//! # Invariants
//! - The pool free list contains only valid pooled bullet entities.
//! - An empty pool is a capacity decision: the request is dropped.
//!
//! A free-list entry that no longer matches the bullet query is logged and discarded,
//! which shrinks the pool instead of crashing the stage.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{Bullet, BulletEntity, BulletState, PooledBullet};
use super::messages::{BulletKind, SpawnBulletRequest};
use super::pool::{BulletPool, active_enemy_layers, active_player_layers};

pub fn allocate_bullets_from_pool(
    tunables: Res<Tunables>,
    mut pool: ResMut<BulletPool>,
    mut reader: MessageReader<SpawnBulletRequest>,
    mut q: Query<(
        &mut BulletState,
        &mut Bullet,
        &mut Transform,
        &mut LinearVelocity,
        &mut Visibility,
        &mut CollisionLayers,
    ), With<PooledBullet>>,
) {
    let mut dropped = 0usize;

    for req in reader.read() {
        let Some(BulletEntity(e)) = pool.pop_free() else {
            dropped += 1;
            continue;
        };

        let Ok((mut state, mut bullet, mut tf, mut vel, mut vis, mut layers)) = q.get_mut(e) else {
            error!("bullet pool held {e:?}, which is not a pooled bullet");
            continue;
        };

        *state = BulletState::Active;
        bullet.reset_for_fire(req.kind, req.damage, tunables.bullet_lifetime);
        tf.translation = req.pos.extend(2.0);
        vel.0 = req.vel;
        *vis = Visibility::Visible;

        *layers = match req.kind {
            BulletKind::Player => active_player_layers(),
            BulletKind::Enemy => active_enemy_layers(),
        };
        trace!("bullet {e:?} fired by {:?}", req.owner);
    }

    if dropped > 0 {
        debug!("bullet pool empty, dropped {dropped} requests");
    }
}
