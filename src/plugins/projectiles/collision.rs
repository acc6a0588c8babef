//! Bullet hit resolution.
//!
//! Bullets never apply damage themselves. A player bullet touching an enemy reports a
//! `DamageEnemy` message and is returned; the enemies plugin decides what the hit means.
//! Enemy bullets touching the player are only returned: player hp is not tracked here.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::enemies::DamageEnemy;

use super::components::{Bullet, BulletState, PooledBullet};
use super::messages::BulletKind;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[inline]
fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

pub fn process_bullet_collisions(
    mut started: MessageReader<CollisionStart>,
    // Fast “is this a pooled bullet?” check
    q_is_bullet: Query<(), With<PooledBullet>>,
    mut q_bullets: Query<(&Bullet, &mut BulletState), With<PooledBullet>>,
    // Read layers from collider entities
    q_layers: Query<&CollisionLayers>,
    mut damage: MessageWriter<DamageEnemy>,
    // Per-frame dedupe: one hit per bullet
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let b1 = q_is_bullet.contains(t1.collider);
        let b2 = q_is_bullet.contains(t2.collider);
        if !(b1 ^ b2) {
            continue; // must be exactly one bullet
        }
        let (bullet_side, other_side) = if b1 { (t1, t2) } else { (t2, t1) };

        if seen.contains(&bullet_side.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };

        let Ok((bullet, mut state)) = q_bullets.get_mut(bullet_side.collider) else {
            continue;
        };

        if *state != BulletState::Active {
            continue;
        }

        match bullet.kind {
            BulletKind::Player if is_in_layer(other_layers, Layer::Enemy) => {
                damage.write(DamageEnemy {
                    entity: other_side.gameplay_owner(),
                    amount: bullet.damage,
                });
            }
            BulletKind::Enemy if is_in_layer(other_layers, Layer::Player) => {
                debug!("enemy bullet hit player");
            }
            _ => continue,
        }

        seen.insert(bullet_side.collider);
        *state = BulletState::PendingReturn;
    }
}
