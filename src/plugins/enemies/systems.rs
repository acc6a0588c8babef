//! Per-tick enemy rules.
//!
//! Order inside `StageSet::Enemies`:
//! 1. apply damage reported since last tick
//! 2. move
//! 3. fire
//! 4. decide destruction (hp <= 0, or out of bounds) and mark `PendingDespawn`
//!
//! Despawning itself is deferred to `PostUpdate` so destroy-watchers running later in the
//! same frame see the entity as gone (via `PendingDespawn`) without racing the despawn.

use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::Tunables;
use crate::patterns::{self, movement};
use crate::plugins::projectiles::messages::{BulletKind, SpawnBulletRequest};

use super::components::{AimTarget, Enemy, EnemyInstance, Firing, Health, Motion, PendingDespawn, StageRng};
use super::messages::{DamageEnemy, DestroyCause, EnemyDestroyed, ItemDropRequest};
use super::spawn::out_of_bounds;

type LiveEnemy = (With<Enemy>, Without<PendingDespawn>);

pub fn apply_enemy_damage(
    mut reader: MessageReader<DamageEnemy>,
    mut q: Query<&mut Health, LiveEnemy>,
) {
    for hit in reader.read() {
        // Already dead or never an enemy: nothing to do.
        let Ok(mut health) = q.get_mut(hit.entity) else {
            continue;
        };
        health.hp -= hit.amount;
    }
}

pub fn drive_enemy_motion(
    time: Res<Time>,
    tunables: Res<Tunables>,
    aim: Res<AimTarget>,
    mut q: Query<(&mut Motion, &mut Transform), LiveEnemy>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut motion, mut tf) in &mut q {
        let next = movement::advance(
            motion.pattern.as_ref(),
            motion.state,
            motion.origin,
            dt,
            aim.0,
            &tunables.patterns,
            tunables.default_drift_speed,
        );
        motion.state = next;
        tf.translation = next.position.extend(tf.translation.z);
    }
}

pub fn fire_enemy_patterns(
    time: Res<Time>,
    tunables: Res<Tunables>,
    aim: Res<AimTarget>,
    mut rng: ResMut<StageRng>,
    mut q: Query<(Entity, &mut Firing, &Transform), LiveEnemy>,
    mut writer: MessageWriter<SpawnBulletRequest>,
) {
    let dt = time.delta_secs();

    for (entity, mut firing, tf) in &mut q {
        if !firing.tick(dt) {
            continue;
        }

        let origin = tf.translation.truncate();
        let volley = patterns::fire(&firing.pattern, origin, aim.0, &mut rng.0);
        for dir in volley.directions {
            writer.write(SpawnBulletRequest {
                kind: BulletKind::Enemy,
                pos: origin,
                vel: dir * volley.speed,
                damage: tunables.enemy_bullet_damage,
                owner: Some(entity),
            });
        }
    }
}

pub fn detect_enemy_destruction(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut rng: ResMut<StageRng>,
    q: Query<(Entity, &EnemyInstance, &Health, &Transform), LiveEnemy>,
    mut destroyed: MessageWriter<EnemyDestroyed>,
    mut drops: MessageWriter<ItemDropRequest>,
) {
    for (entity, instance, health, tf) in &q {
        let position = tf.translation.truncate();

        let cause = if health.hp <= 0 {
            DestroyCause::Killed
        } else if out_of_bounds(&tunables, position) {
            DestroyCause::OutOfBounds
        } else {
            continue;
        };

        commands.entity(entity).insert(PendingDespawn);

        if cause == DestroyCause::Killed {
            if let Some((item_id, rate)) = &instance.item_drop {
                if rng.0.random::<f32>() <= *rate {
                    drops.write(ItemDropRequest {
                        item_id: item_id.clone(),
                        position,
                    });
                }
            }
        }

        debug!("enemy '{}' destroyed ({cause:?})", instance.def_id);
        destroyed.write(EnemyDestroyed {
            entity,
            enemy_id: instance.def_id.clone(),
            score: if cause == DestroyCause::Killed { instance.score } else { 0 },
            cause,
        });
    }
}

/// Despawn enemies marked for removal.
///
/// Centralizing despawn in one system keeps structural changes predictable.
pub fn despawn_marked_enemies(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
