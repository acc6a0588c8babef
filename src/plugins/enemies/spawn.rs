//! Live enemy factory.
//!
//! The stage dispatcher decides *what* to spawn and *where*; this module owns the shape of
//! the resulting entity. Everything an enemy needs for its whole life is inserted here in one
//! bundle, so no later system has to add or remove gameplay components.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::data::{BulletPattern, EnemyDef, MovePattern, PatternDatabase};

use super::components::{Boss, Enemy, EnemyInstance, Firing, Health, Motion};

pub const ENEMY_RADIUS: f32 = 0.4;
pub const BOSS_RADIUS: f32 = 1.2;

/// Look up the definition's pattern ids.
///
/// Missing ids are legal (straight drift, no firing). Ids that are set but don't resolve
/// are a configuration miss: logged, then treated as missing. A bullet pattern with a
/// non-positive fire rate is rejected the same way.
pub fn resolve_patterns(
    def: &EnemyDef,
    patterns: &PatternDatabase,
) -> (Option<MovePattern>, Option<BulletPattern>) {
    let movement = def.move_pattern_id.as_deref().and_then(|id| {
        let found = patterns.move_pattern(id).cloned();
        if found.is_none() {
            warn!("enemy '{}': move pattern '{id}' not found", def.id);
        }
        found
    });

    let firing = def.bullet_pattern_id.as_deref().and_then(|id| {
        let Some(pattern) = patterns.bullet_pattern(id) else {
            warn!("enemy '{}': bullet pattern '{id}' not found", def.id);
            return None;
        };
        if pattern.fire_rate <= 0.0 || pattern.fire_rate.is_nan() {
            warn!(
                "enemy '{}': bullet pattern '{id}' has fire_rate {}, firing disabled",
                def.id, pattern.fire_rate
            );
            return None;
        }
        Some(pattern.clone())
    });

    (movement, firing)
}

/// Sprite for an enemy.
///
/// Uses the definition's asset path when an `AssetServer` is around; otherwise a plain quad
/// so headless apps and missing art still produce something visible.
pub fn enemy_sprite(def: &EnemyDef, boss: bool, assets: Option<&AssetServer>) -> Sprite {
    let radius = if boss { BOSS_RADIUS } else { ENEMY_RADIUS };
    let size = Some(Vec2::splat(radius * 2.0));

    if let (Some(path), Some(assets)) = (def.sprite.as_ref(), assets) {
        return Sprite {
            image: assets.load(path.clone()),
            custom_size: size,
            ..default()
        };
    }

    let color = if boss {
        Color::srgb(0.85, 0.2, 0.75)
    } else {
        Color::srgb(0.9, 0.25, 0.25)
    };
    Sprite {
        color,
        custom_size: size,
        ..default()
    }
}

/// Spawn one live enemy at `position` (stage units) and return its handle.
pub fn spawn_enemy(
    commands: &mut Commands,
    def: &EnemyDef,
    patterns: &PatternDatabase,
    position: Vec2,
    boss: bool,
    assets: Option<&AssetServer>,
) -> Entity {
    let (movement, firing) = resolve_patterns(def, patterns);
    let radius = if boss { BOSS_RADIUS } else { ENEMY_RADIUS };

    let item_drop = def
        .item_drop_id
        .as_ref()
        .filter(|id| !id.is_empty())
        .map(|id| (id.clone(), def.item_drop_rate));

    let mut entity = commands.spawn((
        Name::new(format!("Enemy({})", def.id)),
        Enemy,
        EnemyInstance {
            def_id: def.id.clone(),
            score: def.score,
            item_drop,
        },
        Health { hp: def.hp },
        Motion::new(movement, position),
        enemy_sprite(def, boss, assets),
        Transform::from_translation(position.extend(1.0)),
        RigidBody::Kinematic,
        Collider::circle(radius),
        CollisionLayers::new(Layer::Enemy, [Layer::Player, Layer::PlayerBullet]),
        Occluder2d::circle(radius),
        DespawnOnExit(GameState::InGame),
    ));

    if boss {
        entity.insert(Boss);
    }
    if let Some(pattern) = firing {
        entity.insert(Firing::new(pattern));
    }

    debug!("spawned enemy '{}' at {position}", def.id);
    entity.id()
}

/// Whether `pos` has left the play field.
#[inline]
pub fn out_of_bounds(tunables: &Tunables, pos: Vec2) -> bool {
    !tunables.in_bounds(pos)
}
