//! Projectiles plugin tests (Bevy 0.18 + Avian 0.5), **deterministic**.
//!
//! These tests avoid relying on the full physics pipeline to generate collisions.
//! Instead, they **inject `CollisionStart` messages directly** and then run the
//! collision system once.
use std::time::Duration;

use avian2d::prelude::*;
use bevy::{ecs::message::Messages, prelude::*};

use super::messages::{BulletKind, SpawnBulletRequest};
use super::{allocator, collision, commit, components, pool};
use crate::common::layers::Layer;
use crate::common::test_utils::{drain_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::enemies::DamageEnemy;

// --------------------------------------------------------------------------------------
// Helpers
// --------------------------------------------------------------------------------------

fn pooled_world(capacity: usize) -> World {
    let mut world = World::new();
    world.insert_resource(Tunables {
        bullet_pool_capacity: capacity,
        ..Tunables::default()
    });
    world.insert_resource(pool::BulletPool::new(0));
    world.init_resource::<Messages<SpawnBulletRequest>>();
    world.init_resource::<Messages<DamageEnemy>>();
    world.init_resource::<Messages<CollisionStart>>();
    run_system_once(&mut world, pool::init_bullet_pool);
    world
}

fn request(kind: BulletKind, pos: Vec2, vel: Vec2) -> SpawnBulletRequest {
    SpawnBulletRequest {
        kind,
        pos,
        vel,
        damage: 2,
        owner: None,
    }
}

fn active_bullets(world: &mut World) -> Vec<Entity> {
    world
        .query::<(Entity, &components::BulletState)>()
        .iter(world)
        .filter(|(_, s)| **s == components::BulletState::Active)
        .map(|(e, _)| e)
        .collect()
}

/// A bare active bullet, enough for the collision system.
fn spawn_bullet(world: &mut World, kind: BulletKind, damage: i32) -> Entity {
    let layers = match kind {
        BulletKind::Player => pool::active_player_layers(),
        BulletKind::Enemy => pool::active_enemy_layers(),
    };
    world
        .spawn((
            components::PooledBullet,
            components::BulletState::Active,
            components::Bullet {
                kind,
                damage,
                lifetime: 5.0,
            },
            layers,
        ))
        .id()
}

/// Convenience: write a CollisionStart message.
fn write_collision_start(world: &mut World, collider1: Entity, collider2: Entity) {
    world.write_message(CollisionStart {
        collider1,
        collider2,
        body1: Some(collider1),
        body2: Some(collider2),
    });
}

fn set_delta(world: &mut World, dt: f32) {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(dt));
    world.insert_resource(time);
}

// --------------------------------------------------------------------------------------
// Pooling
// --------------------------------------------------------------------------------------

#[test]
fn init_bullet_pool_spawns_capacity_bullets_inactive() {
    let mut world = pooled_world(8);

    assert_eq!(world.resource::<pool::BulletPool>().free_len(), 8);
    assert_eq!(world.resource::<pool::BulletPool>().capacity, 8);

    let mut q = world.query::<(
        &components::PooledBullet,
        &components::BulletState,
        &Visibility,
        &CollisionLayers,
        &CollisionEventsEnabled,
    )>();
    assert_eq!(q.iter(&world).count(), 8);

    for (_pb, state, vis, layers, _events) in q.iter(&world) {
        assert_eq!(*state, components::BulletState::Inactive);
        assert_eq!(*vis, Visibility::Hidden);
        // Inactive bullets collide with nothing.
        assert!(!layers.filters.has_all(Layer::Enemy));
        assert!(!layers.filters.has_all(Layer::Player));
    }
}

#[test]
fn allocator_activates_bullets_per_kind() {
    let mut world = pooled_world(4);
    world.write_message(request(BulletKind::Enemy, Vec2::new(3.0, 1.0), Vec2::new(-4.0, 0.0)));
    world.write_message(request(BulletKind::Player, Vec2::new(-9.0, 0.0), Vec2::new(12.0, 0.0)));

    run_system_once(&mut world, allocator::allocate_bullets_from_pool);

    assert_eq!(world.resource::<pool::BulletPool>().free_len(), 2);
    let active = active_bullets(&mut world);
    assert_eq!(active.len(), 2);

    for e in active {
        let bullet = world.get::<components::Bullet>(e).unwrap().clone();
        let layers = *world.get::<CollisionLayers>(e).unwrap();
        let tf = world.get::<Transform>(e).unwrap();
        let vel = world.get::<LinearVelocity>(e).unwrap();
        assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Visible);
        assert_eq!(bullet.lifetime, Tunables::default().bullet_lifetime);
        assert_eq!(bullet.damage, 2);

        match bullet.kind {
            BulletKind::Enemy => {
                assert_eq!(tf.translation.truncate(), Vec2::new(3.0, 1.0));
                assert_eq!(vel.0, Vec2::new(-4.0, 0.0));
                assert!(layers.memberships.has_all(Layer::EnemyBullet));
                assert!(layers.filters.has_all(Layer::Player));
            }
            BulletKind::Player => {
                assert_eq!(vel.0, Vec2::new(12.0, 0.0));
                assert!(layers.memberships.has_all(Layer::PlayerBullet));
                assert!(layers.filters.has_all(Layer::Enemy));
            }
        }
    }
}

#[test]
fn allocator_drops_requests_when_pool_is_empty() {
    let mut world = pooled_world(2);
    for _ in 0..5 {
        world.write_message(request(BulletKind::Enemy, Vec2::ZERO, Vec2::NEG_X));
    }

    run_system_once(&mut world, allocator::allocate_bullets_from_pool);

    assert_eq!(active_bullets(&mut world).len(), 2);
    assert_eq!(world.resource::<pool::BulletPool>().free_len(), 0);
}

#[test]
fn bullets_expire_on_lifetime_or_leaving_bounds() {
    let mut world = pooled_world(2);
    world.write_message(request(BulletKind::Enemy, Vec2::ZERO, Vec2::NEG_X));
    world.write_message(request(BulletKind::Enemy, Vec2::new(15.5, 0.0), Vec2::X));
    run_system_once(&mut world, allocator::allocate_bullets_from_pool);

    // Out of bounds goes immediately; the other one lives out its lifetime.
    set_delta(&mut world, 0.1);
    run_system_once(&mut world, commit::expire_bullets);
    assert_eq!(active_bullets(&mut world).len(), 1);

    set_delta(&mut world, Tunables::default().bullet_lifetime);
    run_system_once(&mut world, commit::expire_bullets);
    assert!(active_bullets(&mut world).is_empty());
}

#[test]
fn return_to_pool_commit_deactivates_and_recycles() {
    let mut world = pooled_world(1);
    world.write_message(request(BulletKind::Player, Vec2::ZERO, Vec2::X));
    run_system_once(&mut world, allocator::allocate_bullets_from_pool);
    let e = active_bullets(&mut world)[0];
    assert_eq!(world.resource::<pool::BulletPool>().free_len(), 0);

    *world.get_mut::<components::BulletState>(e).unwrap() = components::BulletState::PendingReturn;
    run_system_once(&mut world, commit::return_to_pool_commit);

    assert_eq!(
        *world.get::<components::BulletState>(e).unwrap(),
        components::BulletState::Inactive
    );
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::ZERO);
    assert!(!world.get::<CollisionLayers>(e).unwrap().filters.has_all(Layer::Enemy));
    assert_eq!(world.resource::<pool::BulletPool>().free_len(), 1);
}

// --------------------------------------------------------------------------------------
// Collision system tests (inject CollisionStart messages)
// --------------------------------------------------------------------------------------

#[test]
fn player_bullet_hitting_enemy_reports_damage_once() {
    let mut world = pooled_world(0);
    let bullet = spawn_bullet(&mut world, BulletKind::Player, 3);
    let enemy = world
        .spawn(CollisionLayers::new(Layer::Enemy, [Layer::PlayerBullet]))
        .id();

    // Duplicate contacts in one step must count once.
    write_collision_start(&mut world, bullet, enemy);
    write_collision_start(&mut world, enemy, bullet);
    run_system_once(&mut world, collision::process_bullet_collisions);

    assert_eq!(
        *world.get::<components::BulletState>(bullet).unwrap(),
        components::BulletState::PendingReturn
    );
    let hits = drain_messages::<DamageEnemy>(&mut world);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, enemy);
    assert_eq!(hits[0].amount, 3);
}

#[test]
fn enemy_bullet_hitting_player_is_absorbed_without_enemy_damage() {
    let mut world = pooled_world(0);
    let bullet = spawn_bullet(&mut world, BulletKind::Enemy, 1);
    let player = world
        .spawn(CollisionLayers::new(Layer::Player, [Layer::EnemyBullet]))
        .id();

    write_collision_start(&mut world, player, bullet);
    run_system_once(&mut world, collision::process_bullet_collisions);

    assert_eq!(
        *world.get::<components::BulletState>(bullet).unwrap(),
        components::BulletState::PendingReturn
    );
    assert!(drain_messages::<DamageEnemy>(&mut world).is_empty());
}

#[test]
fn mismatched_contacts_are_ignored() {
    let mut world = pooled_world(0);
    let bullet = spawn_bullet(&mut world, BulletKind::Enemy, 1);
    let enemy = world
        .spawn(CollisionLayers::new(Layer::Enemy, [Layer::PlayerBullet]))
        .id();
    let other_bullet = spawn_bullet(&mut world, BulletKind::Player, 1);

    write_collision_start(&mut world, bullet, enemy);
    write_collision_start(&mut world, bullet, other_bullet);
    run_system_once(&mut world, collision::process_bullet_collisions);

    assert_eq!(
        *world.get::<components::BulletState>(bullet).unwrap(),
        components::BulletState::Active
    );
    assert!(drain_messages::<DamageEnemy>(&mut world).is_empty());
}
