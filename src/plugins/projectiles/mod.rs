//! Projectiles plugin: **Message-based producer → consumer** spawning + pooling.
//!
//! # Data flow (big picture)
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producers: enemy firing patterns (StageSet::Enemies), demo autopilot  │
//!│      - writes: SpawnBulletRequest message                                  │
//!│                                                                            │
//!│  (B) Consumer: allocate_bullets_from_pool                                  │
//!│      - reads: SpawnBulletRequest messages                                  │
//!│      - mutates: BulletPool free list                                       │
//!│      - mutates: BulletState, Bullet, Transform, Velocity, Visibility,      │
//!│                 CollisionLayers                                            │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) expire_bullets: lifetime / play bounds -> PendingReturn               │
//!│                                                                            │
//!│  (D) Physics emits CollisionStart messages (Avian)                         │
//!│                                                                            │
//!│  (E) process_bullet_collisions                                             │
//!│      - player bullet x enemy -> DamageEnemy message, PendingReturn         │
//!│      - enemy bullet x player -> PendingReturn                              │
//!│                                                                            │
//!│  (F) return_to_pool_commit                                                 │
//!│      - writes invariants for Inactive state, pushes back to the free list  │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers do **not** borrow `ResMut<BulletPool>`; the allocator is the single writer.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod messages;
pub mod pool;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::enemies::DamageEnemy;
use crate::plugins::stage::StageSet;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app
            .world()
            .get_resource::<Tunables>()
            .map_or_else(|| Tunables::default().bullet_pool_capacity, |t| t.bullet_pool_capacity);

        // Pool + pre-spawn
        app.insert_resource(pool::BulletPool::new(capacity))
            .add_systems(Startup, pool::init_bullet_pool);

        app.add_message::<messages::SpawnBulletRequest>()
            .add_message::<DamageEnemy>();

        // Consumer runs after this frame's producers.
        app.add_systems(
            Update,
            allocator::allocate_bullets_from_pool
                .after(StageSet::Enemies)
                .run_if(in_state(GameState::InGame)),
        );

        // Fixed pipeline: expire -> collide -> commit
        app.add_systems(
            FixedPostUpdate,
            (
                commit::expire_bullets,
                collision::process_bullet_collisions.after(CollisionEventSystems),
                commit::return_to_pool_commit,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}

#[cfg(test)]
mod tests;
