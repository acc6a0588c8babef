//! Enemies plugin: the live side of stage content.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! 1) FACTS live in components/resources:
//!    - `EnemyInstance`, `Health` describe gameplay reality.
//!    - `Motion` / `Firing` carry the resolved patterns plus their per-entity state.
//!    - `AimTarget` is the one place enemies learn where the player is.
//!
//! 2) RULES mutate facts in predictable places (`systems.rs`):
//!    - damage arrives as `DamageEnemy` messages, never as direct `Health` writes.
//!    - motion and firing are thin wrappers around the pure evaluators in `crate::patterns`.
//!    - destruction is decided once, tagged `PendingDespawn`, and reported as
//!      `EnemyDestroyed`.
//!
//! 3) STRUCTURE changes are centralized:
//!    - spawning only happens through `spawn::spawn_enemy`.
//!    - despawning only happens in `despawn_marked_enemies` (PostUpdate).

use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::projectiles::messages::SpawnBulletRequest;
use crate::plugins::stage::StageSet;

pub mod components;
pub mod messages;
pub mod spawn;
pub mod systems;

pub use components::{AimTarget, Boss, Enemy, EnemyInstance, Firing, Health, Motion, PendingDespawn, StageRng};
pub use messages::{DamageEnemy, DestroyCause, EnemyDestroyed, ItemDropRequest};
pub use spawn::spawn_enemy;

pub fn plugin(app: &mut App) {
    let seed = app
        .world()
        .get_resource::<Tunables>()
        .map_or_else(|| Tunables::default().rng_seed, |t| t.rng_seed);

    app.add_message::<DamageEnemy>()
        .add_message::<EnemyDestroyed>()
        .add_message::<ItemDropRequest>()
        .add_message::<SpawnBulletRequest>()
        .init_resource::<AimTarget>()
        .insert_resource(StageRng::seeded(seed));

    app.add_systems(
        Update,
        (
            systems::apply_enemy_damage,
            systems::drive_enemy_motion,
            systems::fire_enemy_patterns,
            systems::detect_enemy_destruction,
        )
            .chain()
            .in_set(StageSet::Enemies),
    );

    // PostUpdate structural cleanup: despawn after every Update reader has seen the mark.
    app.add_systems(
        PostUpdate,
        systems::despawn_marked_enemies.run_if(in_state(GameState::InGame)),
    );
}
