//! Player plugin.
//!
//! The player is the stage's aim target. Input handling lives elsewhere; this plugin only
//! spawns the ship and publishes where it is.
//!
//! ```text
//! OnEnter(InGame): spawn Player
//! Update (StageSet::Control): Player Transform -> AimTarget
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::enemies::AimTarget;
use crate::plugins::stage::StageSet;

pub const PLAYER_START: Vec2 = Vec2::new(-10.0, 0.0);
pub const PLAYER_RADIUS: f32 = 0.35;

#[derive(Component)]
pub struct Player;

pub fn plugin(app: &mut App) {
    app.init_resource::<AimTarget>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, track_aim_target.in_set(StageSet::Control));
}

fn spawn(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::Enemy, Layer::EnemyBullet]);

    commands.spawn((
        Name::new("Player"),
        Player,
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(PLAYER_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(PLAYER_START.extend(1.0)),
        RigidBody::Kinematic,
        Collider::circle(PLAYER_RADIUS),
        layers,
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

/// Publish the player's position. No player (or more than one) means no target.
fn track_aim_target(q_player: Query<&Transform, With<Player>>, mut aim: ResMut<AimTarget>) {
    aim.0 = q_player.single().ok().map(|tf| tf.translation.truncate());
}
