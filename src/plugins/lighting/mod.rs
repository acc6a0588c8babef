//! Lighting plugin (Firefly) (render-only).
//!
//! A dim light over the play field plus a glow on every boss. Enemies already carry an
//! `Occluder2d`, so they cast shadows from both.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::enemies::Boss;

#[derive(Component)]
pub struct StageLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, light_bosses.run_if(in_state(GameState::InGame)));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("StageLight"),
        StageLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            range: 24.0,
            ..default()
        },
        Transform::from_xyz(-6.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Give each newly spawned boss its own light; it goes away with the boss.
fn light_bosses(mut commands: Commands, q_new: Query<Entity, Added<Boss>>) {
    for boss in &q_new {
        commands.entity(boss).with_child((
            Name::new("BossLight"),
            PointLight2d {
                color: Color::srgb(0.9, 0.3, 0.85),
                range: 6.0,
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 9.0),
        ));
    }
}
