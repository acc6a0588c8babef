//! Camera plugin (render-only).
//!
//! Stage content is authored in stage units; the camera's orthographic scale maps them to
//! pixels so the whole play field is framed.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera (scale = 1 / pixels_per_unit)
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera);
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let scale = 1.0 / tunables.pixels_per_unit.max(f32::EPSILON);

    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Projection::from(OrthographicProjection {
            scale,
            ..OrthographicProjection::default_2d()
        }),
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}
