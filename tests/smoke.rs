mod common;

use bevy::prelude::*;
use shmup_stage::plugins::enemies::AimTarget;
use shmup_stage::plugins::player::{PLAYER_START, Player};
use shmup_stage::plugins::stage::{RunState, StageRunner};

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();
    common::run_frames(&mut app, 3);

    // Nothing runs until someone starts a stage.
    assert_eq!(app.world().resource::<StageRunner>().state(), RunState::NotStarted);
}

#[test]
fn player_is_published_as_aim_target() {
    let mut app = common::app_headless();
    common::run_frames(&mut app, 3);

    let players = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .iter(app.world())
        .count();
    assert_eq!(players, 1);

    let aim = app.world().resource::<AimTarget>().0.expect("aim target");
    assert!((aim - PLAYER_START).length() < 1e-4, "aim target at {aim}");
}
