//! Built-in demo content for `cargo run`.
//!
//! One stage, two timelines: a wave section that branches to the boss early if its
//! gunship goes down fast enough, and a boss timeline that clears the stage when the core
//! is destroyed. The player flies on autopilot and fires straight ahead.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::data::*;
use crate::plugins::player::Player;
use crate::plugins::projectiles::messages::{BulletKind, SpawnBulletRequest};
use crate::plugins::stage::{StageCommand, StageSet};

const PLAYER_FIRE_INTERVAL: f32 = 0.12;
const PLAYER_BULLET_SPEED: f32 = 16.0;

pub fn plugin(app: &mut App) {
    app.insert_resource(enemies())
        .insert_resource(patterns())
        .add_systems(OnEnter(GameState::InGame), start_demo_stage)
        .add_systems(Update, autopilot.in_set(StageSet::Control));
}

fn start_demo_stage(mut commands: MessageWriter<StageCommand>) {
    commands.write(StageCommand::Start(Box::new(stage())));
}

/// Weave up and down, fire to the right.
fn autopilot(
    time: Res<Time>,
    mut cooldown: Local<f32>,
    mut q_player: Query<(Entity, &mut Transform), With<Player>>,
    mut writer: MessageWriter<SpawnBulletRequest>,
) {
    let Ok((player, mut tf)) = q_player.single_mut() else {
        return;
    };
    tf.translation.y = 4.0 * (time.elapsed_secs() * 0.7).sin();

    *cooldown -= time.delta_secs();
    if *cooldown > 0.0 {
        return;
    }
    *cooldown = PLAYER_FIRE_INTERVAL;

    writer.write(SpawnBulletRequest {
        kind: BulletKind::Player,
        pos: tf.translation.truncate() + Vec2::X * 0.5,
        vel: Vec2::X * PLAYER_BULLET_SPEED,
        damage: 1,
        owner: Some(player),
    });
}

// -----------------------------------------------------------------------------
// Content
// -----------------------------------------------------------------------------

pub fn patterns() -> PatternDatabase {
    PatternDatabase::default()
        .with_move(MovePattern::new("drift", MovePatternType::Straight, 2.5))
        .with_move(MovePattern::new("sine", MovePatternType::Sin, 2.0))
        .with_move(MovePattern::new("loop", MovePatternType::Circle, 1.5))
        .with_move(MovePattern::new("homing", MovePatternType::Target, 2.0))
        .with_move(
            MovePattern::new("zigzag", MovePatternType::Waypoint, 3.0).with_waypoints(
                [
                    Vec2::new(-4.0, 2.0),
                    Vec2::new(-8.0, -2.0),
                    Vec2::new(-12.0, 2.0),
                    Vec2::new(-30.0, 0.0),
                ],
                false,
            ),
        )
        .with_move(
            MovePattern::new("hover", MovePatternType::Waypoint, 2.0).with_waypoints(
                [Vec2::new(-4.0, 0.0), Vec2::new(-4.0, 3.5), Vec2::new(-4.0, -3.5)],
                true,
            ),
        )
        .with_bullet(BulletPattern::new("aimed", BulletPatternType::Aimed).with_volley(1, 6.0, 1.5))
        .with_bullet(BulletPattern::new("ring8", BulletPatternType::Circle).with_volley(8, 4.0, 2.0))
        .with_bullet(
            BulletPattern::new("fan3", BulletPatternType::Spread)
                .with_volley(3, 5.0, 1.2)
                .with_spread(40.0)
                .aimed(),
        )
        .with_bullet(BulletPattern::new("storm", BulletPatternType::Random).with_volley(12, 3.5, 0.8))
}

pub fn enemies() -> EnemyDatabase {
    EnemyDatabase::default()
        .with_enemy(EnemyDef::new("zako", "Zako").with_patterns(Some("drift"), None))
        .with_enemy(
            EnemyDef::new("waver", "Waver")
                .with_stats(2, 150)
                .with_patterns(Some("sine"), Some("aimed")),
        )
        .with_enemy(
            EnemyDef::new("spinner", "Spinner")
                .with_stats(3, 200)
                .with_patterns(Some("loop"), Some("ring8")),
        )
        .with_enemy(EnemyDef::new("diver", "Diver").with_patterns(Some("homing"), None))
        .with_enemy(
            EnemyDef::new("gunship", "Gunship")
                .with_stats(6, 800)
                .with_patterns(Some("zigzag"), Some("fan3"))
                .with_item_drop("power", 0.3),
        )
        .with_enemy(
            EnemyDef::new("core", "Core")
                .with_stats(80, 10_000)
                .with_patterns(Some("hover"), Some("storm")),
        )
        .with_formation(
            EnemyFormation::new("v_wing", "V Wing")
                .with_member(FormationMember::new("zako", Vec2::ZERO, 0.0))
                .with_member(FormationMember::new("zako", Vec2::new(1.0, 1.0), 0.2))
                .with_member(FormationMember::new("zako", Vec2::new(1.0, -1.0), 0.2))
                .with_member(FormationMember::new("zako", Vec2::new(2.0, 2.0), 0.4))
                .with_member(FormationMember::new("zako", Vec2::new(2.0, -2.0), 0.4)),
        )
        .with_formation(
            EnemyFormation::new("column", "Column")
                .with_member(FormationMember::new("waver", Vec2::ZERO, 0.0))
                .with_member(FormationMember::new("waver", Vec2::ZERO, 0.5))
                .with_member(FormationMember::new("waver", Vec2::ZERO, 1.0))
                .with_member(FormationMember::new("waver", Vec2::ZERO, 1.5)),
        )
}

fn spawn_single(id: &str, enemy_id: &str, position: Vec2) -> StageEvent {
    StageEvent::new(
        id,
        StageEventKind::SpawnSingleEnemy {
            enemy_id: enemy_id.into(),
            position,
        },
    )
}

fn spawn_formation(id: &str, formation_id: &str, position: Vec2) -> StageEvent {
    StageEvent::new(
        id,
        StageEventKind::SpawnFormation {
            formation_id: formation_id.into(),
            position,
        },
    )
}

pub fn stage() -> Stage {
    let mut stage = Stage::new("demo", "Demo Stage");
    stage.meta = StageMeta {
        author: "shmup-stage".into(),
        difficulty: 2,
        description: "Waves, a branch and a boss.".into(),
        ..StageMeta::default()
    };

    let events = [
        StageEvent::new(
            "intro",
            StageEventKind::ShowMessage {
                text: "STAGE 1".into(),
                duration: 2.0,
            },
        ),
        StageEvent::new(
            "bgm",
            StageEventKind::PlayBgm {
                sound_id: "stage1".into(),
                volume: 0.8,
            },
        ),
        spawn_formation("vwing_top", "v_wing", Vec2::new(13.0, 4.0)),
        spawn_formation("vwing_bottom", "v_wing", Vec2::new(13.0, -4.0)),
        spawn_formation("column", "column", Vec2::new(13.0, 0.0)),
        spawn_single("spinner_a", "spinner", Vec2::new(12.0, 3.0)),
        spawn_single("spinner_b", "spinner", Vec2::new(12.0, -3.0)),
        spawn_single("gunship", "gunship", Vec2::new(13.0, 0.0)).with_on_destroy(
            OnDestroyFollowUp::new(StageEventType::NextTimeline, "boss", 20.0),
        ),
        spawn_single("diver_a", "diver", Vec2::new(13.0, 6.0)),
        spawn_single("diver_b", "diver", Vec2::new(13.0, -6.0)),
        StageEvent::new("speed_up", StageEventKind::SetScrollSpeed { speed: 2.0 }),
        StageEvent::new(
            "to_boss",
            StageEventKind::NextTimeline {
                timeline_id: "boss".into(),
            },
        ),
        StageEvent::new(
            "warning",
            StageEventKind::ShowMessage {
                text: "WARNING".into(),
                duration: 3.0,
            },
        ),
        StageEvent::new(
            "alarm",
            StageEventKind::PlaySound {
                sound_id: "alarm".into(),
                volume: 1.0,
            },
        ),
        StageEvent::new(
            "shake",
            StageEventKind::CameraEffect {
                effect_id: "shake".into(),
            },
        ),
        StageEvent::new(
            "core",
            StageEventKind::SpawnBoss {
                enemy_id: "core".into(),
                position: Vec2::new(12.0, 0.0),
            },
        )
        .with_on_destroy(OnDestroyFollowUp::new(StageEventType::StageClear, "", 0.0)),
        spawn_formation("escorts", "v_wing", Vec2::new(13.0, 0.0)),
    ];
    for event in events {
        if let Err(err) = stage.add_event(event) {
            error!("demo stage: {err}");
        }
    }

    if let Some(main) = stage.timeline_mut(Stage::FIRST_TIMELINE_ID) {
        main.background_id = Some("nebula".into());
        for (time, id) in [
            (0.0, "intro"),
            (0.0, "bgm"),
            (1.0, "vwing_top"),
            (3.0, "vwing_bottom"),
            (5.0, "column"),
            (7.0, "spinner_a"),
            (7.5, "spinner_b"),
            (9.0, "gunship"),
            (10.0, "diver_a"),
            (10.0, "diver_b"),
            (14.0, "speed_up"),
            (22.0, "to_boss"),
        ] {
            main.add_event(time, id);
        }
    }

    let mut boss = Timeline::new("boss", "Boss")
        .with_event(0.0, "warning")
        .with_event(0.0, "alarm")
        .with_event(0.0, "shake")
        .with_event(3.0, "core")
        .with_event(20.0, "escorts");
    boss.scroll_speed = 0.5;
    boss.background_id = Some("core_room".into());
    if let Err(err) = stage.add_timeline(boss) {
        error!("demo stage: {err}");
    }

    stage
}
