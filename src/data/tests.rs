use bevy::math::Vec2;

use super::*;
use crate::common::error::StageError;

fn times(t: &Timeline) -> Vec<f32> {
    t.events().iter().map(|e| e.time).collect()
}

#[test]
fn new_stage_has_exactly_one_timeline() {
    let stage = Stage::new("s1", "Stage 1");
    assert_eq!(stage.timeline_count(), 1);
    assert_eq!(stage.first_timeline().unwrap().id, Stage::FIRST_TIMELINE_ID);
}

#[test]
fn timeline_ids_are_unique() {
    let mut stage = Stage::new("s1", "Stage 1");
    stage.add_timeline(Timeline::new("boss", "Boss")).unwrap();

    let err = stage.add_timeline(Timeline::new("boss", "Other")).unwrap_err();
    assert_eq!(err, StageError::DuplicateTimeline("boss".into()));
    assert_eq!(stage.timeline_count(), 2);
}

#[test]
fn event_ids_are_unique_and_removal_leaves_dangling_references() {
    let mut stage = Stage::new("s1", "Stage 1");
    stage.add_event(StageEvent::new("e1", StageEventKind::StageClear)).unwrap();
    assert!(stage.add_event(StageEvent::new("e1", StageEventKind::None)).is_err());

    stage
        .timeline_mut(Stage::FIRST_TIMELINE_ID)
        .unwrap()
        .add_event(1.0, "e1");
    assert!(stage.remove_event("e1").is_some());

    let tl = stage.first_timeline().unwrap();
    assert_eq!(tl.events().len(), 1);
    assert!(stage.event(&tl.events()[0].event_id).is_none());
}

#[test]
fn timeline_events_stay_sorted_after_inserts_and_time_edits() {
    let mut tl = Timeline::new("t", "T")
        .with_event(5.0, "c")
        .with_event(1.0, "a")
        .with_event(3.0, "b");
    assert_eq!(times(&tl), vec![1.0, 3.0, 5.0]);

    // Move "a" to the end.
    assert!(tl.set_event_time(0, 9.0));
    assert_eq!(times(&tl), vec![3.0, 5.0, 9.0]);
    assert_eq!(tl.events()[2].event_id, "a");

    assert!(!tl.set_event_time(10, 1.0));
}

#[test]
fn sort_is_stable_for_equal_times() {
    let tl = Timeline::new("t", "T")
        .with_event(2.0, "first")
        .with_event(2.0, "second")
        .with_event(0.0, "zero");
    let ids: Vec<_> = tl.events().iter().map(|e| e.event_id.as_str()).collect();
    assert_eq!(ids, vec!["zero", "first", "second"]);
}

#[test]
fn times_are_clamped_non_negative() {
    let mut tl = Timeline::new("t", "T").with_event(-3.0, "a").with_event(f32::NAN, "b");
    assert!(tl.events().iter().all(|e| e.time >= 0.0));

    tl.set_event_time(0, -1.0);
    assert!(tl.events().iter().all(|e| e.time == 0.0));
}

#[test]
fn due_count_counts_inclusive() {
    let tl = Timeline::new("t", "T")
        .with_event(1.0, "a")
        .with_event(2.0, "b")
        .with_event(2.0, "c")
        .with_event(4.0, "d");
    assert_eq!(tl.due_count(0.5), 0);
    assert_eq!(tl.due_count(2.0), 3);
    assert_eq!(tl.due_count(10.0), 4);
}

#[test]
fn follow_up_window() {
    let windowed = OnDestroyFollowUp::new(StageEventType::StageClear, "", 10.0);
    assert!(windowed.allows(9.99));
    assert!(windowed.allows(10.0));
    assert!(!windowed.allows(10.01));

    let always = OnDestroyFollowUp::new(StageEventType::StageClear, "", 0.0);
    assert!(always.allows(0.0));
    assert!(always.allows(1.0e6));
}

#[test]
fn follow_up_builds_event_of_target_kind() {
    let f = OnDestroyFollowUp::new(StageEventType::NextTimeline, "boss", 0.0);
    let ev = f.to_event("wave1");
    assert_eq!(ev.kind, StageEventKind::NextTimeline { timeline_id: "boss".into() });
    assert_eq!(ev.kind.event_type(), StageEventType::NextTimeline);
    assert!(ev.on_destroy.is_none());
}

#[test]
fn formation_member_delay_is_non_negative() {
    let m = FormationMember::new("zako", Vec2::ONE, -1.0);
    assert_eq!(m.spawn_delay, 0.0);
}

#[test]
fn databases_resolve_by_id() {
    let enemies = EnemyDatabase::default()
        .with_enemy(EnemyDef::new("zako", "Zako"))
        .with_formation(EnemyFormation::new("v", "V"));
    assert!(enemies.enemy("zako").is_some());
    assert!(enemies.enemy("nope").is_none());
    assert!(enemies.formation("v").is_some());

    let patterns = PatternDatabase::default()
        .with_move(MovePattern::new("m", MovePatternType::Sin, 2.0))
        .with_bullet(BulletPattern::new("b", BulletPatternType::Spread).with_volley(0, 4.0, 0.5));
    assert_eq!(patterns.move_pattern("m").unwrap().kind, MovePatternType::Sin);
    // A zero count is lifted to one bullet.
    assert_eq!(patterns.bullet_pattern("b").unwrap().bullet_count, 1);
}
