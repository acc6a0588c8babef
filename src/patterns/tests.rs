use bevy::math::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::firing::{self, ring, spread, toward};
use super::movement::{self, MotionState, step_toward, step_waypoint};
use crate::common::tunables::PatternConstants;
use crate::data::{BulletPattern, BulletPatternType, MovePattern, MovePatternType};

const EPS: f32 = 1e-5;

fn k() -> PatternConstants {
    PatternConstants::default()
}

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < EPS
}

/// Run `advance` for `steps` ticks of `dt`.
fn run(pattern: Option<&MovePattern>, origin: Vec2, dt: f32, steps: usize, target: Option<Vec2>) -> MotionState {
    let mut state = MotionState::at(origin);
    for _ in 0..steps {
        state = movement::advance(pattern, state, origin, dt, target, &k(), 3.0);
    }
    state
}

// -----------------------------------------------------------------------------
// Movement
// -----------------------------------------------------------------------------

#[test]
fn straight_drifts_left_at_speed() {
    let p = MovePattern::new("s", MovePatternType::Straight, 4.0);
    let s = run(Some(&p), Vec2::new(10.0, 1.0), 0.25, 4, None);
    assert!(approx(s.position, Vec2::new(6.0, 1.0)));
    assert!((s.elapsed - 1.0).abs() < EPS);
}

#[test]
fn missing_pattern_uses_default_drift() {
    let s = run(None, Vec2::new(10.0, 0.0), 0.5, 2, Some(Vec2::ZERO));
    assert!(approx(s.position, Vec2::new(7.0, 0.0)));
}

#[test]
fn sine_matches_closed_form() {
    let start = Vec2::new(12.0, -1.0);
    let t = 0.7;
    let got = movement::sine(start, 2.0, t, &k());
    let want = Vec2::new(12.0 - 2.0 * t, -1.0 + 2.0 * (3.0 * t).sin());
    assert!(approx(got, want));
}

#[test]
fn circle_is_bit_identical_for_identical_inputs() {
    let start = Vec2::new(3.0, 4.0);
    for i in 0..200 {
        let t = i as f32 * 0.037;
        let a = movement::circle(start, 1.7, t, &k());
        let b = movement::circle(start, 1.7, t, &k());
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }
}

#[test]
fn circle_starts_one_radius_right_of_origin() {
    let start = Vec2::new(3.0, 4.0);
    assert!(approx(movement::circle(start, 1.0, 0.0, &k()), Vec2::new(5.0, 4.0)));
}

#[test]
fn waypoint_parks_on_last_point_without_loop() {
    let p = MovePattern::new("w", MovePatternType::Waypoint, 10.0)
        .with_waypoints([Vec2::new(-2.0, 0.0), Vec2::new(-2.0, 2.0)], false);
    let origin = Vec2::new(5.0, 0.0);
    let s = run(Some(&p), origin, 0.05, 200, None);
    assert!(approx(s.position, origin + Vec2::new(-2.0, 2.0)));
    assert_eq!(s.waypoint, 1);
}

#[test]
fn waypoint_wraps_when_looped() {
    let p = MovePattern::new("w", MovePatternType::Waypoint, 1.0)
        .with_waypoints([Vec2::ZERO, Vec2::X], true);

    // Sitting on the last point: arrival wraps the cursor to the first.
    let (pos, cursor) = step_waypoint(&p, Vec2::ZERO, Vec2::X, 1, 0.1, 0.1);
    assert_eq!(pos, Vec2::X);
    assert_eq!(cursor, 0);
}

#[test]
fn waypoint_step_never_overshoots() {
    let p = MovePattern::new("w", MovePatternType::Waypoint, 100.0).with_waypoints([Vec2::X], false);
    let (pos, cursor) = step_waypoint(&p, Vec2::ZERO, Vec2::ZERO, 0, 1.0, 0.1);
    assert_eq!(pos, Vec2::X);
    assert_eq!(cursor, 0);
}

#[test]
fn waypoint_without_points_stays_put() {
    let p = MovePattern::new("w", MovePatternType::Waypoint, 5.0);
    let s = run(Some(&p), Vec2::new(1.0, 1.0), 0.1, 10, None);
    assert_eq!(s.position, Vec2::new(1.0, 1.0));
}

#[test]
fn target_homes_in_and_falls_back_to_straight() {
    let toward_target = step_toward(Vec2::ZERO, Some(Vec2::new(0.0, 10.0)), 2.0, 0.5);
    assert!(approx(toward_target, Vec2::new(0.0, 1.0)));

    let no_target = step_toward(Vec2::ZERO, None, 2.0, 0.5);
    assert!(approx(no_target, Vec2::new(-1.0, 0.0)));
}

#[test]
fn custom_pattern_is_stationary() {
    let p = MovePattern::new("c", MovePatternType::Custom, 9.0);
    let s = run(Some(&p), Vec2::new(2.0, 2.0), 0.1, 5, None);
    assert_eq!(s.position, Vec2::new(2.0, 2.0));
}

// -----------------------------------------------------------------------------
// Firing
// -----------------------------------------------------------------------------

#[test]
fn spread_of_one_is_exactly_the_base_direction() {
    let base = Vec2::new(0.6, 0.8);
    let dirs = spread(base, 1, 45.0);
    assert_eq!(dirs, vec![base]);
    assert!(!dirs[0].x.is_nan() && !dirs[0].y.is_nan());

    let p = BulletPattern::new("b", BulletPatternType::Spread).with_volley(1, 5.0, 1.0);
    let mut rng = SmallRng::seed_from_u64(1);
    let v = firing::fire(&p, Vec2::ZERO, None, &mut rng);
    assert_eq!(v.directions, vec![Vec2::NEG_X]);
}

#[test]
fn spread_is_symmetric_around_base() {
    let dirs = spread(Vec2::NEG_X, 3, 90.0);
    assert_eq!(dirs.len(), 3);
    assert!(approx(dirs[1], Vec2::NEG_X));
    // Outer shots mirror each other across the X axis.
    assert!((dirs[0].y + dirs[2].y).abs() < EPS);
    assert!((dirs[0].x - dirs[2].x).abs() < EPS);
    let half = 45f32.to_radians();
    assert!((dirs[0].x - (-half.cos())).abs() < EPS);
}

#[test]
fn ring_spacing_is_even() {
    let dirs = ring(4);
    assert!(approx(dirs[0], Vec2::X));
    assert!(approx(dirs[1], Vec2::Y));
    assert!(approx(dirs[2], Vec2::NEG_X));
    assert!(approx(dirs[3], Vec2::NEG_Y));
}

#[test]
fn aimed_is_recomputed_from_current_target() {
    let p = BulletPattern::new("a", BulletPatternType::Aimed).with_volley(1, 7.0, 0.5);
    let mut rng = SmallRng::seed_from_u64(1);

    let first = firing::fire(&p, Vec2::ZERO, Some(Vec2::new(0.0, 5.0)), &mut rng);
    let second = firing::fire(&p, Vec2::ZERO, Some(Vec2::new(5.0, 0.0)), &mut rng);
    assert!(approx(first.directions[0], Vec2::Y));
    assert!(approx(second.directions[0], Vec2::X));
    assert_eq!(first.speed, 7.0);

    // No target, or a target sitting on the shooter, fires left.
    let none = firing::fire(&p, Vec2::ZERO, None, &mut rng);
    let same = firing::fire(&p, Vec2::ONE, Some(Vec2::ONE), &mut rng);
    assert_eq!(none.directions, vec![Vec2::NEG_X]);
    assert_eq!(same.directions, vec![Vec2::NEG_X]);
}

#[test]
fn single_respects_aim_flag() {
    let target = Some(Vec2::new(0.0, -3.0));
    let mut rng = SmallRng::seed_from_u64(1);

    let plain = BulletPattern::new("s", BulletPatternType::Single);
    assert_eq!(firing::fire(&plain, Vec2::ZERO, target, &mut rng).directions, vec![Vec2::NEG_X]);

    let aimed = BulletPattern::new("s", BulletPatternType::Single).aimed();
    assert!(approx(firing::fire(&aimed, Vec2::ZERO, target, &mut rng).directions[0], Vec2::NEG_Y));
}

#[test]
fn random_volleys_are_unit_and_reproducible_per_seed() {
    let p = BulletPattern::new("r", BulletPatternType::Random).with_volley(16, 3.0, 0.2);

    let a = firing::fire(&p, Vec2::ZERO, None, &mut SmallRng::seed_from_u64(42));
    let b = firing::fire(&p, Vec2::ZERO, None, &mut SmallRng::seed_from_u64(42));
    assert_eq!(a, b);
    assert_eq!(a.directions.len(), 16);
    assert!(a.directions.iter().all(|d| (d.length() - 1.0).abs() < 1e-4));
}

#[test]
fn custom_fires_nothing() {
    let p = BulletPattern::new("c", BulletPatternType::Custom).with_volley(5, 1.0, 1.0);
    let v = firing::fire(&p, Vec2::ZERO, None, &mut SmallRng::seed_from_u64(0));
    assert!(v.directions.is_empty());
}

#[test]
fn spread_directions_are_unit_for_many_shapes() {
    for count in 1..=24u32 {
        for spread_deg in [0.0, 15.0, 90.0, 180.0, 360.0] {
            let base = toward(Vec2::ZERO, Some(Vec2::new(count as f32, -3.0)));
            let dirs = spread(base, count, spread_deg);
            assert_eq!(dirs.len(), count as usize);
            assert!(dirs.iter().all(|d| (d.length() - 1.0).abs() < 1e-4));
        }
    }
}
