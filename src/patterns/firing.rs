//! Firing evaluation: which directions a volley goes in.
//!
//! The evaluators never own bullets. Callers turn a [`Volley`] into spawn requests.

use std::f32::consts::TAU;

use bevy::math::Vec2;
use rand::Rng;

use crate::data::{BulletPattern, BulletPatternType};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Volley {
    /// Unit vectors.
    pub directions: Vec<Vec2>,
    pub speed: f32,
}

/// Unit vector from `origin` toward `target`, or straight left when there is no usable target.
#[inline]
pub fn toward(origin: Vec2, target: Option<Vec2>) -> Vec2 {
    target
        .map(|t| (t - origin).normalize_or_zero())
        .filter(|d| *d != Vec2::ZERO)
        .unwrap_or(Vec2::NEG_X)
}

/// `count` directions evenly covering `spread_deg`, centred on `base`.
///
/// A single shot is `base` itself.
pub fn spread(base: Vec2, count: u32, spread_deg: f32) -> Vec<Vec2> {
    if count <= 1 {
        return vec![base];
    }
    let spread = spread_deg.to_radians();
    let start = base.y.atan2(base.x) - spread * 0.5;
    let step = spread / (count - 1) as f32;
    (0..count)
        .map(|i| Vec2::from_angle(start + step * i as f32))
        .collect()
}

/// `count` directions evenly spaced over the full circle, starting at +X.
pub fn ring(count: u32) -> Vec<Vec2> {
    let count = count.max(1);
    let step = TAU / count as f32;
    (0..count).map(|i| Vec2::from_angle(step * i as f32)).collect()
}

/// Evaluate one volley.
pub fn fire<R: Rng>(
    pattern: &BulletPattern,
    origin: Vec2,
    target: Option<Vec2>,
    rng: &mut R,
) -> Volley {
    let base = if pattern.aim_at_target {
        toward(origin, target)
    } else {
        Vec2::NEG_X
    };
    let count = pattern.bullet_count.max(1);

    let directions = match pattern.kind {
        BulletPatternType::Single => vec![base],
        BulletPatternType::Spread => spread(base, count, pattern.spread_angle),
        BulletPatternType::Circle => ring(count),
        BulletPatternType::Aimed => vec![toward(origin, target)],
        BulletPatternType::Random => (0..count)
            .map(|_| Vec2::from_angle(rng.random_range(0.0..TAU)))
            .collect(),
        BulletPatternType::Custom => Vec::new(),
    };

    Volley {
        directions,
        speed: pattern.bullet_speed,
    }
}
