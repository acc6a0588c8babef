//! In-memory stage content: what to spawn, when, and how it behaves.
//!
//! Nothing here has behaviour beyond keeping its own invariants (unique ids, sorted
//! timelines, non-negative times). Loading and saving are someone else's job.

pub mod enemy;
pub mod pattern;
pub mod stage;

pub use enemy::{EnemyDatabase, EnemyDef, EnemyFormation, FormationMember};
pub use pattern::{BulletPattern, BulletPatternType, MovePattern, MovePatternType, PatternDatabase};
pub use stage::{
    OnDestroyFollowUp, Stage, StageEvent, StageEventKind, StageEventType, StageMeta, Timeline,
    TimelineEvent,
};

#[cfg(test)]
mod tests;
