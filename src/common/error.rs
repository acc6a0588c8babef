//! Error taxonomy for stage data problems.
//!
//! None of these cross the engine boundary as panics: systems log them and carry on.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// Malformed stage: `StartStage` refuses to run it.
    #[error("stage has no timelines")]
    NoTimelines,

    #[error("timeline not found: {0}")]
    UnknownTimeline(String),

    #[error("event not found: {0}")]
    UnknownEvent(String),

    #[error("enemy not found in database: {0}")]
    UnknownEnemy(String),

    #[error("formation not found in database: {0}")]
    UnknownFormation(String),

    #[error("timeline id already in use: {0}")]
    DuplicateTimeline(String),

    #[error("event id already in use: {0}")]
    DuplicateEvent(String),

    #[error("no stage is running")]
    NotRunning,
}
