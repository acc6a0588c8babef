//! Pattern evaluators: pure functions from (pattern, time, origin, target) to a position or a
//! volley of fire directions.
//!
//! Nothing in here touches the ECS. Identical inputs give bit-identical outputs; the only
//! source of variation is the RNG handed to `Random` volleys by the caller.

pub mod firing;
pub mod movement;

pub use firing::{Volley, fire};
pub use movement::{MotionState, advance};

#[cfg(test)]
mod tests;
