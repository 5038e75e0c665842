//! Implementations of different branch predictors.

pub mod table;
pub mod simple;
pub mod gshare;
pub mod tournament;
pub mod custom;
pub mod counter;

pub use table::*;
pub use simple::*;
pub use gshare::*;
pub use tournament::*;
pub use custom::*;
pub use counter::*;

use crate::branch::Outcome;

/// Interface to a predictor for conditional branch directions.
///
/// Calls are expected in program order: each [`BranchPredictor::predict`]
/// for a branch is followed by exactly one [`BranchPredictor::train`] with
/// the resolved outcome before the next branch is predicted.
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Return the predicted direction for the branch at `pc`.
    fn predict(&self, pc: usize) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome
    /// of the branch at `pc`.
    fn train(&mut self, pc: usize, outcome: Outcome);

    /// Return every table and register to its initial state.
    fn reset(&mut self);
}
