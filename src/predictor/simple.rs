
use crate::branch::Outcome;
use crate::predictor::BranchPredictor;

/// A simple predictor with no state: always predict 'taken'.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;
impl BranchPredictor for StaticPredictor {
    fn name(&self) -> &'static str { "Static" }
    fn predict(&self, _pc: usize) -> Outcome { Outcome::T }
    fn train(&mut self, _pc: usize, _outcome: Outcome) {}
    fn reset(&mut self) {}
}
