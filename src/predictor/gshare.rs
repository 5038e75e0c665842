//! Implementation of a "gshare" predictor.

use crate::branch::Outcome;
use crate::history::*;
use crate::predictor::*;

/// A table of [`SaturatingCounter`] indexed by the program counter XOR'ed
/// with global history.
///
/// See "Combining Branch Predictors" (McFarling, 1993).
#[derive(Clone, Debug)]
pub struct GsharePredictor {
    /// Global history register
    ghr: HistoryRegister,

    /// Pattern history table
    pht: PatternTable,
}
impl GsharePredictor {
    pub fn new(ghistory_bits: usize) -> Self {
        Self {
            ghr: HistoryRegister::new(ghistory_bits),
            pht: PatternTable::new(ghistory_bits, CounterState::WeaklyTaken),
        }
    }

    /// Form an index into the pattern history table.
    pub fn index(&self, pc: usize) -> usize {
        (pc & self.ghr.mask()) ^ self.ghr.value()
    }

    pub fn global_history(&self) -> usize { self.ghr.value() }

    pub fn counter(&self, idx: usize) -> &SaturatingCounter {
        self.pht.get_entry(idx)
    }
}

impl BranchPredictor for GsharePredictor {
    fn name(&self) -> &'static str { "Gshare" }

    fn predict(&self, pc: usize) -> Outcome {
        self.pht.get_entry(self.index(pc)).predict()
    }

    fn train(&mut self, pc: usize, outcome: Outcome) {
        let idx = self.index(pc);
        self.pht.get_entry_mut(idx).advance(outcome);
        self.ghr.shift_in(outcome);
    }

    fn reset(&mut self) {
        self.ghr.clear();
        self.pht.reset();
    }
}
