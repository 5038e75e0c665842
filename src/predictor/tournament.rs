//! Implementation of a "tournament" predictor.

use tracing::trace;
use crate::branch::Outcome;
use crate::history::*;
use crate::predictor::*;

/// A hybrid predictor using a choice table to select between a global and
/// a local predictor.
///
/// See "The Alpha 21264 Microprocessor" (Kessler, 1999).
///
/// Both components and the choice table are indexed by plain global history
/// (no PC bits). A choice counter in the not-taken half (0, 1) selects the
/// global component; the taken half (2, 3) selects the local component.
#[derive(Clone, Debug)]
pub struct TournamentPredictor {
    /// Global history register
    ghr: HistoryRegister,

    /// Global pattern history table, indexed by global history
    global: PatternTable,

    /// Per-branch history registers
    lht: LocalHistoryTable,

    /// Local pattern history table, indexed by local history
    local: PatternTable,

    /// Choice table, indexed by global history
    choice: PatternTable,
}
impl TournamentPredictor {
    pub fn new(ghistory_bits: usize, lhistory_bits: usize, pc_index_bits: usize)
        -> Self
    {
        Self {
            ghr: HistoryRegister::new(ghistory_bits),
            global: PatternTable::new(ghistory_bits, CounterState::WeaklyTaken),
            lht: LocalHistoryTable::new(pc_index_bits, lhistory_bits),
            local: PatternTable::new(lhistory_bits, CounterState::WeaklyTaken),
            choice: PatternTable::new(ghistory_bits, CounterState::WeaklyNotTaken),
        }
    }

    pub fn global_history(&self) -> usize { self.ghr.value() }

    /// Returns the local history for the branch at `pc`.
    pub fn local_history(&self, pc: usize) -> usize {
        self.lht.get(self.lht.index(pc))
    }

    /// Returns the choice counter selected by the current global history.
    pub fn choice(&self) -> CounterState {
        self.choice_at(self.ghr.value())
    }

    /// Returns the choice counter for the global history value `ghist`.
    pub fn choice_at(&self, ghist: usize) -> CounterState {
        self.choice.get_entry(ghist).state()
    }

    /// Returns true if the local component will provide the next prediction.
    pub fn prefers_local(&self) -> bool {
        self.choice.get_entry(self.ghr.value()).predict() == Outcome::T
    }

    fn global_prediction(&self) -> Outcome {
        self.global.get_entry(self.ghr.value()).predict()
    }

    fn local_prediction(&self, pc: usize) -> Outcome {
        self.local.get_entry(self.local_history(pc)).predict()
    }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str { "Tournament" }

    fn predict(&self, pc: usize) -> Outcome {
        if self.prefers_local() {
            self.local_prediction(pc)
        } else {
            self.global_prediction()
        }
    }

    fn train(&mut self, pc: usize, outcome: Outcome) {
        let ghist = self.ghr.value();
        let lidx = self.lht.index(pc);
        let lhist = self.lht.get(lidx);

        // Score both components before their counters move
        let global_hit = self.global_prediction() == outcome;
        let local_hit = self.local_prediction(pc) == outcome;

        self.global.get_entry_mut(ghist).advance(outcome);
        self.local.get_entry_mut(lhist).advance(outcome);

        let choice = self.choice.get_entry_mut(ghist);
        match (global_hit, local_hit) {
            (false, true) => choice.inc(),
            (true, false) => choice.dec(),
            _ => {},
        }
        if global_hit != local_hit {
            trace!(pc, ghist, choice = choice.value(), "tournament choice update");
        }

        self.lht.shift_in(lidx, outcome);
        self.ghr.shift_in(outcome);
    }

    fn reset(&mut self) {
        self.ghr.clear();
        self.global.reset();
        self.lht.clear();
        self.local.reset();
        self.choice.reset();
    }
}
