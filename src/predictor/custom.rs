//! Implementation of a three-way voting predictor.
//!
//! Three components make a prediction for every branch:
//!
//! - A global component, indexed by global history alone
//! - A gshare component with its own history register, indexed by the
//!   program counter XOR'ed with that history
//! - A local component, indexed by per-branch history
//!
//! Each local-history slot keeps one confidence score per component. The
//! first component in priority order whose score is exactly
//! [`CONFIDENT`] provides the prediction. Scores may grow past
//! [`CONFIDENT`], and such a component is not selected until it has been
//! penalized back down to [`CONFIDENT`].

use itertools::izip;
use tracing::trace;
use crate::branch::Outcome;
use crate::history::*;
use crate::predictor::*;

/// The confidence score that makes a component eligible for selection.
pub const CONFIDENT: u32 = 3;

/// Components of a [`CustomPredictor`], in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    Global = 0,
    Gshare = 1,
    Local  = 2,
}
impl Component {
    pub const ALL: [Self; 3] = [Self::Global, Self::Gshare, Self::Local];
}

#[derive(Clone, Debug)]
pub struct CustomPredictor {
    /// Global history register
    ghr: HistoryRegister,

    /// Global pattern history table, indexed by global history
    global: PatternTable,

    /// History register for the gshare component
    gshr: HistoryRegister,

    /// Gshare pattern history table
    gshare: PatternTable,

    /// Per-branch history registers
    lht: LocalHistoryTable,

    /// Local pattern history table, indexed by local history
    local: PatternTable,

    /// Confidence scores for each component, one set per local history slot
    scores: Vec<[u32; 3]>,
}
impl CustomPredictor {
    pub fn new(ghistory_bits: usize, lhistory_bits: usize,
        pc_index_bits: usize, gshare_bits: usize) -> Self
    {
        let lht = LocalHistoryTable::new(pc_index_bits, lhistory_bits);
        let scores = vec![[CONFIDENT; 3]; lht.size()];
        Self {
            ghr: HistoryRegister::new(ghistory_bits),
            global: PatternTable::new(ghistory_bits, CounterState::WeaklyTaken),
            gshr: HistoryRegister::new(gshare_bits),
            gshare: PatternTable::new(gshare_bits, CounterState::WeaklyTaken),
            lht,
            local: PatternTable::new(lhistory_bits, CounterState::WeaklyTaken),
            scores,
        }
    }

    fn gshare_index(&self, pc: usize) -> usize {
        (pc ^ self.gshr.value()) & self.gshr.mask()
    }

    pub fn global_history(&self) -> usize { self.ghr.value() }
    pub fn gshare_history(&self) -> usize { self.gshr.value() }

    /// Returns the confidence scores used for the branch at `pc`.
    pub fn scores(&self, pc: usize) -> [u32; 3] {
        self.scores[self.lht.index(pc)]
    }

    /// Returns the component that provides the prediction for `pc`, if any
    /// component is confident.
    pub fn provider(&self, pc: usize) -> Option<Component> {
        let scores = self.scores(pc);
        Component::ALL.into_iter()
            .find(|c| scores[*c as usize] == CONFIDENT)
    }

    /// Returns the prediction from every component, in priority order.
    pub fn component_predictions(&self, pc: usize) -> [Outcome; 3] {
        let lhist = self.lht.get(self.lht.index(pc));
        [
            self.global.get_entry(self.ghr.value()).predict(),
            self.gshare.get_entry(self.gshare_index(pc)).predict(),
            self.local.get_entry(lhist).predict(),
        ]
    }
}

impl BranchPredictor for CustomPredictor {
    fn name(&self) -> &'static str { "Custom" }

    fn predict(&self, pc: usize) -> Outcome {
        match self.provider(pc) {
            Some(c) => self.component_predictions(pc)[c as usize],
            None => Outcome::N,
        }
    }

    fn train(&mut self, pc: usize, outcome: Outcome) {
        let lidx = self.lht.index(pc);
        let lhist = self.lht.get(lidx);
        let ghist = self.ghr.value();
        let gsidx = self.gshare_index(pc);

        // Score every component before their counters move
        let preds = self.component_predictions(pc);

        self.global.get_entry_mut(ghist).advance(outcome);
        self.gshare.get_entry_mut(gsidx).advance(outcome);
        self.local.get_entry_mut(lhist).advance(outcome);

        let scores = &mut self.scores[lidx];
        let confident_hit = izip!(&preds, scores.iter())
            .any(|(p, s)| *p == outcome && *s == CONFIDENT);
        for (p, s) in izip!(&preds, scores.iter_mut()) {
            if confident_hit {
                if *p != outcome && *s > 0 {
                    *s -= 1;
                }
            } else if *p == outcome {
                *s = s.saturating_add(1);
            }
        }
        trace!(pc, lidx, ?preds, ?scores, confident_hit, "custom score update");

        self.lht.shift_in(lidx, outcome);
        self.ghr.shift_in(outcome);
        self.gshr.shift_in(outcome);
    }

    fn reset(&mut self) {
        self.ghr.clear();
        self.global.reset();
        self.gshr.clear();
        self.gshare.reset();
        self.lht.clear();
        self.local.reset();
        self.scores.iter_mut().for_each(|s| *s = [CONFIDENT; 3]);
    }
}
