//! The predictor selected by a [`PredictorConfig`].

use tracing::debug;
use crate::branch::*;
use crate::config::*;
use crate::error::ConfigError;
use crate::predictor::*;
use crate::stats::BranchStats;

/// The active branch predictor, built once from a validated configuration.
///
/// This is the only entry point an outer harness needs: build it with
/// [`Predictor::initialize`], then alternate [`Predictor::predict`] and
/// [`Predictor::train`] for every conditional branch in program order.
pub struct Predictor {
    cfg: PredictorConfig,
    inner: Box<dyn BranchPredictor>,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("name", &self.inner.name())
            .field("cfg", &self.cfg)
            .finish()
    }
}

impl Predictor {
    /// Validate `cfg` and build the selected predictor with all tables in
    /// their initial state.
    pub fn initialize(cfg: PredictorConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        debug!(
            kind = %cfg.kind,
            ghistory_bits = cfg.ghistory_bits,
            lhistory_bits = cfg.lhistory_bits,
            pc_index_bits = cfg.pc_index_bits,
            gshare_bits = cfg.gshare_bits,
            "initializing predictor"
        );
        Ok(Self { cfg, inner: Self::build(&cfg) })
    }

    fn build(cfg: &PredictorConfig) -> Box<dyn BranchPredictor> {
        match cfg.kind {
            PredictorKind::Static => Box::new(StaticPredictor),
            PredictorKind::Gshare => {
                Box::new(GsharePredictor::new(cfg.ghistory_bits))
            },
            PredictorKind::Tournament => {
                Box::new(TournamentPredictor::new(
                    cfg.ghistory_bits,
                    cfg.lhistory_bits,
                    cfg.pc_index_bits,
                ))
            },
            PredictorKind::Custom => {
                Box::new(CustomPredictor::new(
                    cfg.ghistory_bits,
                    cfg.lhistory_bits,
                    cfg.pc_index_bits,
                    cfg.gshare_bits,
                ))
            },
        }
    }

    /// Return every table and register to its initial state.
    pub fn reinitialize(&mut self) {
        debug!(kind = %self.cfg.kind, "resetting predictor");
        self.inner.reset();
    }

    pub fn name(&self) -> &'static str { self.inner.name() }
    pub fn config(&self) -> &PredictorConfig { &self.cfg }

    /// Return the predicted direction for the branch at `pc`.
    pub fn predict(&self, pc: usize) -> Outcome {
        self.inner.predict(pc)
    }

    /// Train the predictor with the resolved outcome of the branch at `pc`.
    pub fn train(&mut self, pc: usize, outcome: Outcome) {
        self.inner.train(pc, outcome)
    }

    /// Predict and then train on each record in order, counting hits.
    pub fn run<'a>(&mut self, records: impl IntoIterator<Item = &'a BranchRecord>)
        -> BranchStats
    {
        let mut stat = BranchStats::new();
        for record in records {
            let prediction = self.predict(record.pc);
            stat.update_global(record, prediction);
            self.train(record.pc, record.outcome);
        }
        debug!(
            hits = stat.global_hits(),
            branches = stat.global_brns(),
            "finished run"
        );
        stat
    }
}
