//! Shared helpers for the integration tests.
//!
//! [`Model`] is a plain-integer restatement of every predictor, used to
//! check the library over long random traces.

#![allow(dead_code)]

use bpsim::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a reproducible trace over a small set of branches. Each branch
/// has its own bias, so there is something for the predictors to learn.
pub fn random_trace(seed: u64, len: usize, num_branches: usize) -> Vec<BranchRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let branches: Vec<(usize, f64)> = (0..num_branches)
        .map(|_| (rng.gen_range(0..0x1_0000usize) << 2, rng.gen::<f64>()))
        .collect();
    (0..len)
        .map(|_| {
            let (pc, bias) = branches[rng.gen_range(0..branches.len())];
            BranchRecord::new(pc, Outcome::from(rng.gen_bool(bias)))
        })
        .collect()
}

/// Install a log subscriber controlled by `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn mask(bits: usize) -> usize { (1 << bits) - 1 }
fn inc(x: &mut u8) { if *x < 3 { *x += 1; } }
fn dec(x: &mut u8) { if *x > 0 { *x -= 1; } }
fn bump(x: &mut u8, t: bool) { if t { inc(x) } else { dec(x) } }

pub struct Model {
    kind: PredictorKind,
    gbits: usize,
    lbits: usize,
    pbits: usize,
    gsbits: usize,
    g: usize,
    gs: usize,
    tg: Vec<u8>,
    tgs: Vec<u8>,
    tl: Vec<u8>,
    lh: Vec<usize>,
    c: Vec<u8>,
    s: Vec<[u32; 3]>,
}

impl Model {
    pub fn new(cfg: &PredictorConfig) -> Self {
        Self {
            kind: cfg.kind,
            gbits: cfg.ghistory_bits,
            lbits: cfg.lhistory_bits,
            pbits: cfg.pc_index_bits,
            gsbits: cfg.gshare_bits,
            g: 0,
            gs: 0,
            tg: vec![2; 1 << cfg.ghistory_bits],
            tgs: vec![2; 1 << cfg.gshare_bits],
            tl: vec![2; 1 << cfg.lhistory_bits],
            lh: vec![0; 1 << cfg.pc_index_bits],
            c: vec![1; 1 << cfg.ghistory_bits],
            s: vec![[3; 3]; 1 << cfg.pc_index_bits],
        }
    }

    pub fn predict(&self, pc: usize) -> bool {
        match self.kind {
            PredictorKind::Static => true,
            PredictorKind::Gshare => {
                self.tg[(pc & mask(self.gbits)) ^ self.g] >= 2
            },
            PredictorKind::Tournament => {
                if self.c[self.g] <= 1 {
                    self.tg[self.g] >= 2
                } else {
                    self.tl[self.lh[pc & mask(self.pbits)]] >= 2
                }
            },
            PredictorKind::Custom => {
                let li = pc & mask(self.pbits);
                let preds = [
                    self.tg[self.g] >= 2,
                    self.tgs[(pc ^ self.gs) & mask(self.gsbits)] >= 2,
                    self.tl[self.lh[li]] >= 2,
                ];
                match self.s[li].iter().position(|s| *s == 3) {
                    Some(i) => preds[i],
                    None => false,
                }
            },
        }
    }

    pub fn train(&mut self, pc: usize, t: bool) {
        let bit = t as usize;
        match self.kind {
            PredictorKind::Static => return,
            PredictorKind::Gshare => {
                let idx = (pc & mask(self.gbits)) ^ self.g;
                bump(&mut self.tg[idx], t);
            },
            PredictorKind::Tournament => {
                let li = pc & mask(self.pbits);
                let lh = self.lh[li];
                let gp = self.tg[self.g] >= 2;
                let lp = self.tl[lh] >= 2;
                bump(&mut self.tg[self.g], t);
                bump(&mut self.tl[lh], t);
                if lp == t && gp != t {
                    inc(&mut self.c[self.g]);
                } else if lp != t && gp == t {
                    dec(&mut self.c[self.g]);
                }
                self.lh[li] = ((lh << 1) | bit) & mask(self.lbits);
            },
            PredictorKind::Custom => {
                let li = pc & mask(self.pbits);
                let lh = self.lh[li];
                let gsi = (pc ^ self.gs) & mask(self.gsbits);
                let preds = [self.tg[self.g] >= 2, self.tgs[gsi] >= 2, self.tl[lh] >= 2];
                bump(&mut self.tg[self.g], t);
                bump(&mut self.tgs[gsi], t);
                bump(&mut self.tl[lh], t);
                let s = &mut self.s[li];
                let confident = (0..3).any(|i| preds[i] == t && s[i] == 3);
                for i in 0..3 {
                    if confident {
                        if preds[i] != t && s[i] > 0 { s[i] -= 1; }
                    } else if preds[i] == t {
                        s[i] += 1;
                    }
                }
                self.lh[li] = ((lh << 1) | bit) & mask(self.lbits);
                self.gs = ((self.gs << 1) | bit) & mask(self.gsbits);
            },
        }
        self.g = ((self.g << 1) | bit) & mask(self.gbits);
    }
}
