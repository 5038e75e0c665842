//! Global and per-branch history registers.

use bitvec::prelude::*;
use crate::branch::Outcome;

/// A fixed-width register recording the most recent branch outcomes.
///
/// Bit 0 holds the newest outcome. Shifting in a new outcome discards the
/// oldest one, so the value of the register is always `< 2^len`.
#[derive(Clone, Debug)]
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* the all of the bits and presents them in a format
// where the leftmost bit is the most-significant (index n) and the rightmost
// bit is the least-significant (index 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len <= usize::BITS as usize);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns a mask with the low `len` bits set.
    pub fn mask(&self) -> usize {
        width_mask(self.len)
    }

    /// Shift a new outcome into the bottom of the register.
    pub fn shift_in(&mut self, outcome: Outcome) {
        if self.is_empty() { return; }
        self.data.shift_right(1);
        self.data.set(0, outcome.into());
    }

    /// Return the contents of the register as an integer.
    pub fn value(&self) -> usize {
        if self.is_empty() { return 0; }
        self.data.load_le::<usize>()
    }

    /// Clear all bits in the register.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }
}

/// A table of per-branch history registers, indexed by the low bits of the
/// program counter.
///
/// All registers are packed into a single bit vector.
#[derive(Clone, Debug)]
pub struct LocalHistoryTable {
    data: BitVec<usize, Lsb0>,

    /// Number of program counter bits used to select a register
    index_bits: usize,

    /// Width of each register
    hist_bits: usize,
}
impl LocalHistoryTable {
    pub fn new(index_bits: usize, hist_bits: usize) -> Self {
        assert!(hist_bits <= usize::BITS as usize);
        let entries = 1usize << index_bits;
        Self {
            data: bitvec![usize, Lsb0; 0; entries * hist_bits],
            index_bits,
            hist_bits,
        }
    }

    /// Number of registers in the table.
    pub fn size(&self) -> usize { 1 << self.index_bits }

    pub fn hist_bits(&self) -> usize { self.hist_bits }

    /// Select the register used by the branch at `pc`.
    pub fn index(&self, pc: usize) -> usize {
        pc & width_mask(self.index_bits)
    }

    fn slot(&self, idx: usize) -> std::ops::Range<usize> {
        let idx = idx & width_mask(self.index_bits);
        let start = idx * self.hist_bits;
        start..start + self.hist_bits
    }

    /// Read the history register at `idx`.
    pub fn get(&self, idx: usize) -> usize {
        if self.hist_bits == 0 { return 0; }
        self.data[self.slot(idx)].load_le::<usize>()
    }

    /// Shift an outcome into the history register at `idx`.
    pub fn shift_in(&mut self, idx: usize, outcome: Outcome) {
        if self.hist_bits == 0 { return; }
        let next = ((self.get(idx) << 1) | outcome.bit())
            & width_mask(self.hist_bits);
        let slot = self.slot(idx);
        self.data[slot].store_le::<usize>(next);
    }

    /// Clear every register in the table.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }
}

/// Returns a mask with the low `bits` bits set.
pub fn width_mask(bits: usize) -> usize {
    if bits >= usize::BITS as usize {
        usize::MAX
    } else {
        (1 << bits) - 1
    }
}
