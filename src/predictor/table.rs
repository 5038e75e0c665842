//! Types for implementing a table of predictors.

use crate::history::width_mask;
use crate::predictor::counter::*;

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        debug_assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// A table of [`SaturatingCounter`] with `2^index_bits` entries.
///
/// Indexes are masked on every access, so any `usize` selects a valid entry.
#[derive(Clone, Debug)]
pub struct PatternTable {
    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Number of bits in an index
    index_bits: usize,
}
impl PatternTable {
    pub fn new(index_bits: usize, init: CounterState) -> Self {
        let size = 1usize << index_bits;
        Self {
            data: vec![SaturatingCounter::new(init); size],
            index_bits,
        }
    }

    pub fn index_bits(&self) -> usize { self.index_bits }

    /// Return every counter in the table to its initial state.
    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|c| c.reset());
    }
}

impl PredictorTable for PatternTable {
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.data.len() }

    fn index_mask(&self) -> usize { width_mask(self.index_bits) }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        &self.data[idx & self.index_mask()]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::branch::Outcome;

    #[test]
    fn indexes_are_masked() {
        let mut pht = PatternTable::new(3, CounterState::WeaklyTaken);
        assert_eq!(pht.size(), 8);
        assert_eq!(pht.index_mask(), 0b111);

        pht.get_entry_mut(0x1_0002).advance(Outcome::T);
        assert_eq!(pht.get_entry(2).state(), CounterState::StronglyTaken);

        pht.reset();
        assert_eq!(pht.get_entry(2).state(), CounterState::WeaklyTaken);
    }
}
