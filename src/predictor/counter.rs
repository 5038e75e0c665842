//! Implementation of a 2-bit saturating counter.

use crate::branch::Outcome;

/// The four states of a [`SaturatingCounter`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CounterState {
    StronglyNotTaken = 0,
    WeaklyNotTaken   = 1,
    WeaklyTaken      = 2,
    StronglyTaken    = 3,
}
impl CounterState {
    pub const MAX: u8 = Self::StronglyTaken as u8;

    /// Return the state for `value`, clamped into the range of the counter.
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => Self::StronglyNotTaken,
            1 => Self::WeaklyNotTaken,
            2 => Self::WeaklyTaken,
            _ => Self::StronglyTaken,
        }
    }
}

/// A 2-bit saturating counter used to follow the behavior of a branch.
///
/// The most-significant bit of the counter is the predicted direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    init: CounterState,
    state: CounterState,
}
impl SaturatingCounter {
    pub fn new(init: CounterState) -> Self {
        Self { init, state: init }
    }

    pub fn state(&self) -> CounterState { self.state }
    pub fn value(&self) -> u8 { self.state as u8 }

    /// Move one step towards [`CounterState::StronglyTaken`].
    pub fn inc(&mut self) {
        let next = (self.value() + 1).min(CounterState::MAX);
        self.state = CounterState::from_value(next);
    }

    /// Move one step towards [`CounterState::StronglyNotTaken`].
    pub fn dec(&mut self) {
        let next = self.value().saturating_sub(1);
        self.state = CounterState::from_value(next);
    }

    /// Update the state of the counter with the correct outcome.
    pub fn advance(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.inc(),
            Outcome::N => self.dec(),
        }
    }

    /// Return the current predicted direction.
    pub fn predict(&self) -> Outcome {
        Outcome::from(self.state >= CounterState::WeaklyTaken)
    }

    /// Reset the counter to its initial state.
    pub fn reset(&mut self) {
        self.state = self.init;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(CounterState::StronglyNotTaken, Outcome::T, CounterState::WeaklyNotTaken)]
    #[case(CounterState::WeaklyNotTaken,   Outcome::T, CounterState::WeaklyTaken)]
    #[case(CounterState::WeaklyTaken,      Outcome::T, CounterState::StronglyTaken)]
    #[case(CounterState::StronglyTaken,    Outcome::T, CounterState::StronglyTaken)]
    #[case(CounterState::StronglyNotTaken, Outcome::N, CounterState::StronglyNotTaken)]
    #[case(CounterState::WeaklyNotTaken,   Outcome::N, CounterState::StronglyNotTaken)]
    #[case(CounterState::WeaklyTaken,      Outcome::N, CounterState::WeaklyNotTaken)]
    #[case(CounterState::StronglyTaken,    Outcome::N, CounterState::WeaklyTaken)]
    fn advance_transitions(
        #[case] from: CounterState,
        #[case] outcome: Outcome,
        #[case] to: CounterState,
    ) {
        let mut ctr = SaturatingCounter::new(from);
        ctr.advance(outcome);
        assert_eq!(ctr.state(), to);
    }

    #[rstest]
    #[case(CounterState::StronglyNotTaken, Outcome::N)]
    #[case(CounterState::WeaklyNotTaken,   Outcome::N)]
    #[case(CounterState::WeaklyTaken,      Outcome::T)]
    #[case(CounterState::StronglyTaken,    Outcome::T)]
    fn predict_is_msb(#[case] state: CounterState, #[case] expected: Outcome) {
        assert_eq!(SaturatingCounter::new(state).predict(), expected);
    }

    #[test]
    fn reset_restores_init() {
        let mut ctr = SaturatingCounter::new(CounterState::WeaklyTaken);
        ctr.advance(Outcome::N);
        ctr.advance(Outcome::N);
        assert_eq!(ctr.state(), CounterState::StronglyNotTaken);
        ctr.reset();
        assert_eq!(ctr.state(), CounterState::WeaklyTaken);
    }

    proptest! {
        #[test]
        fn value_stays_in_range(
            init in 0u8..4,
            outcomes in prop::collection::vec(any::<bool>(), 0..32)
        ) {
            let mut ctr = SaturatingCounter::new(CounterState::from_value(init));
            for o in outcomes {
                ctr.advance(o.into());
                prop_assert!(ctr.value() <= CounterState::MAX);
            }
        }
    }
}
