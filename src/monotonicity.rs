//! The monotonicity parameter `m` (§4.10): the adversary's next item
//! may never be smaller than `m`, and the scheduler only ever raises
//! `m` between rounds, never lowers it. Grounded on the `monotonicity`
//! field threaded through `computation<MODE>` and the
//! `INITIAL_MONOTONICITY`/`monotonicity++` loop in the queen's round
//! driver.

use crate::cache::{StateCache, Victory};
use crate::Size;

/// the smallest item the adversary may send this round, monotonically
/// non-decreasing across rounds of the same search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Monotonicity(Size);

impl Monotonicity {
    pub fn new(m: Size) -> Self {
        Self(m)
    }

    pub fn value(self) -> Size {
        self.0
    }

    /// the next round's monotonicity: one step up, capped at
    /// `max_item` since sending nothing but `max_item` forever is
    /// already the adversary's most restrictive legal regime.
    pub fn raised(self, max_item: Size) -> Self {
        Self((self.0 + 1).min(max_item))
    }

    pub fn has_reached(self, max_item: Size) -> bool {
        self.0 >= max_item
    }
}

/// advance to the next round: raise `m` and drop every cached
/// `AlgWins` verdict, since those may have relied on a smaller item
/// the adversary can no longer send. `AdvWins` verdicts are unaffected
/// -- see [`StateCache::clear_alg_wins`].
pub fn advance_round(current: Monotonicity, max_item: Size, state_cache: &StateCache) -> Monotonicity {
    state_cache.clear_alg_wins();
    current.raised(max_item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raises_by_one_and_caps_at_max_item() {
        let m = Monotonicity::new(3);
        assert_eq!(m.raised(10).value(), 4);
        assert_eq!(Monotonicity::new(10).raised(10).value(), 10);
    }

    #[test]
    fn advance_round_clears_alg_wins_and_raises_m() {
        let cache = StateCache::new(8, 4).unwrap();
        cache.insert(0x1000_0000_0000_0000, Victory::AlgWins);
        let next = advance_round(Monotonicity::new(2), 14, &cache);
        assert_eq!(next.value(), 3);
        assert_eq!(cache.lookup(0x1000_0000_0000_0000), None);
    }
}
