//! Bin configuration (BC): sorted loads, an item histogram, and two
//! incrementally maintained Zobrist hashes. See §3 and §4.1.

mod zobrist;

pub use zobrist::ZobristTable;

use crate::error::Error;
use crate::params::GameParams;
use crate::{BinHash, Load, Size};

/// A bin configuration: `loads` is kept sorted non-increasingly,
/// `items` is a histogram of how many items of each size have been
/// played. `last_item` records the most recently assigned item size,
/// used to enforce monotonicity on adversary moves (§4.10).
///
/// Mutation is in-place via [`BinConf::assign_and_rehash`] and its
/// exact inverse [`BinConf::unassign_and_rehash`] -- the recursion
/// pattern throughout this crate is descend, recurse, revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinConf {
    loads: Vec<Load>,
    items: Vec<u32>,
    total_load: Load,
    item_count: u32,
    load_hash: BinHash,
    item_hash: BinHash,
    last_item: Size,
    params: GameParams,
}

impl BinConf {
    /// the empty configuration at the root of the search.
    pub fn empty(params: GameParams) -> Self {
        Self {
            loads: vec![0; params.bins as usize],
            items: vec![0; params.optimal as usize + 1],
            total_load: 0,
            item_count: 0,
            load_hash: 0,
            item_hash: 0,
            last_item: 0,
            params,
        }
    }

    pub fn params(&self) -> GameParams {
        self.params
    }

    /// loads, sorted non-increasingly.
    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    pub fn load(&self, bin: usize) -> Load {
        self.loads[bin]
    }

    /// how many items of `size` have been played so far.
    pub fn count(&self, size: Size) -> u32 {
        self.items[size as usize]
    }

    pub fn total_load(&self) -> Load {
        self.total_load
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    pub fn last_item(&self) -> Size {
        self.last_item
    }

    pub fn load_hash(&self) -> BinHash {
        self.load_hash
    }

    pub fn item_hash(&self) -> BinHash {
        self.item_hash
    }

    /// the hash used by the state cache: combines both hashes and
    /// `last_item`, since the legal move set (and therefore the
    /// outcome) depends on monotonicity, which depends on `last_item`.
    pub fn state_hash(&self) -> BinHash {
        self.load_hash
            ^ self.item_hash
            ^ (self.last_item as BinHash).wrapping_mul(0x9E3779B97F4A7C15)
    }

    /// the hash used by the feasibility (guarantee) cache: items only,
    /// since offline feasibility does not depend on bin assignment or
    /// on monotonicity.
    pub fn item_only_hash(&self) -> BinHash {
        self.item_hash
    }

    /// residual capacity of the least-loaded bin (last in sorted order).
    pub fn least_loaded_slack(&self) -> Load {
        self.params.optimal as Load - self.loads[self.loads.len() - 1]
    }

    /// residual capacity under the *stretched* capacity R, for the
    /// fullest bin -- exceeding it is how the adversary wins.
    pub fn fullest_load(&self) -> Load {
        self.loads[0]
    }

    /// assign `size` to `bin`, bubble-sort the load into position, and
    /// incrementally update both hashes. Returns the `from` position
    /// the load bubbled from, which is the exact argument
    /// [`BinConf::unassign_and_rehash`] needs to invert this call.
    ///
    /// The rehash must cover every position that changed during the
    /// bubble-sort, not just `bin` -- this is the single place a bug
    /// would silently poison every cache downstream.
    pub fn assign_and_rehash(&mut self, size: Size, bin: usize, zobrist: &ZobristTable) -> usize {
        debug_assert!(size >= 1 && (size as usize) < self.items.len());
        self.loads[bin] += size as Load;
        self.total_load += size as Load;
        self.items[size as usize] += 1;
        self.item_count += 1;

        let from = self.bubble_up(bin);
        self.rehash_increased_range(size, from, bin, zobrist);

        self.item_hash ^= zobrist.item(size, self.items[size as usize] - 1);
        self.item_hash ^= zobrist.item(size, self.items[size as usize]);
        self.last_item = size;
        from
    }

    /// exact inverse of `assign_and_rehash`. `bin` is the position the
    /// item ended up at (the bubbled-to position the forward call
    /// mutated last); `from` is not needed here because the backward
    /// bubble naturally terminates when sort order is restored.
    pub fn unassign_and_rehash(
        &mut self,
        size: Size,
        bin: usize,
        previous_last_item: Size,
        zobrist: &ZobristTable,
    ) {
        self.item_hash ^= zobrist.item(size, self.items[size as usize]);
        self.item_hash ^= zobrist.item(size, self.items[size as usize] - 1);

        self.loads[bin] -= size as Load;
        self.total_load -= size as Load;
        self.items[size as usize] -= 1;
        self.item_count -= 1;

        let to = self.bubble_down(bin);
        self.rehash_decreased_range(size, bin, to, zobrist);
        self.last_item = previous_last_item;
    }

    /// bubble `loads[i]` toward the front while it exceeds its
    /// predecessor, preserving the non-increasing invariant. Returns
    /// the final (smaller) index the load moved to.
    fn bubble_up(&mut self, mut i: usize) -> usize {
        while i > 0 && self.loads[i - 1] < self.loads[i] {
            self.loads.swap(i - 1, i);
            i -= 1;
        }
        i
    }

    /// bubble `loads[i]` toward the back while it is smaller than its
    /// successor. Returns the final (larger) index.
    fn bubble_down(&mut self, mut i: usize) -> usize {
        while i + 1 < self.loads.len() && self.loads[i + 1] > self.loads[i] {
            self.loads.swap(i, i + 1);
            i += 1;
        }
        i
    }

    fn rehash_increased_range(&mut self, size: Size, from: usize, to: usize, zobrist: &ZobristTable) {
        if from == to {
            self.load_hash ^= zobrist.load(from, self.loads[from] - size as Load);
            self.load_hash ^= zobrist.load(from, self.loads[from]);
        } else {
            for i in from..to {
                self.load_hash ^= zobrist.load(i, self.loads[i + 1]);
                self.load_hash ^= zobrist.load(i, self.loads[i]);
            }
            self.load_hash ^= zobrist.load(to, self.loads[from] - size as Load);
            self.load_hash ^= zobrist.load(to, self.loads[to]);
        }
    }

    fn rehash_decreased_range(&mut self, size: Size, from: usize, to: usize, zobrist: &ZobristTable) {
        if from == to {
            self.load_hash ^= zobrist.load(from, self.loads[from] + size as Load);
            self.load_hash ^= zobrist.load(from, self.loads[from]);
        } else {
            for i in (from + 1)..=to {
                self.load_hash ^= zobrist.load(i, self.loads[i - 1]);
                self.load_hash ^= zobrist.load(i, self.loads[i]);
            }
            self.load_hash ^= zobrist.load(from, self.loads[to] + size as Load);
            self.load_hash ^= zobrist.load(from, self.loads[from]);
        }
    }

    /// recompute both hashes from scratch; used only to validate the
    /// incremental maintenance (see §8 testable properties).
    pub fn recompute_hashes(&self, zobrist: &ZobristTable) -> (BinHash, BinHash) {
        let mut load_hash = 0;
        for (i, &load) in self.loads.iter().enumerate() {
            load_hash ^= zobrist.load(i, load);
        }
        let mut item_hash = 0;
        for (size, &count) in self.items.iter().enumerate() {
            if size == 0 {
                continue;
            }
            item_hash ^= zobrist.item(size as Size, count);
        }
        (load_hash, item_hash)
    }

    /// fail fast if the incremental hashes have drifted from the
    /// from-scratch recomputation, or if `loads` is no longer sorted.
    /// Programming-error condition per the error handling design.
    pub fn check_invariants(&self, zobrist: &ZobristTable) -> crate::Result<()> {
        for i in 1..self.loads.len() {
            if self.loads[i] > self.loads[i - 1] {
                return Err(Error::LoadsNotSorted { position: i });
            }
        }
        let (load_hash, item_hash) = self.recompute_hashes(zobrist);
        if load_hash != self.load_hash || item_hash != self.item_hash {
            return Err(Error::HashMismatch {
                incremental: self.load_hash ^ self.item_hash,
                recomputed: load_hash ^ item_hash,
            });
        }
        let total: Load = self.loads.iter().sum();
        let from_items: Load = self
            .items
            .iter()
            .enumerate()
            .map(|(s, &c)| s as Load * c as Load)
            .sum();
        if total != self.total_load || total != from_items {
            return Err(Error::HashMismatch {
                incremental: self.total_load as u64,
                recomputed: total as u64,
            });
        }
        Ok(())
    }

    /// largest single item size that would still fit somewhere without
    /// exceeding the *stretched* capacity R -- used by the algorithm
    /// side to decide legality, not by the adversary's max-feasible
    /// engine (which reasons about offline capacity S).
    pub fn fits_stretched(&self, size: Size) -> bool {
        self.loads
            .last()
            .map(|&l| l + size as Load <= self.params.stretch as Load)
            .unwrap_or(false)
    }
}

impl std::fmt::Display for BinConf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for load in &self.loads {
            write!(f, "{load}-")?;
        }
        write!(f, " ")?;
        for (size, &count) in self.items.iter().enumerate().skip(1) {
            write!(f, "{count}")?;
            let _ = size;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> (GameParams, ZobristTable) {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 0xDEAD_BEEF);
        (params, zobrist)
    }

    #[test]
    fn empty_is_sorted_and_zeroed() {
        let (params, zobrist) = ctx();
        let bc = BinConf::empty(params);
        assert_eq!(bc.loads(), &[0, 0, 0]);
        assert_eq!(bc.total_load(), 0);
        bc.check_invariants(&zobrist).unwrap();
    }

    #[test]
    fn assign_then_unassign_restores_exact_state() {
        let (params, zobrist) = ctx();
        let mut bc = BinConf::empty(params);
        let before = bc.clone();

        let last_item_before = bc.last_item();
        let from = bc.assign_and_rehash(2, 0, &zobrist);
        assert_ne!(bc, before);
        bc.check_invariants(&zobrist).unwrap();

        bc.unassign_and_rehash(2, from, last_item_before, &zobrist);
        assert_eq!(bc, before);
    }

    #[test]
    fn sequence_round_trips_through_multiple_assignments() {
        let (params, zobrist) = ctx();
        let mut bc = BinConf::empty(params);
        let mut undo = Vec::new();

        for &(size, bin) in &[(1u8, 2usize), (2, 1), (3, 0), (1, 2)] {
            let prev_last = bc.last_item();
            let from = bc.assign_and_rehash(size, bin, &zobrist);
            bc.check_invariants(&zobrist).unwrap();
            undo.push((size, from, prev_last));
        }

        while let Some((size, bin, prev_last)) = undo.pop() {
            bc.unassign_and_rehash(size, bin, prev_last, &zobrist);
        }

        assert_eq!(bc, BinConf::empty(params));
    }

    #[test]
    fn loads_stay_sorted_non_increasing() {
        let (params, zobrist) = ctx();
        let mut bc = BinConf::empty(params);
        bc.assign_and_rehash(1, 2, &zobrist);
        bc.assign_and_rehash(3, 2, &zobrist);
        bc.assign_and_rehash(1, 1, &zobrist);
        for w in bc.loads().windows(2) {
            assert!(w[0] >= w[1]);
        }
    }
}
