//! Offline-feasibility dynamic program: can the items sent so far be
//! packed into `bins` bins of capacity `optimal`, and if so, what is
//! the largest additional item that still fits somewhere? See §4.4.
//!
//! The DP repacks item *counts* from scratch; it never looks at how
//! the online algorithm actually placed items, only at how many items
//! of each size have been sent and the total load, which is why the
//! core of this module works over [`ItemMultiset`] rather than over
//! `BinConf` directly -- the heuristics in [`crate::heuristics`] need
//! to ask "what if I added a few more items" without mutating a real
//! bin configuration.

use std::collections::HashSet;

use crate::binconf::BinConf;
use crate::params::GameParams;
use crate::{Load, Size};

/// a candidate offline packing: bin loads, kept sorted non-increasing
/// the same way `BinConf::loads` is, but detached from any hashing --
/// the frontier churns through thousands of these per query and a
/// plain `HashSet` dedup is simplest to keep correct.
pub type Tuple = Vec<Load>;

fn bubble_up(tuple: &mut Tuple, mut i: usize) {
    while i > 0 && tuple[i - 1] < tuple[i] {
        tuple.swap(i - 1, i);
        i -= 1;
    }
}

/// item counts and total load, detached from any particular bin
/// assignment -- all the offline DP ever needs.
#[derive(Debug, Clone)]
pub struct ItemMultiset {
    params: GameParams,
    counts: Vec<u32>,
    total: Load,
}

impl ItemMultiset {
    pub fn from_conf(conf: &BinConf) -> Self {
        let params = conf.params();
        let counts = (0..=params.optimal).map(|s| conf.count(s)).collect();
        Self {
            params,
            counts,
            total: conf.total_load(),
        }
    }

    /// a multiset with `count` additional items of `size`, used by the
    /// adversary heuristics to ask "what if I sent these too".
    pub fn with_extra(&self, size: Size, count: u32) -> Self {
        let mut counts = self.counts.clone();
        counts[size as usize] += count;
        Self {
            params: self.params,
            counts,
            total: self.total + size as Load * count as Load,
        }
    }

    pub fn count(&self, size: Size) -> u32 {
        self.counts[size as usize]
    }

    pub fn item_count(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn total_load(&self) -> Load {
        self.total
    }

    pub fn params(&self) -> GameParams {
        self.params
    }
}

/// `true` iff the items recorded in `conf` can be packed offline into
/// `conf.params().bins` bins of capacity `conf.params().optimal`.
pub fn feasible(conf: &BinConf) -> bool {
    max_feasible(conf).is_some()
}

pub fn max_feasible(conf: &BinConf) -> Option<Load> {
    max_feasible_multiset(&ItemMultiset::from_conf(conf))
}

/// convenience query used by the adversary heuristics: would adding
/// `count` more items of size `size` to `conf` still be offline
/// feasible?
pub fn pack_query(conf: &BinConf, size: Size, count: u32) -> bool {
    feasible_multiset(&ItemMultiset::from_conf(conf).with_extra(size, count))
}

pub fn feasible_multiset(items: &ItemMultiset) -> bool {
    max_feasible_multiset(items).is_some()
}

/// the largest single item size that could still be added and leave
/// the whole multiset offline-feasible, or `None` if it is already
/// infeasible on its own. Mirrors `dynprog_max_direct`.
pub fn max_feasible_multiset(items: &ItemMultiset) -> Option<Load> {
    let params = items.params();
    let bins = params.bins as usize;
    let cap = params.optimal as Load;

    if items.item_count() == 0 {
        return Some(cap);
    }

    let smallest_item = (1..=params.optimal).find(|&s| items.count(s) > 0);

    let mut max_overall: Option<Load> = None;
    let mut frontier: Vec<Tuple>;
    let mut initial_phase;

    if items.count(params.optimal) > 0 {
        let count = items.count(params.optimal);
        if count as usize > bins {
            return None;
        }
        if smallest_item == Some(params.optimal) {
            return if count as usize == bins {
                Some(0)
            } else {
                Some(cap)
            };
        }
        let mut first = vec![0; bins];
        for slot in first.iter_mut().take(count as usize) {
            *slot = cap;
        }
        frontier = vec![first];
        initial_phase = false;
    } else {
        frontier = Vec::new();
        initial_phase = true;
    }

    for size in (2..params.optimal).rev() {
        let mut k = items.count(size);
        let size = size as Load;
        while k > 0 {
            let is_last_of_smallest = smallest_item == Some(size as Size) && k == 1;

            if initial_phase {
                let mut tuple = vec![0; bins];
                tuple[0] = size;
                frontier = vec![tuple];
                initial_phase = false;
                if is_last_of_smallest {
                    return Some(cap);
                }
            } else {
                let mut next = Vec::new();
                let mut seen: HashSet<Tuple> = HashSet::new();
                for tuple in &frontier {
                    for i in (0..bins).rev() {
                        if i + 1 < bins && tuple[i] == tuple[i + 1] {
                            continue;
                        }
                        if tuple[i] + size > cap {
                            break;
                        }
                        let mut candidate = tuple.clone();
                        candidate[i] += size;
                        bubble_up(&mut candidate, i);
                        if seen.insert(candidate.clone()) {
                            if is_last_of_smallest {
                                let slack = cap - candidate[bins - 1];
                                max_overall = Some(max_overall.map_or(slack, |m| m.max(slack)));
                            }
                            next.push(candidate);
                        }
                    }
                }
                if next.is_empty() {
                    return None;
                }
                frontier = next;
            }
            k -= 1;
        }
    }

    if items.count(1) > 0 {
        let free_volume = cap * bins as Load - items.total_load();
        if free_volume < 0 {
            return None;
        }
        if free_volume == 0 {
            return Some(0);
        }
        for tuple in &frontier {
            let empty_on_last = (cap - tuple[bins - 1]).min(free_volume);
            max_overall = Some(max_overall.map_or(empty_on_last, |m| m.max(empty_on_last)));
        }
    }

    max_overall
}

/// the full frontier of feasible offline packings, with no
/// smallest-item short-circuit -- used only by the adversary
/// heuristics (`large_item`), which need the actual packings rather
/// than just the best additional item. Mirrors `dynprog()`.
pub fn all_feasible_packings(items: &ItemMultiset) -> Vec<Tuple> {
    let params = items.params();
    let bins = params.bins as usize;
    let cap = params.optimal as Load;

    let mut frontier: Vec<Tuple> = Vec::new();
    let mut initial_phase = true;

    for size in (1..=params.optimal).rev() {
        let mut k = items.count(size);
        let size = size as Load;
        while k > 0 {
            if initial_phase {
                let mut tuple = vec![0; bins];
                tuple[0] = size;
                frontier = vec![tuple];
                initial_phase = false;
            } else {
                let mut next = Vec::new();
                let mut seen: HashSet<Tuple> = HashSet::new();
                for tuple in &frontier {
                    for i in (0..bins).rev() {
                        if i + 1 < bins && tuple[i] == tuple[i + 1] {
                            continue;
                        }
                        if tuple[i] + size > cap {
                            break;
                        }
                        let mut candidate = tuple.clone();
                        candidate[i] += size;
                        bubble_up(&mut candidate, i);
                        if seen.insert(candidate.clone()) {
                            next.push(candidate);
                        }
                    }
                }
                if next.is_empty() {
                    return Vec::new();
                }
                frontier = next;
            }
            k -= 1;
        }
    }

    frontier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::ZobristTable;
    use crate::params::GameParams;

    fn toy_ctx() -> (GameParams, ZobristTable) {
        let params = GameParams::toy();
        (params, ZobristTable::new(params, 7))
    }

    #[test]
    fn empty_configuration_is_trivially_feasible() {
        let (params, _z) = toy_ctx();
        let conf = BinConf::empty(params);
        assert!(feasible(&conf));
        assert_eq!(max_feasible(&conf), Some(params.optimal as Load));
    }

    #[test]
    fn bins_worth_of_optimal_items_is_exactly_full() {
        let (params, z) = toy_ctx();
        let mut conf = BinConf::empty(params);
        for bin in 0..params.bins as usize {
            conf.assign_and_rehash(params.optimal, bin, &z);
        }
        assert_eq!(max_feasible(&conf), Some(0));
    }

    #[test]
    fn one_too_many_optimal_items_is_infeasible() {
        let (params, z) = toy_ctx();
        let mut conf = BinConf::empty(params);
        for bin in 0..params.bins as usize {
            conf.assign_and_rehash(params.optimal, bin, &z);
        }
        conf.assign_and_rehash(params.optimal, 0, &z);
        assert!(!feasible(&conf));
    }

    #[test]
    fn small_items_pack_under_total_capacity() {
        let (params, z) = toy_ctx();
        let mut conf = BinConf::empty(params);
        conf.assign_and_rehash(1, 0, &z);
        conf.assign_and_rehash(1, 1, &z);
        assert!(feasible(&conf));
        assert!(max_feasible(&conf).unwrap() > 0);
    }

    #[test]
    fn pack_query_rejects_an_overflowing_addition() {
        let (params, z) = toy_ctx();
        let mut conf = BinConf::empty(params);
        for bin in 0..params.bins as usize {
            conf.assign_and_rehash(params.optimal, bin, &z);
        }
        assert!(!pack_query(&conf, 1, 1));
    }

    #[test]
    fn all_feasible_packings_nonempty_for_small_instance() {
        let (params, z) = toy_ctx();
        let mut conf = BinConf::empty(params);
        conf.assign_and_rehash(1, 0, &z);
        let packings = all_feasible_packings(&ItemMultiset::from_conf(&conf));
        assert!(!packings.is_empty());
        for tuple in &packings {
            assert_eq!(tuple.len(), params.bins as usize);
        }
    }
}
