//! Maximum-feasible-item engine: how large an item can still be sent
//! to `conf` while the whole multiset remains offline feasible. Tries
//! cheap, sufficient checks before the exact (and much more
//! expensive) dynamic program -- see §4.4 and §4.7.

pub mod bestfit;

use crate::binconf::BinConf;
use crate::cache::GuaranteeCache;
use crate::dp;
use crate::Load;

/// the layered query: a guarantee-cache hit short-circuits an
/// infeasible configuration immediately; otherwise best-fit-decreasing
/// is tried as a cheap sufficient witness; only if that repacking
/// fails do we pay for the exact dynamic program, whose result is
/// then cached for future lookups on this item multiset.
pub fn max_feasible_item(conf: &BinConf, cache: &GuaranteeCache) -> Option<Load> {
    if let Some(false) = cache.lookup(conf.item_only_hash()) {
        return None;
    }

    if let Some(bound) = bestfit::fitmaxone(conf) {
        return Some(bound);
    }

    let result = dp::max_feasible(conf);
    cache.insert(conf.item_only_hash(), result.is_some());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::ZobristTable;
    use crate::params::GameParams;

    #[test]
    fn falls_back_to_dp_when_bestfit_fails() {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 9);
        let cache = GuaranteeCache::new(8, 4).unwrap();
        let mut conf = BinConf::empty(params);
        conf.assign_and_rehash(1, 0, &zobrist);
        conf.assign_and_rehash(1, 1, &zobrist);
        conf.assign_and_rehash(1, 2, &zobrist);
        let result = max_feasible_item(&conf, &cache);
        assert!(result.is_some());
    }

    #[test]
    fn cached_infeasible_short_circuits() {
        let params = GameParams::toy();
        let cache = GuaranteeCache::new(8, 4).unwrap();
        let conf = BinConf::empty(params);
        cache.insert(conf.item_only_hash(), false);
        assert_eq!(max_feasible_item(&conf, &cache), None);
    }
}
