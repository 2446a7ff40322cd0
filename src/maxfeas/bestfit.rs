//! Best-fit-decreasing repacking: a cheap, sufficient (not
//! necessary) check for offline feasibility. If it succeeds it
//! witnesses feasibility directly, without the full dynamic program;
//! if it fails, feasibility is still undetermined and the caller must
//! fall back to [`crate::dp`]. Grounded on `bestfit`/`fitmaxone` in
//! the original fits implementation.

use crate::binconf::BinConf;
use crate::Load;

/// greedily repack `conf`'s items (largest first) into `bins` bins of
/// capacity `cap`, always choosing the bin that leaves the least
/// remaining space. Returns the resulting loads if every item fit,
/// `None` the moment one does not.
pub fn bestfit(conf: &BinConf) -> Option<Vec<Load>> {
    let params = conf.params();
    let bins = params.bins as usize;
    let cap = params.optimal as Load;
    let mut loads = vec![0 as Load; bins];

    for size in (1..=params.optimal).rev() {
        let mut remaining = conf.count(size);
        while remaining > 0 {
            let mut best_bin = None;
            let mut least_remainder = cap + 1;
            for (bin, &load) in loads.iter().enumerate() {
                let remainder = cap - (load + size as Load);
                if remainder >= 0 && remainder < least_remainder {
                    least_remainder = remainder;
                    best_bin = Some(bin);
                }
            }
            let bin = best_bin?;
            loads[bin] += size as Load;
            remaining -= 1;
        }
    }
    Some(loads)
}

/// the largest single item that best-fit-decreasing's own repacking
/// can still absorb, or `None` if the repacking itself failed (in
/// which case this says nothing about true feasibility).
pub fn fitmaxone(conf: &BinConf) -> Option<Load> {
    let loads = bestfit(conf)?;
    let cap = conf.params().optimal as Load;
    loads.iter().map(|&load| cap - load).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::ZobristTable;
    use crate::params::GameParams;

    #[test]
    fn empty_configuration_fits_trivially() {
        let params = GameParams::toy();
        let conf = BinConf::empty(params);
        let loads = bestfit(&conf).unwrap();
        assert_eq!(loads, vec![0; params.bins as usize]);
    }

    #[test]
    fn overloaded_configuration_fails_to_repack() {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 5);
        let mut conf = BinConf::empty(params);
        for bin in 0..params.bins as usize {
            conf.assign_and_rehash(params.optimal, bin, &zobrist);
        }
        conf.assign_and_rehash(params.optimal, 0, &zobrist);
        assert!(bestfit(&conf).is_none());
    }
}
