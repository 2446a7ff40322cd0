//! The guarantee (feasibility) cache: keyed by a configuration's
//! item-only hash, storing one bit -- "is this item multiset offline
//! feasible". Grounded directly on `dp_cache_64` (dp64.hpp): a 64-bit
//! atomic slot holding a hash with its last bit zeroed, OR'd with the
//! feasibility bit.

use std::sync::atomic::{AtomicU64, Ordering};

use super::CacheStats;
use crate::error::Error;
use crate::BinHash;

const EMPTY: u64 = 0;

/// feasibility transposition cache. `probe_len` bounds every lookup
/// and insert to a constant number of slot touches.
pub struct GuaranteeCache {
    slots: Vec<AtomicU64>,
    log_size: u32,
    probe_len: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    probe_exhausted: AtomicU64,
}

impl GuaranteeCache {
    pub fn new(log_size: u32, probe_len: usize) -> crate::Result<Self> {
        if log_size == 0 || log_size > 63 {
            return Err(Error::CacheConstruction(format!(
                "log_size {log_size} out of range"
            )));
        }
        let size = 1usize << log_size;
        let slots = (0..size).map(|_| AtomicU64::new(EMPTY)).collect();
        Ok(Self {
            slots,
            log_size,
            probe_len,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            probe_exhausted: AtomicU64::new(0),
        })
    }

    /// snapshot of the lookup/insert counters since construction.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            probe_exhausted: self.probe_exhausted.load(Ordering::Relaxed),
        }
    }

    fn pack(hash: BinHash, feasible: bool) -> u64 {
        (hash & !1) | feasible as u64
    }

    fn unpack(slot: u64) -> (BinHash, bool) {
        (slot & !1, slot & 1 == 1)
    }

    /// `Some(feasible)` on a hash match within the probe run, `None`
    /// on a miss (empty slot reached, or the run is full of unrelated
    /// hashes).
    pub fn lookup(&self, hash: BinHash) -> Option<bool> {
        let pos = super::trim(hash, self.log_size);
        for i in 0..self.probe_len {
            let idx = (pos + i) % self.slots.len();
            let slot = self.slots[idx].load(Ordering::Acquire);
            if slot == EMPTY {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
            let (stored_hash, feasible) = Self::unpack(slot);
            if stored_hash == hash & !1 {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(feasible);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.probe_exhausted.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// insert `feasible` for `hash`; a duplicate hash already present
    /// in the probe run is left untouched (both writers would agree
    /// on the value anyway, since feasibility is a pure function of
    /// the item multiset).
    pub fn insert(&self, hash: BinHash, feasible: bool) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        let pos = super::trim(hash, self.log_size);
        let packed = Self::pack(hash, feasible);
        let limit = self.probe_len.min(self.slots.len());
        for i in 0..limit {
            let idx = (pos + i) % self.slots.len();
            let slot = self.slots[idx].load(Ordering::Acquire);
            if slot == EMPTY {
                self.slots[idx].store(packed, Ordering::Release);
                return;
            }
            if Self::unpack(slot).0 == hash & !1 {
                return;
            }
        }
        self.probe_exhausted.fetch_add(1, Ordering::Relaxed);
        let idx = (pos + super::random_offset(limit)) % self.slots.len();
        self.slots[idx].store(packed, Ordering::Release);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup_agrees() {
        let cache = GuaranteeCache::new(8, 4).unwrap();
        cache.insert(0xABCD_1234_0000_0010, true);
        assert_eq!(cache.lookup(0xABCD_1234_0000_0010), Some(true));
    }

    #[test]
    fn lookup_miss_on_unseen_hash() {
        let cache = GuaranteeCache::new(8, 4).unwrap();
        assert_eq!(cache.lookup(0x1111_2222_3333_4444), None);
    }

    #[test]
    fn rejects_degenerate_log_size() {
        assert!(GuaranteeCache::new(0, 4).is_err());
    }

    #[test]
    fn stats_count_hits_misses_and_inserts() {
        let cache = GuaranteeCache::new(8, 4).unwrap();
        cache.insert(0xABCD_1234_0000_0010, true);
        let _ = cache.lookup(0xABCD_1234_0000_0010);
        let _ = cache.lookup(0x1111_2222_3333_4444);
        let stats = cache.stats();
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
