//! The state cache: keyed by `BinConf::state_hash`, storing which
//! side wins from this position. Grounded on the generic `cache<...>`
//! template (cache.hpp) with the value widened from one feasibility
//! bit to a two-state verdict, since a position's outcome is either
//! "adversary wins" or "algorithm wins" (there is no draw).

use std::sync::atomic::{AtomicU64, Ordering};

use super::CacheStats;
use crate::error::Error;
use crate::BinHash;

const EMPTY: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Victory {
    AdvWins,
    AlgWins,
}

impl Victory {
    fn bit(self) -> u64 {
        match self {
            Victory::AdvWins => 0,
            Victory::AlgWins => 1,
        }
    }

    fn from_bit(bit: u64) -> Self {
        if bit == 0 {
            Victory::AdvWins
        } else {
            Victory::AlgWins
        }
    }
}

pub struct StateCache {
    slots: Vec<AtomicU64>,
    log_size: u32,
    probe_len: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    probe_exhausted: AtomicU64,
}

impl StateCache {
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

    fn pack(hash: BinHash, victory: Victory) -> u64 {
        (hash & !1) | victory.bit()
    }

    pub fn lookup(&self, hash: BinHash) -> Option<Victory> {
        let pos = super::trim(hash, self.log_size);
        for i in 0..self.probe_len {
            let idx = (pos + i) % self.slots.len();
            let slot = self.slots[idx].load(Ordering::Acquire);
            if slot == EMPTY {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
            if slot & !1 == hash & !1 {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(Victory::from_bit(slot & 1));
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.probe_exhausted.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn insert(&self, hash: BinHash, victory: Victory) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        let pos = super::trim(hash, self.log_size);
        let packed = Self::pack(hash, victory);
        let limit = self.probe_len.min(self.slots.len());
        for i in 0..limit {
            let idx = (pos + i) % self.slots.len();
            let slot = self.slots[idx].load(Ordering::Acquire);
            if slot == EMPTY {
                self.slots[idx].store(packed, Ordering::Release);
                return;
            }
            if slot & !1 == hash & !1 {
                return;
            }
        }
        self.probe_exhausted.fetch_add(1, Ordering::Relaxed);
        let idx = (pos + super::random_offset(limit)) % self.slots.len();
        self.slots[idx].store(packed, Ordering::Release);
    }

    /// wipe every entry. Used between unrelated `GameParams` runs.
    pub fn clear_all(&self) {
        for slot in &self.slots {
            slot.store(EMPTY, Ordering::Release);
        }
    }

    /// wipe only `AlgWins` entries, keeping `AdvWins` ones. Raising the
    /// monotonicity parameter `m` only shrinks the adversary's legal
    /// move set, so a recorded adversary win remains a win; a recorded
    /// algorithm win may no longer hold since it might have depended
    /// on a move the adversary can no longer make. See §4.10.
    pub fn clear_alg_wins(&self) {
        for slot in &self.slots {
            let current = slot.load(Ordering::Acquire);
            if current != EMPTY && current & 1 == Victory::AlgWins.bit() {
                slot.store(EMPTY, Ordering::Release);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
