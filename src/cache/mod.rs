//! Lock-free, open-addressed transposition caches (§4.5). Both
//! caches pack a truncated hash and a small value into one atomic
//! 64-bit slot, linearly probe on collision, and evict at random when
//! a probe run is full -- correctness never depends on an entry
//! surviving, only on a present entry being trustworthy.

pub mod guarantee;
pub mod state;

pub use guarantee::GuaranteeCache;
pub use state::{StateCache, Victory};

use crate::BinHash;

/// lookup/insert counters for telemetry, not correctness. A probe
/// exhausting its run (every slot occupied by an unrelated hash) is
/// expected behavior, resolved by random replacement -- this just
/// counts how often it happens.
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub probe_exhausted: u64,
}

/// address a slot's home position from a hash's high bits, mirroring
/// the source's `logpart`/`trim`: `hash >> (64 - log_size)`.
fn trim(hash: BinHash, log_size: u32) -> usize {
    (hash >> (64 - log_size)) as usize
}

/// pick a random offset within `0..limit` for full-probe eviction.
/// `rand::rng()` is reseeded per call deliberately -- eviction does
/// not need reproducibility, only low collision with itself.
fn random_offset(limit: usize) -> usize {
    use rand::Rng;
    rand::rng().random_range(0..limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_uses_high_bits() {
        let hash: BinHash = 0x8000_0000_0000_0000;
        assert_eq!(trim(hash, 1), 1);
        assert_eq!(trim(hash, 2), 2);
    }
}
