//! The large-item heuristic: find a sequence of large, near-equal
//! items the adversary could send that no offline packing can absorb
//! alongside what has already been sent. Grounded on
//! `build_lih_choices`/`large_item_heuristic`/`compatible` in the
//! original heuristic implementation.

use crate::binconf::BinConf;
use crate::dp::{self, ItemMultiset, Tuple};
use crate::{Load, Size};

/// candidate "large item" load configurations: for each bin `i`
/// (from least-loaded to fullest), the item size that cannot fit even
/// once into bin `i`, repeated enough times to fill every bin at or
/// past `i`. When the last bin's remaining capacity is odd, the final
/// item in the sequence can be one smaller.
pub fn build_lih_choices(conf: &BinConf) -> Vec<Tuple> {
    let params = conf.params();
    let bins = params.bins as usize;
    let r = params.stretch as Load;
    let s = params.optimal as Load;

    let last_load = conf.load(bins - 1);
    let not_twice_into_last = (r - last_load + 1) / 2;
    let oddness = (r - last_load) % 2 == 1;

    let mut choices = Vec::new();
    for i in (0..bins).rev() {
        let not_once_into_current = r - conf.load(i);
        let items_to_send = bins - i;
        if not_once_into_current > s {
            continue;
        }

        let mut large = vec![0; bins];
        if oddness && not_once_into_current <= not_twice_into_last - 1 {
            for slot in large.iter_mut().take(items_to_send - 1) {
                *slot = not_twice_into_last;
            }
            large[items_to_send - 1] = not_twice_into_last - 1;
        } else {
            let item = not_twice_into_last.max(not_once_into_current);
            for slot in large.iter_mut().take(items_to_send) {
                *slot = item;
            }
        }
        choices.push(large);
    }
    choices
}

/// `true` iff no two items from `lb`'s non-zero entries can share a
/// bin with `a`'s lowest loads without exceeding `cap` -- pairing
/// `lb`'s largest remaining entry with `a`'s smallest, since both are
/// sorted non-increasing.
fn compatible(a: &[Load], lb: &[Load], cap: Load) -> bool {
    for (i, &large) in lb.iter().enumerate() {
        if large == 0 {
            break;
        }
        if large + a[a.len() - 1 - i] > cap {
            return false;
        }
    }
    true
}

/// the items the adversary should send, in order, if a large-item
/// configuration incompatible with every offline packing of `conf`
/// exists; `None` if the heuristic does not fire here.
pub fn detect(conf: &BinConf) -> Option<Vec<Size>> {
    let params = conf.params();
    let cap = params.optimal as Load;
    let choices = build_lih_choices(conf);
    let packings = dp::all_feasible_packings(&ItemMultiset::from_conf(conf));

    for choice in &choices {
        for packing in &packings {
            if compatible(packing, choice, cap) {
                return Some(
                    choice
                        .iter()
                        .take_while(|&&v| v != 0)
                        .map(|&v| v as Size)
                        .collect(),
                );
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::ZobristTable;
    use crate::params::GameParams;

    #[test]
    fn build_lih_choices_are_sorted_non_increasing() {
        let params = GameParams::toy();
        let conf = BinConf::empty(params);
        for choice in build_lih_choices(&conf) {
            for w in choice.windows(2) {
                assert!(w[0] >= w[1]);
            }
        }
    }

    #[test]
    fn detect_on_empty_conf_does_not_panic() {
        let params = GameParams::five_nine();
        let conf = BinConf::empty(params);
        let _ = detect(&conf);
    }

    #[test]
    fn compatible_rejects_overflowing_pair() {
        assert!(!compatible(&[1, 1, 1], &[10, 0, 0], 4));
        assert!(compatible(&[1, 1, 1], &[2, 0, 0], 4));
    }

    #[test]
    fn zobrist_table_is_usable_alongside_lih() {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 3);
        let mut conf = BinConf::empty(params);
        conf.assign_and_rehash(1, 0, &zobrist);
        let _ = build_lih_choices(&conf);
    }
}
