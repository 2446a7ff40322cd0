//! The five/nine heuristic, specific to the (optimal=14, stretch=19)
//! instance. Once every bin carries load at least five, two items of
//! size nine no longer fit together in any bin; send fives until
//! either a run of nines or a run of fourteens provably wins. Grounded
//! on `five_nine_heuristic`/`heuristic_strategy_fn::next_item`.

use crate::binconf::BinConf;
use crate::dp::{self, ItemMultiset};
use crate::Size;

const FIVE: Size = 5;
const NINE: Size = 9;
const FOURTEEN: Size = 14;

/// the boundary bin, scanning from the least-loaded end, whose load is
/// still at least `threshold` -- `None` if no bin reaches it.
fn first_with_load(conf: &BinConf, threshold: i32) -> Option<usize> {
    let bins = conf.params().bins as usize;
    (0..bins).rev().find(|&bin| conf.load(bin) >= threshold)
}

/// `Some(fives)` if sending `fives` items of size 5 and then switching
/// to a run of 9s or 14s is a proven adversary win from `conf`;
/// `None` if the heuristic does not apply or does not fire.
pub fn detect(conf: &BinConf) -> Option<Size> {
    let params = conf.params();
    if params.optimal != 14 || params.stretch != 19 {
        return None;
    }
    let bins = params.bins as usize;
    if conf.load(0) < 5 || conf.load(bins - 1) == 0 {
        return None;
    }

    let mut items = ItemMultiset::from_conf(conf);
    let mut bins_times_nine_threat = dp::feasible_multiset(&items.with_extra(NINE, bins as u32));

    if !bins_times_nine_threat {
        return None;
    }

    let mut last_bin_above_five = 0usize;
    for bin in 0..bins.saturating_sub(1) {
        if conf.load(bin) >= 5 && conf.load(bin + 1) < 5 {
            last_bin_above_five = bin;
            break;
        }
    }

    let mut fourteen_sequence = bins - last_bin_above_five;
    let mut fives: u32 = 0;

    while bins_times_nine_threat && fourteen_sequence >= 1 && last_bin_above_five <= bins {
        let fourteen_feasible =
            dp::feasible_multiset(&items.with_extra(FOURTEEN, fourteen_sequence as u32));
        if fourteen_feasible {
            return Some(fives as Size);
        }

        last_bin_above_five += 1;
        fourteen_sequence -= 1;
        items = items.with_extra(FIVE, 1);
        fives += 1;

        bins_times_nine_threat = dp::feasible_multiset(&items.with_extra(NINE, bins as u32));
    }

    None
}

/// once the committed `fives` prefix has been sent, decide the next
/// item live against the current configuration.
pub fn next_item(conf: &BinConf) -> Size {
    let bins = conf.params().bins as usize;
    let above_five = first_with_load(conf, 5).unwrap_or(0);
    let sequence = bins - above_five;

    if dp::pack_query(conf, FOURTEEN, sequence as u32) {
        return FOURTEEN;
    }
    if first_with_load(conf, 10).is_some() {
        return NINE;
    }
    FIVE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::ZobristTable;
    use crate::params::GameParams;

    #[test]
    fn does_not_fire_outside_its_instance() {
        let params = GameParams::toy();
        let conf = BinConf::empty(params);
        assert_eq!(detect(&conf), None);
    }

    #[test]
    fn does_not_fire_on_empty_five_nine_instance() {
        let params = GameParams::five_nine();
        let conf = BinConf::empty(params);
        assert_eq!(detect(&conf), None);
    }

    #[test]
    fn next_item_does_not_panic_on_a_loaded_configuration() {
        let params = GameParams::five_nine();
        let zobrist = ZobristTable::new(params, 11);
        let mut conf = BinConf::empty(params);
        for bin in 0..params.bins as usize {
            conf.assign_and_rehash(5, bin, &zobrist);
        }
        let _ = next_item(&conf);
    }
}
