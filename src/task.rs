//! Task boundary predicate (§4.9): where generation stops expanding an
//! adversary vertex and hands it to the scheduler as a unit of
//! exploration work instead. Grounded on `possible_task_depth` in
//! `tasks.hpp` -- depth past the computation root, not absolute depth,
//! since a new round's root is itself already deep in the overall
//! game tree.

use crate::binconf::BinConf;
use crate::params::Thresholds;
use crate::Load;

/// a unit of exploration work: an adversary vertex's bin configuration
/// plus the depth (relative to the root of its generating round) it
/// sits at, and the monotonicity in force when it was cut.
#[derive(Debug, Clone)]
pub struct Task {
    pub conf: BinConf,
    pub depth: usize,
    pub monotonicity: crate::Size,
}

impl Task {
    pub fn new(conf: BinConf, depth: usize, monotonicity: crate::Size) -> Self {
        Self {
            conf,
            depth,
            monotonicity,
        }
    }
}

/// `true` once `conf`, reached at `depth` steps past the round's root,
/// is far enough along -- by depth or by load -- that generation should
/// stop descending and hand the rest of the subtree to a worker. Both
/// thresholds are load/depth *past the root*, not absolute, so the same
/// `Thresholds` apply no matter how deep the round's root already is.
pub fn is_boundary(conf: &BinConf, depth: usize, root_load: Load, thresholds: &Thresholds) -> bool {
    if depth >= thresholds.delta {
        return true;
    }
    conf.total_load() - root_load >= thresholds.tau
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::ZobristTable;
    use crate::params::GameParams;

    #[test]
    fn fires_on_depth_alone() {
        let params = GameParams::toy();
        let conf = BinConf::empty(params);
        let thresholds = Thresholds {
            delta: 0,
            ..Thresholds::default()
        };
        assert!(is_boundary(&conf, 0, 0, &thresholds));
    }

    #[test]
    fn fires_on_load_alone() {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 7);
        let mut conf = BinConf::empty(params);
        conf.assign_and_rehash(3, 0, &zobrist);
        let thresholds = Thresholds {
            delta: 100,
            tau: 2,
            ..Thresholds::default()
        };
        assert!(is_boundary(&conf, 1, 0, &thresholds));
    }

    #[test]
    fn does_not_fire_below_both_thresholds() {
        let params = GameParams::toy();
        let conf = BinConf::empty(params);
        let thresholds = Thresholds {
            delta: 100,
            tau: 100,
            ..Thresholds::default()
        };
        assert!(!is_boundary(&conf, 1, 0, &thresholds));
    }
}
