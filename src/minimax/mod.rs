//! The minimax search core (§4.3, §4.8): mutually recursive
//! `adversary`/`algorithm` steps, run in one of two modes.
//!
//! *Generating* builds [`crate::dag::Dag`] as it goes, stopping at
//! every boundary vertex (§4.9) instead of resolving it, and memoizing
//! on `VertState::Finished` so transpositions are not re-examined.
//! *Exploring* never touches a `Dag` -- it reads and writes the
//! transposition caches on [`SearchContext`] directly, and polls a
//! cooperative cancellation signal every `poll_interval` recursive
//! calls.
//!
//! Grounded on `computation<MODE>::adversary`/`::algorithm` in the
//! original adversary-side minimax implementation. The "updating"
//! third mode (post-hoc DAG garbage collection between rounds) has no
//! counterpart here -- see the note on [`crate::dag::Dag`].

use petgraph::stable_graph::NodeIndex;

use crate::binconf::{BinConf, ZobristTable};
use crate::cache::{GuaranteeCache, StateCache, Victory as CacheVictory};
use crate::dag::{Dag, VertState, Victory};
use crate::heuristics;
use crate::maxfeas;
use crate::params::{GameParams, Thresholds};
use crate::task;
use crate::{Load, Size};

/// which of the two implemented modes a [`Search`] runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Generating,
    Exploring,
}

/// everything a search needs that is shared, read-mostly, and scoped
/// to one `GameParams` value: the Zobrist table every `BinConf`
/// mutation hashes against, and the two transposition caches.
pub struct SearchContext {
    pub params: GameParams,
    pub zobrist: ZobristTable,
    pub guarantee: GuaranteeCache,
    pub state: StateCache,
}

impl SearchContext {
    pub fn new(params: GameParams, thresholds: &Thresholds) -> crate::Result<Self> {
        Ok(Self {
            params,
            zobrist: ZobristTable::new(params, 0x5EED_0000_0000_0001 ^ params.bins as u64),
            guarantee: GuaranteeCache::new(thresholds.guarantee_log_size, thresholds.probe_len)?,
            state: StateCache::new(thresholds.state_log_size, thresholds.probe_len)?,
        })
    }
}

/// a cooperative cancellation signal exploring workers poll
/// periodically instead of after every recursive call. Implemented by
/// the scheduler's message channel; trivially `false` for any unit
/// test or exploration that never cancels.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

impl<F: Fn() -> bool> CancelSignal for F {
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// one minimax run against a `SearchContext`. `dag` is only present
/// while generating; `cancel` is only consulted while exploring.
pub struct Search<'a> {
    ctx: &'a SearchContext,
    mode: Mode,
    dag: Option<&'a mut Dag>,
    monotonicity: Size,
    thresholds: &'a Thresholds,
    root_load: Load,
    iterations: usize,
    cancel: Option<&'a dyn CancelSignal>,
}

impl<'a> Search<'a> {
    pub fn generating(
        ctx: &'a SearchContext,
        dag: &'a mut Dag,
        monotonicity: Size,
        thresholds: &'a Thresholds,
        root_load: Load,
    ) -> Self {
        Self {
            ctx,
            mode: Mode::Generating,
            dag: Some(dag),
            monotonicity,
            thresholds,
            root_load,
            iterations: 0,
            cancel: None,
        }
    }

    pub fn exploring(
        ctx: &'a SearchContext,
        monotonicity: Size,
        thresholds: &'a Thresholds,
        cancel: Option<&'a dyn CancelSignal>,
    ) -> Self {
        Self {
            ctx,
            mode: Mode::Exploring,
            dag: None,
            monotonicity,
            thresholds,
            root_load: 0,
            iterations: 0,
            cancel,
        }
    }

    /// `true` once every `poll_interval` calls, if a cancellation
    /// signal was given and it fires. A no-op while generating, since
    /// generation is bounded by the task boundary instead.
    fn cancelled(&mut self) -> bool {
        if self.mode != Mode::Exploring {
            return false;
        }
        self.iterations += 1;
        if self.iterations % self.thresholds.poll_interval != 0 {
            return false;
        }
        self.cancel.map(|c| c.is_cancelled()).unwrap_or(false)
    }

    /// the adversary's move: pick an item size (or let a committed
    /// heuristic strategy pick it), recurse into `algorithm`, and
    /// decide the verdict as soon as one item forces an adversary win.
    pub fn adversary(&mut self, conf: &mut BinConf, depth: usize, adv_idx: Option<NodeIndex>) -> Victory {
        if self.mode == Mode::Generating {
            if let Some(idx) = adv_idx {
                let vertex = self.dag.as_ref().unwrap().adv(idx);
                if vertex.state == VertState::Finished {
                    return vertex.win;
                }
            }
        }

        if self.cancelled() {
            return Victory::Irrelevant;
        }

        if let Some(strategy) = heuristics::detect(conf) {
            if self.mode == Mode::Generating {
                if let Some(idx) = adv_idx {
                    let vertex = self.dag.as_mut().unwrap().adv_mut(idx);
                    vertex.heuristic = Some(strategy);
                    vertex.win = Victory::AdvWins;
                    vertex.state = VertState::Finished;
                }
            }
            return Victory::AdvWins;
        }

        if self.mode == Mode::Exploring {
            if let Some(cached) = self.ctx.state.lookup(conf.state_hash()) {
                return match cached {
                    CacheVictory::AdvWins => Victory::AdvWins,
                    CacheVictory::AlgWins => Victory::AlgWins,
                };
            }
        }

        if self.mode == Mode::Generating {
            if let Some(idx) = adv_idx {
                if task::is_boundary(conf, depth, self.root_load, self.thresholds) {
                    self.dag.as_mut().unwrap().adv_mut(idx).state = VertState::Expand;
                    return Victory::Uncertain;
                }
            }
        }

        let bound = maxfeas::max_feasible_item(conf, &self.ctx.guarantee).unwrap_or(0);
        let max_item = bound.clamp(0, conf.params().max_item() as Load) as Size;

        let mut win = Victory::AlgWins;
        let lower_bound = self.monotonicity.max(1);
        for item in (lower_bound..=max_item).rev() {
            let alg_idx = if self.mode == Mode::Generating {
                let idx = self.dag.as_mut().unwrap().get_or_insert_alg(conf.clone(), item);
                if let Some(parent) = adv_idx {
                    self.dag.as_mut().unwrap().add_adv_edge(parent, idx, item);
                }
                Some(idx)
            } else {
                None
            };

            let below = self.algorithm(conf, item, depth, alg_idx);

            match below {
                Victory::Irrelevant => return Victory::Irrelevant,
                Victory::AdvWins => {
                    win = Victory::AdvWins;
                    break;
                }
                Victory::AlgWins => {}
                Victory::Uncertain => {
                    if win == Victory::AlgWins {
                        win = Victory::Uncertain;
                    }
                }
            }
        }

        if self.mode == Mode::Exploring && win.is_decided() {
            let cached = if win == Victory::AdvWins {
                CacheVictory::AdvWins
            } else {
                CacheVictory::AlgWins
            };
            self.ctx.state.insert(conf.state_hash(), cached);
        }

        if self.mode == Mode::Generating {
            if let Some(idx) = adv_idx {
                let vertex = self.dag.as_mut().unwrap().adv_mut(idx);
                vertex.win = win;
                if win.is_decided() {
                    vertex.state = VertState::Finished;
                }
            }
        }

        win
    }

    /// the algorithm's move: place `item` into the first bin (by
    /// sorted order, skipping symmetric duplicates) that does not bust
    /// the stretched capacity, and recurse. A bin at or past the
    /// stretch bound is simply skipped -- the good situation for the
    /// adversary -- which is why `win` defaults to `AdvWins`: if no
    /// bin accepts the item, that default stands unchanged.
    pub fn algorithm(
        &mut self,
        conf: &mut BinConf,
        item: Size,
        depth: usize,
        alg_idx: Option<NodeIndex>,
    ) -> Victory {
        if self.mode == Mode::Generating {
            if let Some(idx) = alg_idx {
                let vertex = self.dag.as_ref().unwrap().alg(idx);
                if vertex.state == VertState::Finished {
                    return vertex.win;
                }
            }
        }

        if self.cancelled() {
            return Victory::Irrelevant;
        }

        let params = conf.params();
        let bins = params.bins as usize;
        let mut win = Victory::AdvWins;

        // while exploring, peek the state cache for every legal bin
        // before paying for a real recursive descent: a single cached
        // alg-wins child settles this vertex immediately.
        if self.mode == Mode::Exploring {
            for bin in 0..bins {
                if bin > 0 && conf.load(bin) == conf.load(bin - 1) {
                    continue;
                }
                if conf.load(bin) + item as Load >= params.stretch as Load {
                    continue;
                }
                let prev_last = conf.last_item();
                let settled_at = conf.assign_and_rehash(item, bin, &self.ctx.zobrist);
                let hit = self.ctx.state.lookup(conf.state_hash()) == Some(CacheVictory::AlgWins);
                conf.unassign_and_rehash(item, settled_at, prev_last, &self.ctx.zobrist);
                if hit {
                    return Victory::AlgWins;
                }
            }
        }

        for bin in 0..bins {
            if bin > 0 && conf.load(bin) == conf.load(bin - 1) {
                continue;
            }
            if conf.load(bin) + item as Load >= params.stretch as Load {
                continue;
            }

            let prev_last = conf.last_item();
            let settled_at = conf.assign_and_rehash(item, bin, &self.ctx.zobrist);

            let adv_idx = if self.mode == Mode::Generating {
                let idx = self.dag.as_mut().unwrap().get_or_insert_adv(conf.clone());
                if let Some(parent) = alg_idx {
                    self.dag.as_mut().unwrap().add_alg_edge(parent, idx, bin);
                }
                Some(idx)
            } else {
                None
            };

            let below = self.adversary(conf, depth + 1, adv_idx);
            conf.unassign_and_rehash(item, settled_at, prev_last, &self.ctx.zobrist);

            match below {
                Victory::Irrelevant => return Victory::Irrelevant,
                Victory::AlgWins => {
                    if self.mode == Mode::Generating {
                        if let Some(idx) = alg_idx {
                            let vertex = self.dag.as_mut().unwrap().alg_mut(idx);
                            vertex.win = Victory::AlgWins;
                            vertex.state = VertState::Finished;
                        }
                    }
                    return Victory::AlgWins;
                }
                Victory::AdvWins => {}
                Victory::Uncertain => {
                    if win == Victory::AdvWins {
                        win = Victory::Uncertain;
                    }
                }
            }
        }

        if self.mode == Mode::Generating {
            if let Some(idx) = alg_idx {
                let vertex = self.dag.as_mut().unwrap().alg_mut(idx);
                vertex.win = win;
                if win.is_decided() {
                    vertex.state = VertState::Finished;
                }
            }
        }

        win
    }
}

/// explore `conf` to a decided verdict, reading and writing `ctx`'s
/// caches but never touching a `Dag`.
pub fn explore(
    ctx: &SearchContext,
    conf: &mut BinConf,
    monotonicity: Size,
    thresholds: &Thresholds,
    cancel: Option<&dyn CancelSignal>,
) -> Victory {
    Search::exploring(ctx, monotonicity, thresholds, cancel).adversary(conf, 0, None)
}

/// generate (a bounded portion of) the DAG rooted at `conf`, stopping
/// at every boundary vertex. The root's verdict is `Uncertain` exactly
/// when at least one boundary task remains unresolved.
pub fn generate(
    ctx: &SearchContext,
    dag: &mut Dag,
    conf: &mut BinConf,
    monotonicity: Size,
    thresholds: &Thresholds,
) -> Victory {
    let root_load = conf.total_load();
    let root_idx = match dag.root() {
        Some(idx) => idx,
        None => dag.add_root(conf.clone()),
    };
    Search::generating(ctx, dag, monotonicity, thresholds, root_load).adversary(conf, 0, Some(root_idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explores_a_single_tiny_bin_to_a_decided_verdict() {
        // with one bin, offline feasibility (capacity 1) is exhausted
        // after a single item, so the game is forced to terminate in a
        // couple of recursive steps either way.
        let params = GameParams::new(1, 1, 2).unwrap();
        let thresholds = Thresholds::default();
        let ctx = SearchContext::new(params, &thresholds).unwrap();
        let mut conf = BinConf::empty(params);
        let result = explore(&ctx, &mut conf, 0, &thresholds, None);
        assert!(result.is_decided());
    }

    #[test]
    fn generates_a_small_dag_to_a_decided_root() {
        let params = GameParams::new(1, 1, 2).unwrap();
        let thresholds = Thresholds {
            delta: 50,
            tau: 50,
            ..Thresholds::default()
        };
        let ctx = SearchContext::new(params, &thresholds).unwrap();
        let mut dag = Dag::new();
        let mut conf = BinConf::empty(params);
        let result = generate(&ctx, &mut dag, &mut conf, 0, &thresholds);
        assert!(result.is_decided());
        assert!(dag.vertex_count() >= 2);
    }

    #[test]
    fn exploring_never_mutates_the_configuration_it_is_given() {
        let params = GameParams::toy();
        let thresholds = Thresholds::default();
        let ctx = SearchContext::new(params, &thresholds).unwrap();
        let mut conf = BinConf::empty(params);
        let before = conf.clone();
        let _ = explore(&ctx, &mut conf, 0, &thresholds, None);
        assert_eq!(conf, before);
    }

    #[test]
    fn algorithm_heuristic_visit_short_circuits_on_a_cached_alg_win() {
        let params = GameParams::toy();
        let thresholds = Thresholds::default();
        let ctx = SearchContext::new(params, &thresholds).unwrap();
        let mut conf = BinConf::empty(params);

        let mut search = Search::exploring(&ctx, 0, &thresholds, None);
        let settled_at = conf.assign_and_rehash(1, 0, &ctx.zobrist);
        ctx.state.insert(conf.state_hash(), CacheVictory::AlgWins);
        conf.unassign_and_rehash(1, settled_at, 0, &ctx.zobrist);

        let result = search.algorithm(&mut conf, 1, 0, None);
        assert_eq!(result, Victory::AlgWins);
    }
}
