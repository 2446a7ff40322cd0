//! The queen: drives rounds of generate-then-explore until the root
//! vertex is decided (§4.11). Grounded on `queen_class::start`'s round
//! loop, collapsed onto a single process: there is one `Dag`, one
//! `SearchContext`, and the overseer pool in [`overseer`] resolves each
//! round's tasks instead of a separate overseer process per machine.

pub mod overseer;

use crate::binconf::BinConf;
use crate::dag::{Dag, VertState, Victory};
use crate::messaging::Channel;
use crate::minimax::{self, SearchContext};
use crate::monotonicity::{self, Monotonicity};
use crate::params::SearchConfig;
use crate::task::Task;

/// the outcome of a full search: which side wins, plus the final DAG
/// and monotonicity reached, useful for diagnostics and for the CLI's
/// exit code.
#[derive(Debug)]
pub struct Solution {
    pub verdict: Victory,
    pub rounds: usize,
    pub vertices: usize,
    pub final_monotonicity: crate::Size,
}

pub struct Queen<'a> {
    ctx: &'a SearchContext,
    config: &'a SearchConfig,
}

impl<'a> Queen<'a> {
    pub fn new(ctx: &'a SearchContext, config: &'a SearchConfig) -> Self {
        Self { ctx, config }
    }

    /// run rounds of generate-then-explore to a decided root verdict.
    /// Each round: extend the DAG until every open branch is either
    /// decided or cut at a boundary task; resolve the round's tasks in
    /// parallel; if no tasks were produced and the root is still
    /// undecided, raise monotonicity and try again. A monotonicity that
    /// has reached the largest sendable item with no tasks left means
    /// the adversary has no further move at all, which is an algorithm
    /// win.
    pub fn solve(&self, channel: &dyn Channel) -> Solution {
        let mut dag = Dag::new();
        let mut conf = BinConf::empty(self.config.params);
        let mut monotonicity = Monotonicity::new(self.config.monotonicity_start);
        let max_item = self.config.params.max_item();
        let mut rounds = 0;

        loop {
            rounds += 1;
            let root_verdict = minimax::generate(
                self.ctx,
                &mut dag,
                &mut conf,
                monotonicity.value(),
                &self.config.thresholds,
            );
            if root_verdict.is_decided() {
                return Solution {
                    verdict: root_verdict,
                    rounds,
                    vertices: dag.vertex_count(),
                    final_monotonicity: monotonicity.value(),
                };
            }

            let tasks: Vec<Task> = dag
                .tasks()
                .into_iter()
                .map(|idx| Task::new(dag.adv(idx).conf.clone(), 0, monotonicity.value()))
                .collect();

            if tasks.is_empty() {
                if monotonicity.has_reached(max_item) {
                    return Solution {
                        verdict: Victory::AlgWins,
                        rounds,
                        vertices: dag.vertex_count(),
                        final_monotonicity: monotonicity.value(),
                    };
                }
                monotonicity = monotonicity::advance_round(monotonicity, max_item, &self.ctx.state);
                continue;
            }

            overseer::explore_batch(
                self.ctx,
                channel,
                tasks,
                monotonicity.value(),
                &self.config.thresholds,
                rounds,
            );

            for completion in channel.recv_results() {
                let idx = dag.get_or_insert_adv(completion.task.conf.clone());
                let vertex = dag.adv_mut(idx);
                vertex.win = completion.verdict;
                vertex.state = VertState::Finished;
            }

            monotonicity = monotonicity::advance_round(monotonicity, max_item, &self.ctx.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::local::LocalChannel;
    use crate::params::{GameParams, SearchConfig};

    #[test]
    fn solves_a_tiny_single_bin_instance() {
        let params = GameParams::new(1, 1, 2).unwrap();
        let config = SearchConfig::new(params);
        let ctx = SearchContext::new(params, &config.thresholds).unwrap();
        let channel = LocalChannel::new();
        let solution = Queen::new(&ctx, &config).solve(&channel);
        assert!(solution.verdict.is_decided());
        assert!(solution.vertices >= 1);
    }
}
