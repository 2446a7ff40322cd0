//! The overseer: resolves one round's batch of boundary tasks, fanning
//! them out over a rayon thread pool instead of the original's pool of
//! `worker` threads per overseer process (§4.11). Each task is
//! explored independently against a cloned `BinConf` -- no two tasks
//! share mutable state besides the read-mostly caches on
//! `SearchContext`.

use rayon::prelude::*;

use crate::messaging::{Channel, Completion};
use crate::minimax::{self, CancelSignal, SearchContext};
use crate::params::Thresholds;
use crate::task::Task;
use crate::Size;

struct ChannelCancel<'a>(&'a dyn Channel);

impl CancelSignal for ChannelCancel<'_> {
    fn is_cancelled(&self) -> bool {
        self.0.stop_requested()
    }
}

/// resolve every task in `batch` in parallel, sending each verdict
/// back over `channel` as it completes. Stops picking up new tasks
/// once the channel's stop flag is set; a task already in flight still
/// runs to completion, since `minimax::explore` itself polls the same
/// flag every `poll_interval` recursive calls.
pub fn explore_batch(
    ctx: &SearchContext,
    channel: &dyn Channel,
    batch: Vec<Task>,
    monotonicity: Size,
    thresholds: &Thresholds,
    round: usize,
) {
    batch.into_par_iter().for_each(|task| {
        if channel.stop_requested() {
            return;
        }
        let mut conf = task.conf.clone();
        let cancel = ChannelCancel(channel);
        let verdict = minimax::explore(ctx, &mut conf, monotonicity, thresholds, Some(&cancel));
        channel.send_result(Completion {
            round,
            task,
            verdict,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::BinConf;
    use crate::messaging::local::LocalChannel;
    use crate::params::GameParams;

    #[test]
    fn every_task_produces_exactly_one_completion() {
        let params = GameParams::new(1, 1, 2).unwrap();
        let thresholds = Thresholds::default();
        let ctx = SearchContext::new(params, &thresholds).unwrap();
        let channel = LocalChannel::new();
        let tasks = vec![
            Task::new(BinConf::empty(params), 0, 0),
            Task::new(BinConf::empty(params), 0, 0),
        ];
        explore_batch(&ctx, &channel, tasks, 0, &thresholds, 0);
        assert_eq!(channel.recv_results().len(), 2);
    }
}
