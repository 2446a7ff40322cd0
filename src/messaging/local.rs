//! The in-process channel: crossbeam queues for tasks and completions
//! plus an atomic stop flag, used whenever the queen and its overseers
//! live in the same binary (the only deployment this crate runs).

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::{Channel, Completion};
use crate::task::Task;

pub struct LocalChannel {
    tasks_tx: Sender<Task>,
    tasks_rx: Receiver<Task>,
    results_tx: Sender<Completion>,
    results_rx: Receiver<Completion>,
    stop: AtomicBool,
}

impl LocalChannel {
    pub fn new() -> Self {
        let (tasks_tx, tasks_rx) = unbounded();
        let (results_tx, results_rx) = unbounded();
        Self {
            tasks_tx,
            tasks_rx,
            results_tx,
            results_rx,
            stop: AtomicBool::new(false),
        }
    }
}

impl Default for LocalChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel for LocalChannel {
    fn send_tasks(&self, batch: Vec<Task>) {
        for task in batch {
            let _ = self.tasks_tx.send(task);
        }
    }

    fn recv_task(&self) -> Option<Task> {
        self.tasks_rx.try_recv().ok()
    }

    fn send_result(&self, result: Completion) {
        let _ = self.results_tx.send(result);
    }

    fn recv_results(&self) -> Vec<Completion> {
        self.results_rx.try_iter().collect()
    }

    fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::BinConf;
    use crate::dag::Victory;
    use crate::params::GameParams;

    #[test]
    fn tasks_round_trip_through_the_queue() {
        let channel = LocalChannel::new();
        let task = Task::new(BinConf::empty(GameParams::toy()), 0, 0);
        channel.send_tasks(vec![task.clone()]);
        let received = channel.recv_task().unwrap();
        assert_eq!(received.depth, task.depth);
    }

    #[test]
    fn stop_flag_is_observed_once_requested() {
        let channel = LocalChannel::new();
        assert!(!channel.stop_requested());
        channel.request_stop();
        assert!(channel.stop_requested());
    }

    #[test]
    fn results_drain_in_one_batch() {
        let channel = LocalChannel::new();
        let task = Task::new(BinConf::empty(GameParams::toy()), 0, 0);
        channel.send_result(Completion {
            round: 0,
            task,
            verdict: Victory::AdvWins,
        });
        assert_eq!(channel.recv_results().len(), 1);
    }
}
