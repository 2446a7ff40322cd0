//! Transport between the queen (round coordinator) and the overseers
//! that resolve each round's boundary tasks (§4.9, §4.11). Abstracted
//! behind [`Channel`] so a networked backend can stand in for
//! [`local::LocalChannel`] without touching [`crate::scheduler`] --
//! grounded on the message-passing shape of the original
//! queen/overseer/networking implementation, collapsed onto one
//! process since this crate does not implement the MPI-style
//! multi-machine deployment.

pub mod local;
pub mod remote;

use crate::dag::Victory;
use crate::task::Task;

/// a completed task's verdict, handed back from an overseer to the
/// queen. Carries the task itself (not just its hash) since the queen
/// re-derives the task's DAG vertex via [`crate::dag::Dag::get_or_insert_adv`],
/// which needs the full configuration, not merely its hash.
#[derive(Debug, Clone)]
pub struct Completion {
    pub round: usize,
    pub task: Task,
    pub verdict: Victory,
}

/// the queen/overseer transport: tasks flow one way, completions flow
/// back, and `request_stop`/`stop_requested` implement the cooperative
/// early-termination signal exploring workers poll (see
/// [`crate::minimax::CancelSignal`]).
pub trait Channel: Send + Sync {
    fn send_tasks(&self, batch: Vec<Task>);
    fn recv_task(&self) -> Option<Task>;
    fn send_result(&self, result: Completion);
    fn recv_results(&self) -> Vec<Completion>;
    fn request_stop(&self);
    fn stop_requested(&self) -> bool;
}
