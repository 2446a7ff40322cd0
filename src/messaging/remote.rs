//! Stub for a networked transport. The original implementation spreads
//! a queen and many overseer processes across machines over raw
//! sockets (`networking.hpp`); this crate only runs single-process, so
//! `RemoteChannel` exists solely to show where that backend would
//! plug in behind [`super::Channel`] without the scheduler needing to
//! change.

use super::{Channel, Completion};
use crate::task::Task;

pub struct RemoteChannel;

impl Channel for RemoteChannel {
    fn send_tasks(&self, _batch: Vec<Task>) {
        unimplemented!("networked transport is not implemented by this crate")
    }

    fn recv_task(&self) -> Option<Task> {
        unimplemented!("networked transport is not implemented by this crate")
    }

    fn send_result(&self, _result: Completion) {
        unimplemented!("networked transport is not implemented by this crate")
    }

    fn recv_results(&self) -> Vec<Completion> {
        unimplemented!("networked transport is not implemented by this crate")
    }

    fn request_stop(&self) {
        unimplemented!("networked transport is not implemented by this crate")
    }

    fn stop_requested(&self) -> bool {
        unimplemented!("networked transport is not implemented by this crate")
    }
}
