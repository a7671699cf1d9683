//! Background save job.
//!
//! The TUI loop must keep drawing while a save is in flight, so saves run on
//! their own thread and report back over a channel the loop polls each tick.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::client::AttendanceOps;
use crate::{Error, Result};
use rollcall_engine::SaveRequest;
use rollcall_types::SaveReceipt;

#[derive(Debug)]
pub enum WorkerEvent {
    Saved {
        revision: u64,
        result: Result<SaveReceipt>,
    },
}

pub struct SaveWorker {
    ops: AttendanceOps,
    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,
}

impl SaveWorker {
    pub fn new(ops: AttendanceOps) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { ops, tx, rx }
    }

    /// Start saving `request`. Returns once the job thread is running.
    pub fn submit(&self, request: SaveRequest) -> Result<()> {
        let ops = self.ops.clone();
        let tx = self.tx.clone();
        thread::Builder::new()
            .name("rollcall-save".to_string())
            .spawn(move || {
                let revision = request.revision;
                let result = ops.save(&request);
                if let Err(err) = &result {
                    tracing::error!(%err, class = %request.class_id, "save failed");
                }
                // Receiver gone means the UI already quit
                let _ = tx.send(WorkerEvent::Saved { revision, result });
            })
            .map(|_| ())
            .map_err(Error::Io)
    }

    /// Non-blocking poll for the UI loop
    pub fn try_recv(&self) -> Option<WorkerEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
