//! Tick clock and background propagation worker
//!
//! The `Ticker` owns the only timer and emits tick numbers over a channel.
//! The `PropagationWorker` subscribes to those ticks and publishes one fresh
//! `Snapshot` per tick, so the read path never shares mutable state with the
//! write path.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::RwLock;

use super::{OrbitPropagator, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickCommand {
    Pause,
    Resume,
    Stop,
}

/// Fixed-period tick source
pub struct Ticker {
    sender: Sender<TickCommand>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Start emitting ticks from `start_tick`, one every `period`
    pub fn spawn(period: Duration, start_tick: u64) -> (Self, Receiver<u64>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<TickCommand>();
        let (tick_tx, tick_rx) = mpsc::channel::<u64>();

        let handle = thread::spawn(move || {
            let mut tick = start_tick;
            let mut paused = false;

            loop {
                match cmd_rx.recv_timeout(period) {
                    Ok(TickCommand::Pause) => paused = true,
                    Ok(TickCommand::Resume) => paused = false,
                    Ok(TickCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        if paused {
                            continue;
                        }
                        if tick_tx.send(tick).is_err() {
                            // Nobody is listening any more
                            break;
                        }
                        tick += 1;
                    }
                }
            }
            log::debug!("Ticker stopped at tick {}", tick);
        });

        (
            Self {
                sender: cmd_tx,
                handle: Some(handle),
            },
            tick_rx,
        )
    }

    pub fn pause(&self) {
        let _ = self.sender.send(TickCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.sender.send(TickCommand::Resume);
    }

    /// Stop the clock and wait for its thread
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.sender.send(TickCommand::Stop);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Subscribes to ticks and publishes snapshots
pub struct PropagationWorker {
    latest: Arc<RwLock<Option<Snapshot>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl PropagationWorker {
    /// Propagate every tick received on `ticks`.
    ///
    /// The worker exits when the tick channel closes.
    pub fn spawn(propagator: OrbitPropagator, ticks: Receiver<u64>) -> (Self, Receiver<Snapshot>) {
        let (snapshot_tx, snapshot_rx) = mpsc::channel::<Snapshot>();
        let latest: Arc<RwLock<Option<Snapshot>>> = Arc::new(RwLock::new(None));
        let published = Arc::clone(&latest);

        let handle = thread::spawn(move || {
            let mut consumer_alive = true;

            while let Ok(tick) = ticks.recv() {
                let snapshot = propagator.propagate_all(tick);
                *published.write() = Some(snapshot.clone());

                if consumer_alive && snapshot_tx.send(snapshot).is_err() {
                    // Channel consumer went away; keep serving `latest()`
                    consumer_alive = false;
                }
            }
            log::debug!("Propagation worker stopped");
        });

        (
            Self {
                latest,
                handle: Some(handle),
            },
            snapshot_rx,
        )
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> Option<Snapshot> {
        self.latest.read().clone()
    }

    /// Wait for the worker to drain; the tick source must be stopped first
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
