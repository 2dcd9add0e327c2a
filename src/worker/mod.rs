//! The dedicated worker that owns all engine processing.
//!
//! ## Key Responsibilities
//! - Sleeps until the [`WorkSignal`] pending bit is raised
//! - Per activation: takes the gate, drains engine work until the engine
//!   reports none left, services driver I/O once, releases the gate
//! - Never overlaps itself: one OS thread, one activation at a time
//!
//! A signal raised while a pass is running is not lost. The pending bit is
//! consumed before the pass starts, so the new signal re-arms it and the loop
//! runs exactly one more pass afterwards.

mod signal;
pub use signal::*;


use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;
use std::thread::ThreadId;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::trace;

use crate::Engine;
use crate::Gate;
use crate::InitError;
use crate::Result;
use crate::WorkerConfig;

pub struct Worker {
    signal: WorkSignal,
    id: ThreadId,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawns the worker thread. Requests already raised on `signal` are
    /// picked up by its first iteration.
    pub fn spawn(
        gate: Arc<Gate>,
        signal: WorkSignal,
        config: &WorkerConfig,
    ) -> Result<Self> {
        let thread_signal = signal.clone();
        let shutdown = Arc::new(AtomicBool::new(false));
        let thread_shutdown = shutdown.clone();
        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .stack_size(config.stack_size)
            .spawn(move || run(gate, thread_signal, thread_shutdown))
            .map_err(InitError::WorkerSpawn)?;

        let id = handle.thread().id();
        info!("worker {:?} ({}) started", id, config.thread_name);

        Ok(Self {
            signal,
            id,
            shutdown,
            handle: Some(handle),
        })
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    pub fn signal(&self) -> &WorkSignal {
        &self.signal
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);

        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if thread::current().id() == self.id {
                // Dropped from inside a pass; the loop exits on its own.
                return;
            }
            if handle.join().is_err() {
                error!("worker {:?} panicked", self.id);
            }
        }
        debug!("worker {:?} stopped", self.id);
    }
}

fn run(
    gate: Arc<Gate>,
    signal: WorkSignal,
    shutdown: Arc<AtomicBool>,
) {
    // Attach before the first pending check so no wakeup is lost.
    signal.attach(thread::current());
    let shared = signal.shared();

    loop {
        if shutdown.load(Ordering::Acquire) {
            break;
        }
        if !shared.take_pending() {
            thread::park();
            continue;
        }

        let mut engine = gate.lock();
        let processed = process_pending(&mut *engine);
        drop(engine);

        let n = shared.activations.fetch_add(1, Ordering::AcqRel) + 1;
        trace!("worker pass #{} done, {} tasklet rounds", n, processed);
    }

    signal.detach(thread::current().id());
}

/// Drains deferred engine work, then services drivers once. Must be called
/// with the gate held. Returns the number of processing rounds.
pub(crate) fn process_pending(engine: &mut dyn Engine) -> usize {
    let mut rounds = 0;
    while engine.tasklets_pending() {
        engine.process_tasklets();
        rounds += 1;
    }
    engine.process_drivers();
    rounds
}
