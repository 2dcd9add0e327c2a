use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::Thread;
use std::thread::ThreadId;

use parking_lot::Mutex;
use tracing::debug;
use tracing::trace;

/// Coalescing trigger for the worker loop.
///
/// One pending bit, not a counter: any number of [`signal`](Self::signal)
/// calls before the worker next runs collapse into a single activation.
/// Cheap to clone and safe to call from any context; it never blocks.
///
/// A signal outlives the workers it drives. Each new worker attaches itself
/// and takes over the wakeups, so the same signal can serve a later host.
#[derive(Clone, Default)]
pub struct WorkSignal {
    shared: Arc<SignalShared>,
}

#[derive(Default)]
pub(super) struct SignalShared {
    pub(super) pending: AtomicBool,
    pub(super) activations: AtomicU64,
    worker: Mutex<Option<Thread>>,
}

impl WorkSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests one worker activation. A no-op if one is already requested
    /// and has not started yet.
    pub fn signal(&self) {
        if self
            .shared
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            trace!("pending work signalled");
            self.wake();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.shared.pending.load(Ordering::Acquire)
    }

    /// Number of completed worker passes
    pub fn activations(&self) -> u64 {
        self.shared.activations.load(Ordering::Acquire)
    }

    pub(super) fn shared(&self) -> &SignalShared {
        &self.shared
    }

    /// Makes `worker` the thread woken by [`signal`](Self::signal),
    /// replacing any earlier one
    pub(super) fn attach(
        &self,
        worker: Thread,
    ) {
        if let Some(previous) = self.shared.worker.lock().replace(worker) {
            debug!("work signal moved from worker {:?}", previous.id());
        }
    }

    /// Forgets the attached thread if it is still `id`
    pub(super) fn detach(
        &self,
        id: ThreadId,
    ) {
        let mut worker = self.shared.worker.lock();
        if worker.as_ref().map(Thread::id) == Some(id) {
            *worker = None;
        }
    }

    /// Unparks the worker. Before a worker is attached the pending bit alone
    /// carries the request.
    pub(super) fn wake(&self) {
        if let Some(worker) = self.shared.worker.lock().as_ref() {
            worker.unpark();
        }
    }
}

impl SignalShared {
    /// Consumes the pending bit. Clearing it before the pass starts is what
    /// lets a signal raised mid-pass schedule exactly one more activation.
    pub(super) fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}
