//! The single mutual-exclusion gate in front of the engine.
//!
//! The gate owns the engine, so engine state is only reachable through a held
//! [`GateGuard`]. The worker loop and external callers compete for it on equal
//! terms. It is not reentrant: a holder calling [`Gate::lock`] again deadlocks.


use std::ops::Deref;
use std::ops::DerefMut;

use parking_lot::Mutex;
use parking_lot::MutexGuard;
use tracing::trace;

use crate::Engine;
use crate::Error;
use crate::Result;

pub struct Gate {
    engine: Mutex<Box<dyn Engine>>,
}

/// Proof of holding the gate. Releases it on drop.
pub struct GateGuard<'a> {
    inner: MutexGuard<'a, Box<dyn Engine>>,
}

impl Gate {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Blocks until the gate is free, then holds it.
    pub fn lock(&self) -> GateGuard<'_> {
        let inner = self.engine.lock();
        trace!("gate acquired");
        GateGuard { inner }
    }

    /// Takes the gate if it is free; never waits.
    pub fn try_lock(&self) -> Result<GateGuard<'_>> {
        self.engine
            .try_lock()
            .map(|inner| GateGuard { inner })
            .ok_or(Error::LockUnavailable)
    }

    pub fn is_locked(&self) -> bool {
        self.engine.is_locked()
    }
}

impl GateGuard<'_> {
    /// Releases the gate.
    pub fn unlock(self) {
        drop(self);
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        trace!("gate released");
    }
}

impl Deref for GateGuard<'_> {
    type Target = dyn Engine;

    fn deref(&self) -> &Self::Target {
        &**self.inner
    }
}

impl DerefMut for GateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut **self.inner
    }
}
