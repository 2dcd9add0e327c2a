//! Ordered registry of state-change subscribers.
//!
//! Membership is keyed by the subscriber record's address. The registry never
//! owns a record: it stores `Weak` links, so a caller that drops its `Arc`
//! without unregistering is silently skipped rather than dereferenced.
//!
//! Mutation happens with the [`Gate`](crate::Gate) held (the host enforces
//! that); the inner mutex only protects the vector itself and is never held
//! while a subscriber runs.

mod subscriber;
pub use subscriber::*;


use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::Weak;

use parking_lot::Mutex;
use tracing::debug;
use tracing::error;
use tracing::trace;

use crate::ChangedFlags;
use crate::Engine;
use crate::Error;
use crate::RegistryError;
use crate::Result;

#[derive(Default)]
pub struct Registry {
    members: Mutex<Vec<Weak<StateChangeSubscriber>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record`.
    ///
    /// Fails with `InvalidArgument` when the record has no callback and with
    /// `AlreadyRegistered` when its address is already a member.
    pub fn register(
        &self,
        record: &Arc<StateChangeSubscriber>,
    ) -> Result<()> {
        if !record.has_callback() {
            return Err(Error::InvalidArgument("state change subscriber has no callback".into()));
        }

        let addr = Arc::as_ptr(record);
        let mut members = self.members.lock();
        if members.iter().any(|m| m.as_ptr() == addr) {
            return Err(RegistryError::AlreadyRegistered.into());
        }
        members.push(Arc::downgrade(record));

        debug!("subscriber {:p} registered ({} total)", addr, members.len());
        Ok(())
    }

    /// Removes `record`. Fails with `NotRegistered` when its address is not a
    /// member.
    pub fn unregister(
        &self,
        record: &Arc<StateChangeSubscriber>,
    ) -> Result<()> {
        let addr = Arc::as_ptr(record);
        let mut members = self.members.lock();
        let Some(pos) = members.iter().position(|m| m.as_ptr() == addr) else {
            return Err(RegistryError::NotRegistered.into());
        };
        members.remove(pos);

        debug!("subscriber {:p} unregistered ({} left)", addr, members.len());
        Ok(())
    }

    /// Invokes every live member in registration order.
    ///
    /// Iterates a snapshot, so members may be removed (including the one
    /// running) while the pass is in progress. A panicking subscriber is
    /// logged and the pass moves on to the next one.
    pub fn notify_all(
        &self,
        flags: ChangedFlags,
        engine: &dyn Engine,
    ) {
        let snapshot: Vec<Weak<StateChangeSubscriber>> = self.members.lock().clone();
        let mut dead = 0;

        for link in &snapshot {
            let Some(subscriber) = link.upgrade() else {
                dead += 1;
                continue;
            };

            trace!("notify subscriber {:p} flags={:#010x}", Arc::as_ptr(&subscriber), flags);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| subscriber.notify(flags, engine)));
            if outcome.is_err() {
                error!("state change subscriber {:p} panicked", Arc::as_ptr(&subscriber));
            }
        }

        if dead > 0 {
            self.prune();
        }
    }

    /// Number of live members. Links to freed records are not counted.
    pub fn len(&self) -> usize {
        self.members.lock().iter().filter(|link| link.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops links whose record has been freed without unregistering
    fn prune(&self) {
        let mut members = self.members.lock();
        let before = members.len();
        members.retain(|m| m.strong_count() > 0);
        debug!("pruned {} dropped subscribers", before - members.len());
    }
}
