use std::sync::Arc;
use std::thread::ThreadId;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::JoinObserver;
use crate::hdlc_send;
use crate::ChangedFlags;
use crate::Engine;
use crate::EngineError;
use crate::Error;
use crate::Gate;
use crate::GateGuard;
use crate::HostConfig;
use crate::InitError;
use crate::Message;
use crate::PacketRing;
use crate::ReceiveHandler;
use crate::Registry;
use crate::Result;
use crate::StateChangeSubscriber;
use crate::Transport;
use crate::WorkSignal;
use crate::Worker;

/// Host context for a single mesh engine instance.
///
/// Every engine access goes through the gate. Built by
/// [`HostBuilder`](super::HostBuilder).
pub struct OtHost {
    pub(super) config: Arc<HostConfig>,
    pub(super) gate: Arc<Gate>,
    pub(super) registry: Arc<Registry>,
    pub(super) signal: WorkSignal,
    pub(super) transport: Option<Arc<dyn Transport>>,
    pub(super) join_observer: Option<JoinObserver>,
    pub(super) worker: OnceCell<Worker>,
    pub(super) packets: Mutex<PacketRing<Message>>,
}

impl OtHost {
    /// Wires the engine callbacks and starts the worker.
    ///
    /// Only the first successful call does anything; later calls return
    /// `Ok(())` and never start a second worker. A failed call leaves the host
    /// uninitialized and may be retried.
    ///
    /// In host mode `receive` is required and gets every datagram the engine
    /// delivers, IPv6 and NAT64-translated IPv4 alike. It is ignored in
    /// coprocessor mode.
    pub fn init(
        &self,
        receive: Option<ReceiveHandler>,
    ) -> Result<()> {
        self.worker.get_or_try_init(|| self.init_once(receive)).map(|_| ())
    }

    pub fn is_initialized(&self) -> bool {
        self.worker.get().is_some()
    }

    fn init_once(
        &self,
        receive: Option<ReceiveHandler>,
    ) -> Result<Worker> {
        {
            let mut engine = self.gate.lock();
            if self.config.is_coprocessor() {
                self.init_coprocessor(&mut *engine)?;
            } else {
                self.init_host_stack(&mut *engine, receive)?;
            }
        }

        let worker = Worker::spawn(self.gate.clone(), self.signal.clone(), &self.config.worker)?;
        self.signal.signal();

        info!(
            "engine host initialized ({:?} mode, worker {:?})",
            self.config.platform.mode,
            worker.id()
        );
        Ok(worker)
    }

    fn init_coprocessor(
        &self,
        engine: &mut dyn Engine,
    ) -> Result<()> {
        let Some(transport) = self.transport.clone() else {
            return Err(Error::InvalidArgument("coprocessor mode requires a transport".into()));
        };

        if let Err(e) = transport.enable() {
            warn!("Failed to enable transport: [{}]", e);
        }

        engine.init_ncp(Box::new(move |buf: &[u8]| hdlc_send(&*transport, buf)));
        Ok(())
    }

    fn init_host_stack(
        &self,
        engine: &mut dyn Engine,
        receive: Option<ReceiveHandler>,
    ) -> Result<()> {
        let receive =
            receive.ok_or_else(|| Error::InvalidArgument("receive handler is required in host mode".into()))?;

        engine.set_receive_filter_enabled(true);
        engine.set_receive_callback(receive.clone());

        if let Some(parsed) = self.config.platform.nat64_cidr() {
            let cidr = parsed.map_err(|e| InitError::Nat64CidrParse {
                cidr: self.config.platform.nat64_cidr.clone(),
                reason: e.to_string(),
            })?;
            engine.set_nat64_cidr(&cidr).map_err(InitError::Nat64CidrRejected)?;
            engine.set_nat64_receive_callback(receive);
            debug!("NAT64 translator using {}", cidr);
        }

        let registry = self.registry.clone();
        engine
            .set_state_changed_callback(Box::new(move |flags: ChangedFlags, engine: &dyn Engine| {
                let role = engine.device_role();
                let ip6 = if engine.ip6_is_enabled() { "up" } else { "down" };
                info!("State changed! Flags: {:#010x} Current role: {} Ip6: {}", flags, role, ip6);
                registry.notify_all(flags, engine);
            }))
            .map_err(InitError::StateCallback)?;

        Ok(())
    }

    /// Takes the network down. Always succeeds; an interface that was not up
    /// is not an error. A no-op in coprocessor mode.
    pub fn stop_network(&self) -> Result<()> {
        if self.config.is_coprocessor() {
            return Ok(());
        }

        let mut engine = self.gate.lock();
        match engine.set_thread_enabled(false) {
            Ok(()) => info!("network stopped"),
            Err(EngineError::InvalidState) => debug!("interface was not up"),
            Err(e) => warn!("Failed to stop the network [{}]", e),
        }
        Ok(())
    }

    /// Blocks until the gate is free. For callers batching several engine
    /// operations atomically.
    pub fn lock(&self) -> GateGuard<'_> {
        self.gate.lock()
    }

    /// Takes the gate without waiting, or fails with
    /// [`Error::LockUnavailable`].
    pub fn try_lock(&self) -> Result<GateGuard<'_>> {
        self.gate.try_lock()
    }

    /// Adds a subscriber for engine state changes.
    ///
    /// Must not be called while the caller already holds the gate, which
    /// includes calling it from inside a subscriber callback.
    pub fn register_state_change_subscriber(
        &self,
        record: &Arc<StateChangeSubscriber>,
    ) -> Result<()> {
        let _gate = self.gate.lock();
        self.registry.register(record)
    }

    /// Removes a subscriber. Same gate rule as registration.
    pub fn unregister_state_change_subscriber(
        &self,
        record: &Arc<StateChangeSubscriber>,
    ) -> Result<()> {
        let _gate = self.gate.lock();
        self.registry.unregister(record)
    }

    /// Requests one worker pass. Never blocks.
    pub fn signal_pending_work(&self) {
        self.signal.signal();
    }

    /// A handle to the pending-work signal, for the engine's own hook
    pub fn signaller(&self) -> WorkSignal {
        self.signal.clone()
    }

    /// Identity of the worker thread, once initialized
    pub fn worker_id(&self) -> Option<ThreadId> {
        self.worker.get().map(Worker::id)
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Queues a received datagram for the host network stack
    pub fn enqueue_packet(
        &self,
        message: Message,
    ) -> Result<()> {
        self.packets.lock().push(message)
    }

    pub fn dequeue_packet(&self) -> Option<Message> {
        self.packets.lock().pop()
    }
}
