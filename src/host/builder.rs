use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::debug;

use super::JoinObserver;
use super::JoinOutcome;
use super::OtHost;
use crate::Engine;
use crate::Error;
use crate::Gate;
use crate::HostConfig;
use crate::PacketRing;
use crate::Registry;
use crate::Result;
use crate::Transport;
use crate::WorkSignal;

/// Assembles an [`OtHost`] around a caller-provided engine.
///
/// Anything left unset falls back to a default: configuration is loaded with
/// [`HostConfig::new`], the work signal is created fresh and no join observer
/// is installed. A transport is mandatory in coprocessor mode.
pub struct HostBuilder {
    engine: Box<dyn Engine>,
    config: Option<HostConfig>,
    transport: Option<Arc<dyn Transport>>,
    join_observer: Option<JoinObserver>,
    signal: Option<WorkSignal>,
}

impl HostBuilder {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            engine,
            config: None,
            transport: None,
            join_observer: None,
            signal: None,
        }
    }

    /// Replaces the whole host configuration
    pub fn config(
        mut self,
        config: HostConfig,
    ) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the byte transport used by the coprocessor framer
    pub fn transport(
        mut self,
        transport: Arc<dyn Transport>,
    ) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Observes the result of every asynchronous join
    pub fn join_observer<F>(
        mut self,
        observer: F,
    ) -> Self
    where
        F: Fn(JoinOutcome) + Send + Sync + 'static,
    {
        self.join_observer = Some(Arc::new(observer));
        self
    }

    /// Shares a signal the engine already holds for its pending-work hook
    pub fn work_signal(
        mut self,
        signal: WorkSignal,
    ) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Validates configuration and assembles the host. Does not touch the
    /// engine; that happens in [`OtHost::init`].
    pub fn build(self) -> Result<OtHost> {
        let config = match self.config {
            Some(config) => config,
            None => HostConfig::new()?,
        }
        .validate()?;

        if config.is_coprocessor() && self.transport.is_none() {
            return Err(Error::InvalidArgument("coprocessor mode requires a transport".into()));
        }

        debug!("building host: {:?}", config);

        let packets = PacketRing::new(config.packet.list_size);
        Ok(OtHost {
            gate: Arc::new(Gate::new(self.engine)),
            registry: Arc::new(Registry::new()),
            signal: self.signal.unwrap_or_default(),
            transport: self.transport,
            join_observer: self.join_observer,
            worker: OnceCell::new(),
            packets: Mutex::new(packets),
            config: Arc::new(config),
        })
    }
}
