//! Interfaces of the external mesh engine and its transport.
//!
//! The engine is an opaque, single-instance, non-reentrant protocol stack.
//! This crate never implements it; it only drives it through [`Engine`] while
//! holding the [`Gate`](crate::Gate).
//!
//! Callbacks handed to the engine follow one rule: whatever the engine passes
//! back into them is a view of itself. State-change hooks receive `&dyn
//! Engine` (read-only queries), join completion receives `&mut dyn Engine` so
//! it can enable the network from inside the worker pass.

mod dataset;
mod flags;
mod transport;

pub use dataset::*;
pub use flags::*;
pub use transport::*;


use std::fmt;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Error codes reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("operation failed")]
    Failed,

    #[error("engine busy")]
    Busy,

    #[error("invalid arguments")]
    InvalidArgs,

    #[error("invalid state")]
    InvalidState,

    #[error("not implemented")]
    NotImplemented,

    #[error("security check failed")]
    Security,

    #[error("engine error code {0}")]
    Other(i32),
}

pub type EngineResult<T = ()> = std::result::Result<T, EngineError>;

/// Role of this device in the mesh partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceRole {
    #[default]
    Disabled,
    Detached,
    Child,
    Router,
    Leader,
}

impl fmt::Display for DeviceRole {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            DeviceRole::Disabled => "disabled",
            DeviceRole::Detached => "detached",
            DeviceRole::Child => "child",
            DeviceRole::Router => "router",
            DeviceRole::Leader => "leader",
        };
        f.write_str(name)
    }
}

/// Opaque datagram delivered on the receive path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: Vec<u8>,
}

impl Message {
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Receives datagrams the engine hands up to the host network stack
pub type ReceiveHandler = Arc<dyn Fn(Message) + Send + Sync>;

/// The engine's single state-change hook
pub type StateChangedHandler = Box<dyn FnMut(ChangedFlags, &dyn Engine) + Send>;

/// Completion of an asynchronous join procedure
pub type JoinCompleteHandler = Box<dyn FnOnce(EngineResult, &mut dyn Engine) + Send>;

/// Frame sink used by the coprocessor HDLC framer. Returns the number of
/// bytes accepted, `0` on failure.
pub type NcpSendFn = Box<dyn FnMut(&[u8]) -> usize + Send>;

/// Descriptive data sent along with the joiner credential
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinerParams {
    pub pskd: String,
    pub provisioning_url: Option<String>,
    pub vendor_name: String,
    pub vendor_model: String,
    pub vendor_sw_version: String,
    pub vendor_data: Option<String>,
}

/// Operations the host consumes from the mesh engine.
///
/// Every method is called with the gate held. `&self` methods are queries and
/// are the only ones reachable from a state-change hook.
#[cfg_attr(test, automock)]
pub trait Engine: Send {
    /// Whether deferred engine work is waiting to run
    fn tasklets_pending(&self) -> bool;

    /// Runs the currently pending deferred work. May queue more.
    fn process_tasklets(&mut self);

    /// Services driver and transport I/O
    fn process_drivers(&mut self);

    /// Whether a persisted active dataset exists
    fn is_commissioned(&self) -> bool;

    fn device_role(&self) -> DeviceRole;

    fn ip6_is_enabled(&self) -> bool;

    fn network_name(&self) -> String;

    fn set_network_name(
        &mut self,
        name: &str,
    ) -> EngineResult;

    fn set_channel(
        &mut self,
        channel: u8,
    ) -> EngineResult;

    fn set_pan_id(
        &mut self,
        pan_id: u16,
    ) -> EngineResult;

    fn set_extended_pan_id(
        &mut self,
        ext_pan_id: &ExtendedPanId,
    ) -> EngineResult;

    fn set_network_key(
        &mut self,
        key: &NetworkKey,
    ) -> EngineResult;

    /// Brings the mesh interface up or down
    fn set_thread_enabled(
        &mut self,
        enabled: bool,
    ) -> EngineResult;

    /// Starts the joiner. Returns once the procedure is started; the result is
    /// delivered later through `on_complete`.
    fn joiner_start(
        &mut self,
        params: &JoinerParams,
        on_complete: JoinCompleteHandler,
    ) -> EngineResult;

    fn set_state_changed_callback(
        &mut self,
        handler: StateChangedHandler,
    ) -> EngineResult;

    fn set_receive_filter_enabled(
        &mut self,
        enabled: bool,
    );

    fn set_receive_callback(
        &mut self,
        handler: ReceiveHandler,
    );

    fn set_nat64_cidr(
        &mut self,
        cidr: &Ipv4Cidr,
    ) -> EngineResult;

    fn set_nat64_receive_callback(
        &mut self,
        handler: ReceiveHandler,
    );

    /// Initializes the coprocessor HDLC framer with its frame sink
    fn init_ncp(
        &mut self,
        send: NcpSendFn,
    );
}
