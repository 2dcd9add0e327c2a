use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ChangedFlags;
use crate::DeviceRole;
use crate::Engine;
use crate::EngineError;
use crate::EngineResult;
use crate::ExtendedPanId;
use crate::Ipv4Cidr;
use crate::JoinCompleteHandler;
use crate::JoinerParams;
use crate::Message;
use crate::NcpSendFn;
use crate::NetworkKey;
use crate::ReceiveHandler;
use crate::StateChangedHandler;
use crate::WorkSignal;

/// Observable state of a [`FakeEngine`]. Tests keep a clone of the `Arc`
/// while the engine itself lives behind the gate.
#[derive(Default)]
pub struct FakeState {
    /// Units of deferred work waiting to run
    pub pending: usize,
    /// Extra units queued by each processing round, consumed front to back
    pub chained: Vec<usize>,
    pub tasklet_rounds: usize,
    pub driver_passes: usize,

    pub commissioned: bool,
    pub enabled: bool,
    pub enable_calls: Vec<bool>,
    pub network_name: String,
    pub channel: Option<u8>,
    pub pan_id: Option<u16>,
    pub ext_pan_id: Option<ExtendedPanId>,
    pub network_key: Option<NetworkKey>,

    pub join_calls: Vec<JoinerParams>,
    /// Join result delivered on the next processing round
    pub join_result: Option<EngineResult>,
    /// State changes raised on the next processing round
    pub queued_changes: Vec<ChangedFlags>,

    pub receive_filter: bool,
    pub has_receive_callback: bool,
    pub has_nat64_callback: bool,
    pub nat64_cidr: Option<Ipv4Cidr>,
    pub has_state_callback: bool,
    pub ncp_initialized: bool,

    /// Operation name -> error returned by that operation
    pub failures: HashMap<&'static str, EngineError>,
    /// Order in which mutating operations were called
    pub calls: Vec<&'static str>,
}

pub struct FakeEngine {
    state: Arc<Mutex<FakeState>>,
    signal: Option<WorkSignal>,
    state_handler: Option<StateChangedHandler>,
    join_handler: Option<JoinCompleteHandler>,
    receive: Option<ReceiveHandler>,
    ncp_send: Option<NcpSendFn>,
}

impl FakeEngine {
    pub fn new() -> (Self, Arc<Mutex<FakeState>>) {
        let state = Arc::new(Mutex::new(FakeState {
            network_name: "fake".into(),
            ..Default::default()
        }));
        let engine = Self {
            state: state.clone(),
            signal: None,
            state_handler: None,
            join_handler: None,
            receive: None,
            ncp_send: None,
        };
        (engine, state)
    }

    /// Lets the engine raise its own pending-work signal, as a real engine
    /// binding would.
    pub fn with_signal(
        mut self,
        signal: WorkSignal,
    ) -> Self {
        self.signal = Some(signal);
        self
    }

    fn record(
        &self,
        op: &'static str,
    ) -> EngineResult {
        let mut s = self.state.lock();
        s.calls.push(op);
        match s.failures.get(op) {
            Some(e) => Err(*e),
            None => Ok(()),
        }
    }

    fn raise_pending(&self) {
        if let Some(signal) = &self.signal {
            signal.signal();
        }
    }
}

impl Engine for FakeEngine {
    fn tasklets_pending(&self) -> bool {
        let s = self.state.lock();
        s.pending > 0 || s.join_result.is_some() || !s.queued_changes.is_empty()
    }

    fn process_tasklets(&mut self) {
        let (changes, join) = {
            let mut s = self.state.lock();
            s.pending = s.pending.saturating_sub(1);
            if !s.chained.is_empty() {
                let more = s.chained.remove(0);
                s.pending += more;
            }
            s.tasklet_rounds += 1;
            (mem::take(&mut s.queued_changes), s.join_result.take())
        };

        if let Some(result) = join {
            if let Some(on_complete) = self.join_handler.take() {
                on_complete(result, self);
            }
        }

        for flags in changes {
            if let Some(mut handler) = self.state_handler.take() {
                handler(flags, &*self);
                self.state_handler = Some(handler);
            }
        }
    }

    fn process_drivers(&mut self) {
        self.state.lock().driver_passes += 1;
    }

    fn is_commissioned(&self) -> bool {
        self.state.lock().commissioned
    }

    fn device_role(&self) -> DeviceRole {
        if self.state.lock().enabled {
            DeviceRole::Leader
        } else {
            DeviceRole::Disabled
        }
    }

    fn ip6_is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    fn network_name(&self) -> String {
        self.state.lock().network_name.clone()
    }

    fn set_network_name(
        &mut self,
        name: &str,
    ) -> EngineResult {
        self.record("set_network_name")?;
        self.state.lock().network_name = name.to_string();
        Ok(())
    }

    fn set_channel(
        &mut self,
        channel: u8,
    ) -> EngineResult {
        self.record("set_channel")?;
        self.state.lock().channel = Some(channel);
        Ok(())
    }

    fn set_pan_id(
        &mut self,
        pan_id: u16,
    ) -> EngineResult {
        self.record("set_pan_id")?;
        self.state.lock().pan_id = Some(pan_id);
        Ok(())
    }

    fn set_extended_pan_id(
        &mut self,
        ext_pan_id: &ExtendedPanId,
    ) -> EngineResult {
        self.record("set_extended_pan_id")?;
        self.state.lock().ext_pan_id = Some(*ext_pan_id);
        Ok(())
    }

    fn set_network_key(
        &mut self,
        key: &NetworkKey,
    ) -> EngineResult {
        self.record("set_network_key")?;
        self.state.lock().network_key = Some(*key);
        Ok(())
    }

    fn set_thread_enabled(
        &mut self,
        enabled: bool,
    ) -> EngineResult {
        let outcome = self.record("set_thread_enabled");
        {
            let mut s = self.state.lock();
            s.enable_calls.push(enabled);
            outcome?;
            if s.enabled == enabled {
                return if enabled { Ok(()) } else { Err(EngineError::InvalidState) };
            }
            s.enabled = enabled;
            s.queued_changes.push(ChangedFlags::THREAD_ROLE | ChangedFlags::THREAD_NETIF_STATE);
        }
        self.raise_pending();
        Ok(())
    }

    fn joiner_start(
        &mut self,
        params: &JoinerParams,
        on_complete: JoinCompleteHandler,
    ) -> EngineResult {
        self.record("joiner_start")?;
        self.state.lock().join_calls.push(params.clone());
        self.join_handler = Some(on_complete);
        Ok(())
    }

    fn set_state_changed_callback(
        &mut self,
        handler: StateChangedHandler,
    ) -> EngineResult {
        self.record("set_state_changed_callback")?;
        self.state.lock().has_state_callback = true;
        self.state_handler = Some(handler);
        Ok(())
    }

    fn set_receive_filter_enabled(
        &mut self,
        enabled: bool,
    ) {
        self.state.lock().receive_filter = enabled;
    }

    fn set_receive_callback(
        &mut self,
        handler: ReceiveHandler,
    ) {
        self.state.lock().has_receive_callback = true;
        self.receive = Some(handler);
    }

    fn set_nat64_cidr(
        &mut self,
        cidr: &Ipv4Cidr,
    ) -> EngineResult {
        self.record("set_nat64_cidr")?;
        self.state.lock().nat64_cidr = Some(*cidr);
        Ok(())
    }

    fn set_nat64_receive_callback(
        &mut self,
        _handler: ReceiveHandler,
    ) {
        self.state.lock().has_nat64_callback = true;
    }

    fn init_ncp(
        &mut self,
        send: NcpSendFn,
    ) {
        self.state.lock().ncp_initialized = true;
        self.ncp_send = Some(send);
    }
}

impl FakeEngine {
    /// Hands a datagram to the installed receive handler, as the engine does
    /// when a frame arrives from the mesh.
    pub fn deliver(
        &self,
        message: Message,
    ) -> bool {
        match &self.receive {
            Some(handler) => {
                handler(message);
                true
            }
            None => false,
        }
    }

    /// Pushes a frame through the coprocessor sink. Returns bytes accepted.
    pub fn ncp_transmit(
        &mut self,
        frame: &[u8],
    ) -> usize {
        match self.ncp_send.as_mut() {
            Some(send) => send(frame),
            None => 0,
        }
    }
}
