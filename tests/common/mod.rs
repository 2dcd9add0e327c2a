#![allow(dead_code)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use ot_host::ChangedFlags;
use ot_host::DeviceRole;
use ot_host::Engine;
use ot_host::EngineError;
use ot_host::EngineResult;
use ot_host::ExtendedPanId;
use ot_host::Ipv4Cidr;
use ot_host::JoinCompleteHandler;
use ot_host::JoinerParams;
use ot_host::Message;
use ot_host::NcpSendFn;
use ot_host::NetworkKey;
use ot_host::ReceiveHandler;
use ot_host::StateChangedHandler;
use ot_host::WorkSignal;
use parking_lot::Mutex;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    let _ = env_logger::builder().is_test(true).try_init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
    println!("setup logger for integration test.");
}

pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

pub fn wait_until<F>(
    timeout: Duration,
    cond: F,
) -> bool
where
    F: Fn() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

pub fn receive_into(sink: Arc<Mutex<Vec<Message>>>) -> ReceiveHandler {
    Arc::new(move |message: Message| sink.lock().push(message))
}

/// What a simulated engine has been told and what it will do next
#[derive(Default)]
pub struct SimState {
    pub commissioned: bool,
    pub enabled: bool,
    pub enable_calls: Vec<bool>,
    pub network_name: String,
    pub channel: Option<u8>,
    pub pan_id: Option<u16>,
    pub ext_pan_id: Option<ExtendedPanId>,
    pub network_key: Option<NetworkKey>,
    pub joiner: Option<JoinerParams>,
    /// Result the joiner reports on the next processing round
    pub join_result: Option<EngineResult>,
    pub join_pending: bool,
    pub changes: Vec<ChangedFlags>,
    /// Datagrams arriving from the mesh, handed up on the next round
    pub inbound: Vec<Vec<u8>>,
    pub rounds: usize,
}

/// In-process engine stand-in. Schedules its own work through the host's
/// signal, as an engine platform port does.
pub struct SimEngine {
    state: Arc<Mutex<SimState>>,
    signal: WorkSignal,
    on_state: Option<StateChangedHandler>,
    on_join: Option<JoinCompleteHandler>,
    receive: Option<ReceiveHandler>,
}

impl SimEngine {
    pub fn new(signal: WorkSignal) -> (Self, Arc<Mutex<SimState>>) {
        let state = Arc::new(Mutex::new(SimState::default()));
        let engine = Self {
            state: state.clone(),
            signal,
            on_state: None,
            on_join: None,
            receive: None,
        };
        (engine, state)
    }
}

impl Engine for SimEngine {
    fn tasklets_pending(&self) -> bool {
        let s = self.state.lock();
        s.join_pending || !s.changes.is_empty() || !s.inbound.is_empty()
    }

    fn process_tasklets(&mut self) {
        let (join, changes, inbound) = {
            let mut s = self.state.lock();
            s.rounds += 1;
            let join = if s.join_pending {
                s.join_pending = false;
                s.join_result.take()
            } else {
                None
            };
            (join, std::mem::take(&mut s.changes), std::mem::take(&mut s.inbound))
        };

        if let Some(receive) = &self.receive {
            for payload in inbound {
                receive(Message::new(payload));
            }
        }

        if let Some(result) = join {
            if let Some(on_join) = self.on_join.take() {
                on_join(result, self);
            }
        }
        if let Some(mut on_state) = self.on_state.take() {
            for flags in changes {
                on_state(flags, &*self);
            }
            self.on_state = Some(on_state);
        }
    }

    fn process_drivers(&mut self) {}

    fn is_commissioned(&self) -> bool {
        self.state.lock().commissioned
    }

    fn device_role(&self) -> DeviceRole {
        if self.state.lock().enabled {
            DeviceRole::Child
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
        self.state.lock().network_name = name.to_string();
        Ok(())
    }

    fn set_channel(
        &mut self,
        channel: u8,
    ) -> EngineResult {
        self.state.lock().channel = Some(channel);
        Ok(())
    }

    fn set_pan_id(
        &mut self,
        pan_id: u16,
    ) -> EngineResult {
        self.state.lock().pan_id = Some(pan_id);
        Ok(())
    }

    fn set_extended_pan_id(
        &mut self,
        ext_pan_id: &ExtendedPanId,
    ) -> EngineResult {
        self.state.lock().ext_pan_id = Some(*ext_pan_id);
        Ok(())
    }

    fn set_network_key(
        &mut self,
        key: &NetworkKey,
    ) -> EngineResult {
        self.state.lock().network_key = Some(*key);
        Ok(())
    }

    fn set_thread_enabled(
        &mut self,
        enabled: bool,
    ) -> EngineResult {
        {
            let mut s = self.state.lock();
            s.enable_calls.push(enabled);
            if s.enabled == enabled {
                return if enabled { Ok(()) } else { Err(EngineError::InvalidState) };
            }
            s.enabled = enabled;
            s.changes.push(ChangedFlags::THREAD_ROLE | ChangedFlags::IP6_ADDRESS_ADDED);
        }
        self.signal.signal();
        Ok(())
    }

    fn joiner_start(
        &mut self,
        params: &JoinerParams,
        on_complete: JoinCompleteHandler,
    ) -> EngineResult {
        {
            let mut s = self.state.lock();
            if s.join_pending {
                return Err(EngineError::Busy);
            }
            s.joiner = Some(params.clone());
            s.join_pending = true;
        }
        self.on_join = Some(on_complete);
        self.signal.signal();
        Ok(())
    }

    fn set_state_changed_callback(
        &mut self,
        handler: StateChangedHandler,
    ) -> EngineResult {
        self.on_state = Some(handler);
        Ok(())
    }

    fn set_receive_filter_enabled(
        &mut self,
        _enabled: bool,
    ) {
    }

    fn set_receive_callback(
        &mut self,
        handler: ReceiveHandler,
    ) {
        self.receive = Some(handler);
    }

    fn set_nat64_cidr(
        &mut self,
        _cidr: &Ipv4Cidr,
    ) -> EngineResult {
        Ok(())
    }

    fn set_nat64_receive_callback(
        &mut self,
        _handler: ReceiveHandler,
    ) {
    }

    fn init_ncp(
        &mut self,
        _send: NcpSendFn,
    ) {
    }
}
