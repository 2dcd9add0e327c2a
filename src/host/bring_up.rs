//! Network bring-up.
//!
//! Decision order, all under the gate:
//! 1. Commissioned: skip configuration, enable
//! 2. Auto-join: start the joiner and return; enabling happens later in the
//!    join completion, on the worker
//! 3. Otherwise: apply the default dataset field by field, then enable
//!
//! Nothing here retries. A failure after fields were applied leaves them
//! applied.

use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::info;

use super::OtHost;
use crate::BringUpError;
use crate::DatasetField;
use crate::Engine;
use crate::EngineError;
use crate::EngineResult;
use crate::ExtendedPanId;
use crate::JoinCompleteHandler;
use crate::NetworkConfig;
use crate::NetworkKey;
use crate::Result;

/// Successful bring-up outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUp {
    /// A stored dataset was found; configuration skipped, network enabled
    AlreadyCommissioned,
    /// Joiner started; the network is enabled once the join completes
    JoinStarted,
    /// Default dataset applied and network enabled
    DefaultConfigured,
}

/// Result of an asynchronous join, as seen by the join observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Joined and the network was enabled
    Enabled,
    /// Joined, but enabling the network failed. Not retried.
    EnableFailed(EngineError),
    /// The join itself failed. The network stays disabled.
    Failed(EngineError),
}

pub type JoinObserver = Arc<dyn Fn(JoinOutcome) + Send + Sync>;

impl OtHost {
    /// Runs the bring-up sequence once. Blocks for the duration of the
    /// configuration and enable calls, but never waits for a join.
    pub fn start_network(&self) -> Result<BringUp> {
        let mut engine = self.gate.lock();

        let outcome = if engine.is_commissioned() {
            debug!("already commissioned");
            BringUp::AlreadyCommissioned
        } else if self.config.joiner.auto_start {
            debug!("Starting join procedure");
            let params = self.config.joiner.params();
            engine
                .joiner_start(&params, join_completion(self.join_observer.clone()))
                .map_err(|e| {
                    error!("Failed to start joiner [{}]", e);
                    BringUpError::JoinStart(e)
                })?;
            return Ok(BringUp::JoinStarted);
        } else {
            debug!("Loading default configuration");
            apply_default_dataset(&mut *engine, &self.config.network)?;
            BringUp::DefaultConfigured
        };

        let name = engine.network_name();
        info!("Network name: {}", name);

        engine.set_thread_enabled(true).map_err(|e| {
            error!("Failed to start the network [{}]", e);
            BringUpError::Enable(e)
        })?;

        Ok(outcome)
    }
}

/// Sets name, channel, PAN ID, extended PAN ID and (when configured) the
/// network key, in that order. Stops at the first rejected field.
pub(crate) fn apply_default_dataset(
    engine: &mut dyn Engine,
    network: &NetworkConfig,
) -> std::result::Result<(), BringUpError> {
    engine
        .set_network_name(&network.name)
        .map_err(rejected(DatasetField::NetworkName))?;
    engine
        .set_channel(network.channel)
        .map_err(rejected(DatasetField::Channel))?;
    engine
        .set_pan_id(network.pan_id)
        .map_err(rejected(DatasetField::PanId))?;

    let ext_pan_id: ExtendedPanId = network
        .ext_pan_id
        .parse()
        .map_err(|e| malformed(DatasetField::ExtendedPanId, e))?;
    engine
        .set_extended_pan_id(&ext_pan_id)
        .map_err(rejected(DatasetField::ExtendedPanId))?;

    if network.has_network_key() {
        let key: NetworkKey = network
            .network_key
            .parse()
            .map_err(|e| malformed(DatasetField::NetworkKey, e))?;
        engine
            .set_network_key(&key)
            .map_err(rejected(DatasetField::NetworkKey))?;
    }

    Ok(())
}

fn rejected(field: DatasetField) -> impl FnOnce(EngineError) -> BringUpError {
    move |source| {
        error!("Failed to set {} [{}]", field, source);
        BringUpError::FieldRejected { field, source }
    }
}

fn malformed(
    field: DatasetField,
    reason: impl ToString,
) -> BringUpError {
    let reason = reason.to_string();
    error!("Malformed {}: {}", field, reason);
    BringUpError::InvalidField { field, reason }
}

/// Completion handed to the joiner. Runs on the worker with the gate held.
/// A panicking observer is logged and does not take the worker down.
pub(crate) fn join_completion(observer: Option<JoinObserver>) -> JoinCompleteHandler {
    Box::new(move |result: EngineResult, engine: &mut dyn Engine| {
        let outcome = match result {
            Ok(()) => {
                info!("Join success");
                match engine.set_thread_enabled(true) {
                    Ok(()) => JoinOutcome::Enabled,
                    Err(e) => {
                        error!("Failed to start the network [{}]", e);
                        JoinOutcome::EnableFailed(e)
                    }
                }
            }
            Err(e) => {
                error!("Join failed [{}]", e);
                JoinOutcome::Failed(e)
            }
        };

        if let Some(observer) = &observer {
            if panic::catch_unwind(AssertUnwindSafe(|| observer(outcome))).is_err() {
                error!("join observer panicked on {:?}", outcome);
            }
        }
    })
}
