//! Error hierarchy for the engine host.
//!
//! Errors are grouped by the layer that raises them: argument checks on the
//! public surface, the subscriber registry, the gate, the engine itself, the
//! bring-up sequence and one-time initialization.

use config::ConfigError;

use crate::DatasetField;
use crate::EngineError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or malformed input on a public call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Subscriber registration failures
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Non-blocking gate acquisition found the gate held
    #[error("Gate is held by another context")]
    LockUnavailable,

    /// The engine rejected an operation outside of bring-up
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Network bring-up failures
    #[error(transparent)]
    BringUp(#[from] BringUpError),

    /// One-time initialization failures
    #[error(transparent)]
    Init(#[from] InitError),

    /// The packet list has no free slot
    #[error("Packet list is full")]
    PacketRingFull,

    /// Configuration loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The subscriber address is already a member
    #[error("Subscriber already registered")]
    AlreadyRegistered,

    /// The subscriber address is not a member (never added or already removed)
    #[error("Subscriber not registered")]
    NotRegistered,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BringUpError {
    #[error("Failed to start joiner: {0}")]
    JoinStart(EngineError),

    #[error("Failed to set {field}: {source}")]
    FieldRejected {
        field: DatasetField,
        source: EngineError,
    },

    #[error("Malformed {field} value: {reason}")]
    InvalidField { field: DatasetField, reason: String },

    #[error("Failed to start the network: {0}")]
    Enable(EngineError),
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Failed to parse NAT64 CIDR {cidr:?}: {reason}")]
    Nat64CidrParse { cidr: String, reason: String },

    #[error("Incorrect NAT64 CIDR: {0}")]
    Nat64CidrRejected(EngineError),

    #[error("Could not set state changed callback: {0}")]
    StateCallback(EngineError),

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

impl Error {
    /// Returns the bring-up failure, if this error is one
    pub fn as_bring_up(&self) -> Option<&BringUpError> {
        match self {
            Error::BringUp(e) => Some(e),
            _ => None,
        }
    }
}
