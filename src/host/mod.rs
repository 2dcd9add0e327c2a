//! The engine host: one explicitly constructed context that owns the engine,
//! its gate, the subscriber registry and the worker.
//!
//! ## Lifecycle
//! 1. [`HostBuilder::build`] validates configuration and assembles an
//!    [`OtHost`]
//! 2. [`OtHost::init`] wires the engine callbacks and starts the worker
//! 3. [`OtHost::start_network`] runs the bring-up sequence
//!
//! ## Example
//! ```ignore
//! let signal = WorkSignal::new();
//! let engine = PlatformEngine::new(signal.clone());
//! let host = HostBuilder::new(Box::new(engine))
//!     .config(HostConfig::new()?.validate()?)
//!     .work_signal(signal)
//!     .build()?;
//! host.init(Some(rx_handler))?;
//! host.start_network()?;
//! ```
mod bring_up;
mod builder;
mod host;

pub use bring_up::*;
pub use builder::*;
pub use host::*;
