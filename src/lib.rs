mod config;
mod engine;
mod errors;
mod gate;
mod host;
mod packet;
mod registry;
mod worker;
pub mod global;
pub mod utils;

pub use config::*;
pub use engine::*;
pub use errors::*;
pub use gate::*;
pub use host::*;
pub use packet::*;
pub use registry::*;
pub use utils::*;
pub use worker::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
//-----------------------------------------------------------
