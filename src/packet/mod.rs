//! Bounded receive-path packet list.
mod ring;
pub use ring::*;
