//! Shared helpers for unit tests.
//!
//! Two flavours of engine double are used across the tests:
//! - [`MockEngine`](crate::MockEngine), generated by [mockall], for exact
//!   call-order and call-count checks
//! - [`FakeEngine`], a small in-memory engine that behaves like the real one
//!   (queues work, raises state changes, completes joins) for tests that run
//!   the real worker thread
//!
//! [mockall]: https://docs.rs/mockall/latest/mockall/
mod common;
mod fake_engine;

pub use common::*;
pub use fake_engine::*;
