//! Byte transport used in coprocessor mode (UART or similar).

#[cfg(test)]
use mockall::automock;
use tracing::warn;

use super::EngineResult;

#[cfg_attr(test, automock)]
pub trait Transport: Send + Sync + 'static {
    fn enable(&self) -> EngineResult;

    fn send(
        &self,
        buf: &[u8],
    ) -> EngineResult;
}

/// Pushes one HDLC frame to the transport. Returns the frame length when the
/// transport accepted it, `0` otherwise.
pub(crate) fn hdlc_send(
    transport: &dyn Transport,
    buf: &[u8],
) -> usize {
    match transport.send(buf) {
        Ok(()) => buf.len(),
        Err(e) => {
            warn!("transport send of {} bytes failed: {}", buf.len(), e);
            0
        }
    }
}
