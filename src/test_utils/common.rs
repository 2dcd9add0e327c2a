use std::thread;
use std::time::Duration;
use std::time::Instant;

use crate::Message;
use crate::ReceiveHandler;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    let _ = env_logger::builder().is_test(true).try_init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
    println!("setup logger for unit test.");
}

pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Polls `cond` until it holds or `timeout` elapses. Returns the last result.
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

/// Gives the worker time to run anything it still has scheduled
pub fn settle() {
    thread::sleep(Duration::from_millis(100));
}

pub fn noop_receive_handler() -> ReceiveHandler {
    std::sync::Arc::new(|_: Message| {})
}
