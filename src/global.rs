//! Process-wide default host.
//!
//! The engine is single-instance per process. Code that cannot be handed an
//! [`OtHost`] explicitly (an engine platform hook, for example) reaches it
//! through here once the application has installed it.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;
use tracing::warn;

use crate::OtHost;

static DEFAULT_HOST: OnceCell<Arc<OtHost>> = OnceCell::new();

/// Installs `host` as the process default. The first install wins; later
/// calls drop their argument and return the installed host.
pub fn install(host: OtHost) -> Arc<OtHost> {
    let mut installed_now = false;
    let host = DEFAULT_HOST
        .get_or_init(|| {
            installed_now = true;
            Arc::new(host)
        })
        .clone();

    if installed_now {
        info!("default host installed");
    } else {
        warn!("default host already installed, keeping the existing one");
    }
    host
}

pub fn default_host() -> Option<Arc<OtHost>> {
    DEFAULT_HOST.get().cloned()
}
