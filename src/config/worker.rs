use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WorkerConfig {
    #[serde(default = "default_thread_name")]
    pub thread_name: String,

    /// Stack size of the worker thread in bytes
    #[serde(default = "default_stack_size")]
    pub stack_size: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: default_thread_name(),
            stack_size: default_stack_size(),
        }
    }
}

impl WorkerConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.thread_name.is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "worker thread_name cannot be empty".into(),
            )));
        }

        if self.stack_size < MIN_STACK_SIZE {
            return Err(Error::Config(ConfigError::Message(format!(
                "worker stack_size {} below minimum {}",
                self.stack_size, MIN_STACK_SIZE
            ))));
        }

        Ok(())
    }
}

const MIN_STACK_SIZE: usize = 16 * 1024;

fn default_thread_name() -> String {
    "openthread".into()
}
fn default_stack_size() -> usize {
    256 * 1024
}
