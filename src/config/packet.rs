use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PacketConfig {
    /// Capacity of the packet list ring
    #[serde(default = "default_list_size")]
    pub list_size: usize,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            list_size: default_list_size(),
        }
    }
}

impl PacketConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.list_size == 0 {
            return Err(Error::Config(ConfigError::Message(
                "packet list_size must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}

fn default_list_size() -> usize {
    10
}
