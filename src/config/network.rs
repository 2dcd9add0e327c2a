use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::ExtendedPanId;
use crate::NetworkKey;
use crate::Result;
use crate::NETWORK_NAME_MAX_SIZE;

/// Default dataset applied when the engine holds no commissioned dataset
#[derive(Serialize, Deserialize, Clone)]
pub struct NetworkConfig {
    #[serde(default = "default_network_name")]
    pub name: String,

    /// IEEE 802.15.4 channel (11..=26)
    #[serde(default = "default_channel")]
    pub channel: u8,

    #[serde(default = "default_pan_id")]
    pub pan_id: u16,

    /// Hex, contiguous or colon-separated
    #[serde(default = "default_ext_pan_id")]
    pub ext_pan_id: String,

    /// Hex, contiguous or colon-separated. Empty leaves the engine's key untouched.
    #[serde(default = "default_network_key")]
    pub network_key: String,
}

impl std::fmt::Debug for NetworkConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("name", &self.name)
            .field("channel", &self.channel)
            .field("pan_id", &format_args!("{:#06x}", self.pan_id))
            .field("ext_pan_id", &self.ext_pan_id)
            .finish_non_exhaustive()
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: default_network_name(),
            channel: default_channel(),
            pan_id: default_pan_id(),
            ext_pan_id: default_ext_pan_id(),
            network_key: default_network_key(),
        }
    }
}

impl NetworkConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.name.len() > NETWORK_NAME_MAX_SIZE {
            return Err(Error::Config(ConfigError::Message(format!(
                "network name {:?} exceeds {} bytes",
                self.name, NETWORK_NAME_MAX_SIZE
            ))));
        }

        if !(MIN_CHANNEL..=MAX_CHANNEL).contains(&self.channel) {
            return Err(Error::Config(ConfigError::Message(format!(
                "channel {} out of range {}..={}",
                self.channel, MIN_CHANNEL, MAX_CHANNEL
            ))));
        }

        if self.pan_id == BROADCAST_PAN_ID {
            return Err(Error::Config(ConfigError::Message(
                "pan_id 0xffff is the broadcast PAN ID".into(),
            )));
        }

        self.ext_pan_id.parse::<ExtendedPanId>().map_err(|e| {
            Error::Config(ConfigError::Message(format!("ext_pan_id: {e}")))
        })?;

        if self.has_network_key() {
            self.network_key.parse::<NetworkKey>().map_err(|e| {
                Error::Config(ConfigError::Message(format!("network_key: {e}")))
            })?;
        }

        Ok(())
    }

    pub fn has_network_key(&self) -> bool {
        !self.network_key.is_empty()
    }
}

pub const MIN_CHANNEL: u8 = 11;
pub const MAX_CHANNEL: u8 = 26;
const BROADCAST_PAN_ID: u16 = 0xffff;

fn default_network_name() -> String {
    "ot_zephyr".into()
}
fn default_channel() -> u8 {
    11
}
fn default_pan_id() -> u16 {
    0xabcd
}
fn default_ext_pan_id() -> String {
    "de:ad:00:be:ef:00:ca:fe".into()
}
fn default_network_key() -> String {
    "00:11:22:33:44:55:66:77:88:99:aa:bb:cc:dd:ee:ff".into()
}
