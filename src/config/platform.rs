use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Ipv4Cidr;
use crate::Result;

/// How the engine is exposed to the rest of the system
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlatformMode {
    /// Engine feeds the local IPv6 stack through the receive callback
    #[default]
    Host,
    /// Engine is driven by an external host over an HDLC-framed transport
    Coprocessor,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PlatformConfig {
    #[serde(default)]
    pub mode: PlatformMode,

    /// IPv4 CIDR for the NAT64 translator, e.g. `192.168.255.0/24`.
    /// Empty disables NAT64 setup.
    #[serde(default)]
    pub nat64_cidr: String,
}

impl PlatformConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.mode == PlatformMode::Coprocessor && !self.nat64_cidr.is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "nat64_cidr is only used in host mode".into(),
            )));
        }

        Ok(())
    }

    pub fn nat64_enabled(&self) -> bool {
        !self.nat64_cidr.trim().is_empty()
    }

    /// Parsed NAT64 prefix. Parsing is deferred to initialization so a bad
    /// value surfaces as an init failure.
    pub fn nat64_cidr(&self) -> Option<std::result::Result<Ipv4Cidr, crate::convert::ConvertError>> {
        self.nat64_enabled().then(|| self.nat64_cidr.parse())
    }
}
