use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::JoinerParams;
use crate::Result;

/// Joiner policy and the data presented to the commissioner
#[derive(Serialize, Deserialize, Clone)]
pub struct JoinerConfig {
    /// Start the joiner automatically when no dataset is commissioned
    #[serde(default)]
    pub auto_start: bool,

    /// Pre-shared device credential
    #[serde(default = "default_pskd")]
    pub pskd: String,

    #[serde(default = "default_vendor_name")]
    pub vendor_name: String,

    #[serde(default)]
    pub platform_info: String,

    #[serde(default = "default_vendor_sw_version")]
    pub vendor_sw_version: String,
}

impl std::fmt::Debug for JoinerConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("JoinerConfig")
            .field("auto_start", &self.auto_start)
            .field("vendor_name", &self.vendor_name)
            .field("platform_info", &self.platform_info)
            .field("vendor_sw_version", &self.vendor_sw_version)
            .finish_non_exhaustive()
    }
}

impl Default for JoinerConfig {
    fn default() -> Self {
        Self {
            auto_start: false,
            pskd: default_pskd(),
            vendor_name: default_vendor_name(),
            platform_info: String::new(),
            vendor_sw_version: default_vendor_sw_version(),
        }
    }
}

impl JoinerConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if !self.auto_start {
            return Ok(());
        }

        // PSKd: 6..=32 chars of uppercase alphanumerics, excluding I, O, Q, Z
        let len_ok = (PSKD_MIN_LEN..=PSKD_MAX_LEN).contains(&self.pskd.len());
        let chars_ok = self
            .pskd
            .chars()
            .all(|c| (c.is_ascii_uppercase() || c.is_ascii_digit()) && !matches!(c, 'I' | 'O' | 'Q' | 'Z'));
        if !len_ok || !chars_ok {
            return Err(Error::Config(ConfigError::Message(
                "pskd must be 6-32 uppercase alphanumerics without I, O, Q or Z".into(),
            )));
        }

        Ok(())
    }

    pub fn params(&self) -> JoinerParams {
        JoinerParams {
            pskd: self.pskd.clone(),
            provisioning_url: None,
            vendor_name: self.vendor_name.clone(),
            vendor_model: self.platform_info.clone(),
            vendor_sw_version: self.vendor_sw_version.clone(),
            vendor_data: None,
        }
    }
}

const PSKD_MIN_LEN: usize = 6;
const PSKD_MAX_LEN: usize = 32;

fn default_pskd() -> String {
    "J01NME".into()
}
fn default_vendor_name() -> String {
    "Zephyr".into()
}
fn default_vendor_sw_version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
