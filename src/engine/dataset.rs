use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::utils::convert::parse_hex_bytes;
use crate::utils::convert::ConvertError;

pub const EXT_PAN_ID_SIZE: usize = 8;
pub const NETWORK_KEY_SIZE: usize = 16;
pub const NETWORK_NAME_MAX_SIZE: usize = 16;

/// Fields written by the default-dataset path, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetField {
    NetworkName,
    Channel,
    PanId,
    ExtendedPanId,
    NetworkKey,
}

impl fmt::Display for DatasetField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            DatasetField::NetworkName => "network name",
            DatasetField::Channel => "channel",
            DatasetField::PanId => "PAN ID",
            DatasetField::ExtendedPanId => "ext PAN ID",
            DatasetField::NetworkKey => "network key",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtendedPanId(pub [u8; EXT_PAN_ID_SIZE]);

impl FromStr for ExtendedPanId {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_bytes::<EXT_PAN_ID_SIZE>(s).map(Self)
    }
}

impl fmt::Display for ExtendedPanId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkKey(pub [u8; NETWORK_KEY_SIZE]);

impl FromStr for NetworkKey {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_bytes::<NETWORK_KEY_SIZE>(s).map(Self)
    }
}

// Key material stays out of logs.
impl fmt::Debug for NetworkKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("NetworkKey(..)")
    }
}

/// IPv4 prefix used by the NAT64 translator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Cidr {
    pub addr: Ipv4Addr,
    pub prefix_len: u8,
}

impl FromStr for Ipv4Cidr {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix_len) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| ConvertError::ConversionFailure(format!("missing prefix length in {s:?}")))?;

        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|e| ConvertError::ConversionFailure(format!("bad address {addr:?}: {e}")))?;
        let prefix_len: u8 = prefix_len
            .parse()
            .map_err(|e| ConvertError::ConversionFailure(format!("bad prefix length {prefix_len:?}: {e}")))?;

        if prefix_len > 32 {
            return Err(ConvertError::ConversionFailure(format!(
                "prefix length {prefix_len} exceeds 32"
            )));
        }

        Ok(Self { addr, prefix_len })
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}
