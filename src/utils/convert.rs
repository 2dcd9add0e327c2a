/// Error type for value conversion operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// More bytes were supplied than the destination holds
    #[error("invalid byte length: expected at most {expected} bytes, received {received} bytes")]
    InvalidLength { expected: usize, received: usize },

    /// Generic conversion failure with detailed message
    #[error("conversion failure: {0}")]
    ConversionFailure(String),
}

/// Parses a hex string into a fixed-width byte array.
///
/// Accepts either contiguous hex (`"dead00beef00cafe"`) or colon-separated
/// byte groups (`"de:ad:00:be:ef:00:ca:fe"`, groups of one or two digits).
/// Missing trailing bytes are zero-filled; surplus bytes are rejected.
///
/// # Examples
/// ```
/// use ot_host::convert::parse_hex_bytes;
///
/// assert_eq!(parse_hex_bytes::<4>("de:ad:be").unwrap(), [0xde, 0xad, 0xbe, 0x00]);
/// assert_eq!(parse_hex_bytes::<2>("cafe").unwrap(), [0xca, 0xfe]);
/// ```
pub fn parse_hex_bytes<const N: usize>(s: &str) -> Result<[u8; N], ConvertError> {
    let s = s.trim();
    let bytes = if s.contains(':') {
        s.split(':')
            .map(|group| {
                if group.is_empty() || group.len() > 2 {
                    return Err(ConvertError::ConversionFailure(format!("bad byte group {group:?}")));
                }
                u8::from_str_radix(group, 16)
                    .map_err(|e| ConvertError::ConversionFailure(format!("bad byte group {group:?}: {e}")))
            })
            .collect::<Result<Vec<u8>, _>>()?
    } else {
        hex::decode(s).map_err(|e| ConvertError::ConversionFailure(e.to_string()))?
    };

    if bytes.len() > N {
        return Err(ConvertError::InvalidLength {
            expected: N,
            received: bytes.len(),
        });
    }

    let mut out = [0u8; N];
    out[..bytes.len()].copy_from_slice(&bytes);
    Ok(out)
}
