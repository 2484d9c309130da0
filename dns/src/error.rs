use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("invalid domain name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("message truncated")]
    Truncated,

    #[error("malformed record of type {rtype}: rdata length {rdlength}")]
    MalformedRecord { rtype: u16, rdlength: u16 },

    #[error("compression pointer to offset {offset} does not point backwards")]
    BadPointer { offset: u16 },

    #[error("reserved label length byte {0:#04x}")]
    BadLabel(u8),

    #[error("label contains non-ascii bytes")]
    NonAsciiLabel,

    #[error("{0} entries do not fit a 16-bit section count")]
    TooManyRecords(usize),
}

// Decoding only ever reads from an in-memory cursor, where the single
// failure mode is running off the end of the buffer.
impl From<std::io::Error> for DnsError {
    fn from(_: std::io::Error) -> Self {
        DnsError::Truncated
    }
}
