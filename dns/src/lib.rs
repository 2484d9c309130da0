//! DNS message codec, <https://datatracker.ietf.org/doc/html/rfc1035#section-4>

mod error;
mod header;
mod id_source;
mod message;
mod name;
mod question;
mod resource_record;

use bytes::{Bytes, BytesMut};
use domain_name_query_types::QType;

pub use error::DnsError;
pub use header::{Header, RECURSION_DESIRED};
pub use id_source::{FixedId, IdSource, RandomIds};
pub use message::Message;
pub use name::{encode_name, read_name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use question::Question;
pub use resource_record::{RData, ResourceRecord};

/// Builds a single-question query. `flags` is `0` for iterative lookups and
/// [`RECURSION_DESIRED`] when asking a recursive resolver.
pub fn encode_query<I: IdSource + ?Sized>(
    ids: &I,
    domain: &str,
    qtype: QType,
    flags: u16,
) -> Result<Bytes, DnsError> {
    let request_msg = Message::query(ids.next_id(), flags, domain, qtype);
    let mut request_bytes = BytesMut::with_capacity(32 + domain.len());
    request_msg.to_bytes(&mut request_bytes)?;

    Ok(request_bytes.freeze())
}

pub fn decode_message(bytes: &[u8]) -> Result<Message, DnsError> {
    Message::parse(bytes)
}
