use byteorder::{ReadBytesExt, BE};
use bytes::BufMut;
use std::io::{Cursor, Read};

use crate::DnsError;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0b1100_0000;

/// Writes `domain` as length-prefixed labels ending in a zero byte.
///
/// Names are never compressed on the way out. A single trailing dot is
/// accepted, and both `""` and `"."` encode the root name.
pub fn encode_name(domain: &str, bytes: &mut impl BufMut) -> Result<(), DnsError> {
    let invalid = |reason| DnsError::InvalidName {
        name: domain.to_string(),
        reason,
    };

    if !domain.is_ascii() {
        return Err(invalid("not ascii"));
    }

    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    let mut qname: Vec<u8> = Vec::with_capacity(trimmed.len() + 2);

    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(invalid("empty label"));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(invalid("label longer than 63 bytes"));
            }

            qname.push(label.len() as u8);
            qname.extend_from_slice(label.as_bytes());
        }
    }
    qname.push(0);

    if qname.len() > MAX_NAME_LEN {
        return Err(invalid("longer than 255 bytes"));
    }

    bytes.put_slice(&qname);
    Ok(())
}

/// Reads a possibly compressed name starting at the cursor's position.
///
/// When a compression pointer is followed the cursor is left directly after
/// the two pointer bytes, never inside the region pointed to.
pub fn read_name(rdr: &mut Cursor<&[u8]>) -> Result<String, DnsError> {
    let mut labels: Vec<String> = Vec::new();
    read_labels(rdr, &mut labels)?;

    Ok(labels.join("."))
}

fn read_labels(rdr: &mut Cursor<&[u8]>, labels: &mut Vec<String>) -> Result<(), DnsError> {
    let segment_start = rdr.position();

    loop {
        let len = rdr.read_u8()?;

        if len == 0 {
            return Ok(());
        }

        if len & POINTER_MASK == POINTER_MASK {
            rdr.set_position(rdr.position() - 1);
            let offset = rdr.read_u16::<BE>()? & !(u16::from(POINTER_MASK) << 8);

            // Every jump must land before the segment that holds the pointer,
            // so a chain of pointers always terminates.
            if u64::from(offset) >= segment_start {
                return Err(DnsError::BadPointer { offset });
            }
            log::trace!("following compression pointer to offset {}", offset);

            let resume_at = rdr.position();
            rdr.set_position(u64::from(offset));
            let result = read_labels(rdr, labels);
            rdr.set_position(resume_at);

            return result;
        }

        if usize::from(len) > MAX_LABEL_LEN {
            return Err(DnsError::BadLabel(len));
        }

        let mut label = vec![0u8; usize::from(len)];
        rdr.read_exact(&mut label)?;
        if !label.is_ascii() {
            return Err(DnsError::NonAsciiLabel);
        }
        labels.push(label.into_iter().map(char::from).collect());
    }
}
