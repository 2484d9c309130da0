use byteorder::{ReadBytesExt, BE};
use bytes::BufMut;
use std::io::Cursor;

use crate::DnsError;

/// rd = 1 asks the server to do the recursion for us
pub const RECURSION_DESIRED: u16 = 1 << 8;

// 12 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    id: u16,
    flags: u16,
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl Header {
    pub fn new(id: u16, flags: u16) -> Self {
        Self {
            id,
            flags,
            qdcount: 0,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub(crate) fn with_counts(
        self,
        qdcount: u16,
        ancount: u16,
        nscount: u16,
        arcount: u16,
    ) -> Self {
        Self {
            qdcount,
            ancount,
            nscount,
            arcount,
            ..self
        }
    }

    pub fn to_bytes(&self, bytes: &mut impl BufMut) {
        bytes.put_u16(self.id);
        bytes.put_u16(self.flags);
        bytes.put_u16(self.qdcount);
        bytes.put_u16(self.ancount);
        bytes.put_u16(self.nscount);
        bytes.put_u16(self.arcount);
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, DnsError> {
        let id = rdr.read_u16::<BE>()?;
        let flags = rdr.read_u16::<BE>()?;
        let qdcount = rdr.read_u16::<BE>()?;
        let ancount = rdr.read_u16::<BE>()?;
        let nscount = rdr.read_u16::<BE>()?;
        let arcount = rdr.read_u16::<BE>()?;

        Ok(Self {
            id,
            flags,
            qdcount,
            ancount,
            nscount,
            arcount,
        })
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & RECURSION_DESIRED != 0
    }

    pub fn qd_count(&self) -> u16 {
        self.qdcount
    }

    pub fn answer_count(&self) -> u16 {
        self.ancount
    }

    pub fn authority_count(&self) -> u16 {
        self.nscount
    }

    pub fn additional_count(&self) -> u16 {
        self.arcount
    }
}
