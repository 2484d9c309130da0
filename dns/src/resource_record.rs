use byteorder::{ReadBytesExt, BE};
use bytes::BufMut;
use domain_name_query_types::{QType, CLASS_IN, TYPE_A};
use std::fmt;
use std::io::{Cursor, Read};
use std::net::Ipv4Addr;

use crate::name::{encode_name, read_name};
use crate::DnsError;

/// Record payload, interpreted according to the record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Ns(String),
    Other(Vec<u8>),
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RData::A(addr) => write!(f, "{}", addr),
            RData::Ns(name) => write!(f, "{}", name),
            RData::Other(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: QType,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn a(name: &str, ttl: u32, addr: Ipv4Addr) -> Self {
        Self {
            name: name.to_string(),
            rtype: QType::A,
            rclass: CLASS_IN,
            ttl,
            rdata: RData::A(addr),
        }
    }

    pub fn ns(name: &str, ttl: u32, nameserver: &str) -> Self {
        Self {
            name: name.to_string(),
            rtype: QType::Ns,
            rclass: CLASS_IN,
            ttl,
            rdata: RData::Ns(nameserver.to_string()),
        }
    }

    /// Writes the record uncompressed, rdlength included.
    pub fn to_bytes(&self, bytes: &mut impl BufMut) -> Result<(), DnsError> {
        encode_name(&self.name, bytes)?;
        bytes.put_u16(self.rtype.code());
        bytes.put_u16(self.rclass);
        bytes.put_u32(self.ttl);

        let mut rdata: Vec<u8> = Vec::new();
        match &self.rdata {
            RData::A(addr) => rdata.extend_from_slice(&addr.octets()),
            RData::Ns(name) => encode_name(name, &mut rdata)?,
            RData::Other(raw) => rdata.extend_from_slice(raw),
        }

        let rdlength = u16::try_from(rdata.len()).map_err(|_| DnsError::MalformedRecord {
            rtype: self.rtype.code(),
            rdlength: u16::MAX,
        })?;
        bytes.put_u16(rdlength);
        bytes.put_slice(&rdata);

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, DnsError> {
        let name = read_name(rdr)?;
        let rtype = QType::from(rdr.read_u16::<BE>()?);
        let rclass = rdr.read_u16::<BE>()?;
        let ttl = rdr.read_u32::<BE>()?;
        let rdlength = rdr.read_u16::<BE>()?;

        let rdata = match rtype {
            QType::A => {
                if rdlength != 4 {
                    return Err(DnsError::MalformedRecord {
                        rtype: TYPE_A,
                        rdlength,
                    });
                }
                let mut octets = [0u8; 4];
                rdr.read_exact(&mut octets)?;
                RData::A(Ipv4Addr::from(octets))
            }
            // The name is self-delimiting; rdlength does not bound it.
            QType::Ns => RData::Ns(read_name(rdr)?),
            QType::Other(_) => {
                let mut raw = vec![0u8; usize::from(rdlength)];
                rdr.read_exact(&mut raw)?;
                RData::Other(raw)
            }
        };

        Ok(Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8]) -> Result<ResourceRecord, DnsError> {
        ResourceRecord::parse_from_reader(&mut Cursor::new(bytes))
    }

    #[test]
    fn a_record_renders_dotted_decimal() {
        let bytes: &[u8] = &[
            3, b'd', b'n', b's', 0, // name
            0, 1, 0, 1, // type, class
            0, 0, 0x0e, 0x10, // ttl
            0, 4, 8, 8, 8, 8, // rdata
        ];
        let record = parse(bytes).unwrap();

        assert_eq!(record.rtype, QType::A);
        assert_eq!(record.ttl, 3600);
        assert_eq!(record.rdata.to_string(), "8.8.8.8");
        assert_eq!(record, ResourceRecord::a("dns", 3600, Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[test]
    fn a_record_with_wrong_length() {
        let bytes: &[u8] = &[0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 5, 1, 2, 3, 4, 5];
        assert_eq!(
            parse(bytes),
            Err(DnsError::MalformedRecord {
                rtype: 1,
                rdlength: 5
            })
        );
    }

    #[test]
    fn ns_record_with_compressed_target() {
        let bytes: &[u8] = &[
            3, b'c', b'o', b'm', 0, // offset 0: "com"
            0xc0, 0, // owner: pointer to "com"
            0, 2, 0, 1, 0, 2, 0xa3, 0, // type NS, class IN, ttl 172800
            0, 5, // rdlength
            1, b'a', 0xc0, 0, // "a" + pointer to "com"
            0xff, // next record would start here
        ];
        let mut rdr = Cursor::new(bytes);
        rdr.set_position(5);
        let record = ResourceRecord::parse_from_reader(&mut rdr).unwrap();

        assert_eq!(record.name, "com");
        assert_eq!(record.rdata, RData::Ns("a.com".to_string()));
        assert_eq!(record.ttl, 172800);
        // the cursor follows the name, not the declared rdlength
        assert_eq!(rdr.position(), 21);
    }

    #[test]
    fn other_types_are_opaque() {
        let bytes: &[u8] = &[0, 0, 16, 0, 1, 0, 0, 0, 60, 0, 3, 2, b'h', b'i'];
        let record = parse(bytes).unwrap();

        assert_eq!(record.rtype, QType::Other(16));
        assert_eq!(record.rdata, RData::Other(vec![2, b'h', b'i']));
        assert_eq!(record.rdata.to_string(), "026869");
    }

    #[test]
    fn short_rdata_is_truncated() {
        let bytes: &[u8] = &[0, 0, 16, 0, 1, 0, 0, 0, 60, 0, 3, 2];
        assert_eq!(parse(bytes), Err(DnsError::Truncated));
    }

    #[test]
    fn to_bytes_writes_rdlength() {
        let mut bytes: Vec<u8> = vec![];
        ResourceRecord::ns("com", 60, "a.gtld-servers.net")
            .to_bytes(&mut bytes)
            .unwrap();

        let rdata_start = 5 + 10;
        let rdlength = u16::from_be_bytes([bytes[rdata_start - 2], bytes[rdata_start - 1]]);
        assert_eq!(usize::from(rdlength), bytes.len() - rdata_start);
        assert_eq!(parse(&bytes).unwrap().rdata, RData::Ns("a.gtld-servers.net".into()));
    }
}
