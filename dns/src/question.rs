use byteorder::{ReadBytesExt, BE};
use bytes::BufMut;
use domain_name_query_types::{QType, CLASS_IN};
use std::io::Cursor;

use crate::name::{encode_name, read_name};
use crate::DnsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: QType,
    pub qclass: u16,
}

impl Question {
    pub fn new(domain: &str, qtype: QType) -> Self {
        Self {
            name: domain.to_string(),
            qtype,
            qclass: CLASS_IN,
        }
    }

    pub fn to_bytes(&self, bytes: &mut impl BufMut) -> Result<(), DnsError> {
        encode_name(&self.name, bytes)?;
        bytes.put_u16(self.qtype.code());
        bytes.put_u16(self.qclass);

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, DnsError> {
        let name = read_name(rdr)?;
        let qtype = QType::from(rdr.read_u16::<BE>()?);
        let qclass = rdr.read_u16::<BE>()?;

        Ok(Self { name, qtype, qclass })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bytes_test() {
        let mut bytes: Vec<u8> = vec![];
        Question::new("baidu.com", QType::A).to_bytes(&mut bytes).unwrap();

        let expected = [
            5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0, // qname
            0, 1, // qtype
            0, 1, // qclass
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn parse_test() {
        let bytes: &[u8] = &[3, b'c', b'o', b'm', 0, 0, 2, 0, 1];
        let mut rdr = Cursor::new(bytes);
        let q = Question::parse_from_reader(&mut rdr).unwrap();

        assert_eq!(q, Question::new("com", QType::Ns));
        assert_eq!(rdr.position(), 9);
    }

    #[test]
    fn missing_class_is_truncated() {
        let bytes: &[u8] = &[3, b'c', b'o', b'm', 0, 0, 2];
        let err = Question::parse_from_reader(&mut Cursor::new(bytes)).unwrap_err();
        assert_eq!(err, DnsError::Truncated);
    }
}
