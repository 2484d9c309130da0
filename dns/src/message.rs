use bytes::BytesMut;
use domain_name_query_types::QType;
use std::io::Cursor;

use crate::header::Header;
use crate::question::Question;
use crate::resource_record::{RData, ResourceRecord};
use crate::DnsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    pub fn query(id: u16, flags: u16, domain: &str, qtype: QType) -> Self {
        Self {
            header: Header::new(id, flags),
            questions: vec![Question::new(domain, qtype)],
            answers: vec![],
            authorities: vec![],
            additionals: vec![],
        }
    }

    /// Encodes the message. Header counts always follow the list lengths,
    /// whatever the stored header says.
    pub fn to_bytes(&self, bytes: &mut BytesMut) -> Result<(), DnsError> {
        let header = self.header.with_counts(
            count(&self.questions)?,
            count(&self.answers)?,
            count(&self.authorities)?,
            count(&self.additionals)?,
        );
        header.to_bytes(bytes);

        for question in &self.questions {
            question.to_bytes(bytes)?;
        }
        for record in self.records() {
            record.to_bytes(bytes)?;
        }

        Ok(())
    }

    // 解析 DNS 的响应
    pub fn parse(message: &[u8]) -> Result<Self, DnsError> {
        let mut reader = Cursor::new(message);

        let header = Header::parse_from_reader(&mut reader)?;
        log::trace!("header: {:?}", header);

        // counts are taken as given; a lying header surfaces as Truncated.
        // Sections grow as records actually parse, never sized from the header.
        let mut questions: Vec<Question> = Vec::new();
        for _ in 0..header.qd_count() {
            questions.push(Question::parse_from_reader(&mut reader)?);
        }
        let answers = parse_records(&mut reader, header.answer_count())?;
        let authorities = parse_records(&mut reader, header.authority_count())?;
        let additionals = parse_records(&mut reader, header.additional_count())?;

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Payload of the first answer whose type is `qtype`.
    pub fn answer(&self, qtype: QType) -> Option<&RData> {
        self.answers
            .iter()
            .find(|r| r.rtype == qtype)
            .map(|r| &r.rdata)
    }

    /// Address of the first A record in the additional section.
    pub fn glue_address(&self) -> Option<std::net::Ipv4Addr> {
        self.additionals.iter().find_map(|r| match r.rdata {
            RData::A(addr) => Some(addr),
            _ => None,
        })
    }

    /// Host name from the first NS record in the authority section.
    pub fn referral(&self) -> Option<&str> {
        self.authorities.iter().find_map(|r| match &r.rdata {
            RData::Ns(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
    }
}

fn count<T>(items: &[T]) -> Result<u16, DnsError> {
    u16::try_from(items.len()).map_err(|_| DnsError::TooManyRecords(items.len()))
}

fn parse_records(rdr: &mut Cursor<&[u8]>, count: u16) -> Result<Vec<ResourceRecord>, DnsError> {
    let mut records: Vec<ResourceRecord> = Vec::new();
    for _ in 0..count {
        records.push(ResourceRecord::parse_from_reader(rdr)?);
    }

    Ok(records)
}
