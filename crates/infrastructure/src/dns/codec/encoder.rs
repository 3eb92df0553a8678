use super::{
    FLAG_AUTHORITATIVE, FLAG_RECURSION_AVAILABLE, FLAG_RECURSION_DESIRED, FLAG_RESPONSE,
    FLAG_TRUNCATED, HEADER_LEN, MAX_LABEL_LEN, MAX_NAME_WIRE_LEN, MAX_UDP_MESSAGE_SIZE,
};
use dnsfilter_domain::{DnsHeader, DnsMessage, DomainError, DomainName};
use std::collections::HashMap;

const MAX_POINTER_OFFSET: usize = 0x3FFF;

/// Serializes header, questions and answers. Owner names are compressed
/// against earlier names in the message; record data is written as stored.
///
/// Fails rather than truncating when the message exceeds 512 bytes or a name
/// or section does not fit the wire format.
pub fn encode_message(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
    let qdcount = section_count(message.questions.len(), "question")?;
    let ancount = section_count(message.answers.len(), "answer")?;

    let mut writer = Writer::default();
    writer.u16(message.header.id);
    writer.u16(header_flags(&message.header));
    writer.u16(qdcount);
    writer.u16(ancount);
    writer.u16(0);
    writer.u16(0);

    for question in &message.questions {
        writer.name(&question.name)?;
        writer.u16(question.record_type.to_u16());
        writer.u16(question.class.to_u16());
    }

    for record in &message.answers {
        let rdlength = u16::try_from(record.rdata.len()).map_err(|_| {
            DomainError::EncodeFailed(format!("record data for {} is too long", record.name))
        })?;
        writer.name(&record.name)?;
        writer.u16(record.record_type.to_u16());
        writer.u16(record.class.to_u16());
        writer.u32(record.ttl);
        writer.u16(rdlength);
        writer.buf.extend_from_slice(&record.rdata);
    }

    if writer.buf.len() > MAX_UDP_MESSAGE_SIZE {
        return Err(DomainError::EncodeFailed(format!(
            "message is {} bytes, over the {} byte UDP limit",
            writer.buf.len(),
            MAX_UDP_MESSAGE_SIZE
        )));
    }

    Ok(writer.buf)
}

fn section_count(len: usize, section: &str) -> Result<u16, DomainError> {
    u16::try_from(len)
        .map_err(|_| DomainError::EncodeFailed(format!("too many {} records: {}", section, len)))
}

fn header_flags(header: &DnsHeader) -> u16 {
    let mut flags =
        (((header.opcode as u16) & 0x0F) << 11) | ((header.response_code as u16) & 0x0F);
    if header.response {
        flags |= FLAG_RESPONSE;
    }
    if header.authoritative {
        flags |= FLAG_AUTHORITATIVE;
    }
    if header.truncated {
        flags |= FLAG_TRUNCATED;
    }
    if header.recursion_desired {
        flags |= FLAG_RECURSION_DESIRED;
    }
    if header.recursion_available {
        flags |= FLAG_RECURSION_AVAILABLE;
    }
    flags
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
    /// Offsets of name suffixes already written, for compression pointers.
    suffixes: HashMap<String, u16>,
}

impl Writer {
    fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn name(&mut self, name: &DomainName) -> Result<(), DomainError> {
        if name.is_root() {
            self.buf.push(0);
            return Ok(());
        }

        let labels: Vec<&str> = name.as_str().split('.').collect();
        validate_labels(name, &labels)?;

        for i in 0..labels.len() {
            let suffix = labels[i..].join(".");
            if let Some(&offset) = self.suffixes.get(&suffix) {
                self.u16(0xC000 | offset);
                return Ok(());
            }
            if self.buf.len() <= MAX_POINTER_OFFSET {
                self.suffixes.insert(suffix, self.buf.len() as u16);
            }
            self.buf.push(labels[i].len() as u8);
            self.buf.extend_from_slice(labels[i].as_bytes());
        }
        self.buf.push(0);
        Ok(())
    }
}

fn validate_labels(name: &DomainName, labels: &[&str]) -> Result<(), DomainError> {
    let mut wire_len = 1;
    for label in labels {
        if label.is_empty() {
            return Err(DomainError::EncodeFailed(format!(
                "name '{}' has an empty label",
                name
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::EncodeFailed(format!(
                "label '{}' is longer than {} bytes",
                label, MAX_LABEL_LEN
            )));
        }
        wire_len += label.len() + 1;
    }
    if wire_len > MAX_NAME_WIRE_LEN {
        return Err(DomainError::EncodeFailed(format!(
            "name '{}' is longer than {} bytes",
            name, MAX_NAME_WIRE_LEN
        )));
    }
    Ok(())
}
