use super::{
    FLAG_AUTHORITATIVE, FLAG_RECURSION_AVAILABLE, FLAG_RECURSION_DESIRED, FLAG_RESPONSE,
    FLAG_TRUNCATED, HEADER_LEN, MAX_NAME_WIRE_LEN,
};
use dnsfilter_domain::{
    DnsHeader, DnsMessage, DnsQuestion, DomainError, DomainName, RecordClass, RecordType,
    ResourceRecord,
};

const MAX_POINTER_JUMPS: usize = 32;
/// Root name plus type and class.
const MIN_QUESTION_LEN: usize = 5;
/// Root name plus type, class, TTL and rdata length.
const MIN_RECORD_LEN: usize = 11;

/// Decodes header, questions and answers from a raw datagram.
///
/// Compression pointers are followed in owner names and inside the payload
/// of CNAME, NS, PTR, MX and SOA records, which are stored expanded.
pub fn decode_message(buf: &[u8]) -> Result<DnsMessage, DomainError> {
    if buf.len() < HEADER_LEN {
        return Err(malformed(format!(
            "message is {} bytes, shorter than the header",
            buf.len()
        )));
    }

    let mut reader = Reader { buf, pos: 0 };
    let id = reader.u16()?;
    let flags = reader.u16()?;
    let qdcount = reader.u16()?;
    let ancount = reader.u16()?;
    let _nscount = reader.u16()?;
    let _arcount = reader.u16()?;

    let header = DnsHeader {
        id,
        response: flags & FLAG_RESPONSE != 0,
        opcode: ((flags >> 11) & 0x0F) as u8,
        authoritative: flags & FLAG_AUTHORITATIVE != 0,
        truncated: flags & FLAG_TRUNCATED != 0,
        recursion_desired: flags & FLAG_RECURSION_DESIRED != 0,
        recursion_available: flags & FLAG_RECURSION_AVAILABLE != 0,
        response_code: (flags & 0x000F) as u8,
    };

    let mut questions =
        Vec::with_capacity(capacity_hint(qdcount, reader.remaining(), MIN_QUESTION_LEN));
    for _ in 0..qdcount {
        let name = reader.name()?;
        let record_type = RecordType::from_u16(reader.u16()?);
        let class = RecordClass::from_u16(reader.u16()?);
        questions.push(DnsQuestion {
            name,
            record_type,
            class,
        });
    }

    let mut answers =
        Vec::with_capacity(capacity_hint(ancount, reader.remaining(), MIN_RECORD_LEN));
    for _ in 0..ancount {
        answers.push(reader.record()?);
    }

    Ok(DnsMessage {
        header,
        questions,
        answers,
    })
}

/// Section counts come from the wire; never reserve more entries than the
/// remaining bytes could hold.
fn capacity_hint(count: u16, remaining: usize, min_len: usize) -> usize {
    (count as usize).min(remaining / min_len)
}

fn malformed(reason: impl Into<String>) -> DomainError {
    DomainError::MalformedMessage(reason.into())
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], DomainError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| malformed(format!("truncated at offset {}", self.pos)))?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn u16(&mut self) -> Result<u16, DomainError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&mut self) -> Result<u32, DomainError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn name(&mut self) -> Result<DomainName, DomainError> {
        let (labels, end) = read_labels(self.buf, self.pos)?;
        self.pos = end;
        labels_to_name(&labels)
    }

    /// Reads a name and appends it to `out` uncompressed.
    fn expand_name_into(&mut self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        let (labels, end) = read_labels(self.buf, self.pos)?;
        self.pos = end;
        for label in labels {
            out.push(label.len() as u8);
            out.extend_from_slice(label);
        }
        out.push(0);
        Ok(())
    }

    fn record(&mut self) -> Result<ResourceRecord, DomainError> {
        let name = self.name()?;
        let record_type = RecordType::from_u16(self.u16()?);
        let class = RecordClass::from_u16(self.u16()?);
        let ttl = self.u32()?;
        let rdlength = self.u16()? as usize;

        let rdata_start = self.pos;
        let rdata_end = rdata_start + rdlength;
        if rdata_end > self.buf.len() {
            return Err(malformed(format!(
                "record data for {} runs past the end of the message",
                name
            )));
        }

        let rdata = match record_type {
            RecordType::CNAME | RecordType::NS | RecordType::PTR => {
                let mut out = Vec::with_capacity(rdlength);
                self.expand_name_into(&mut out)?;
                out
            }
            RecordType::MX => {
                let mut out = Vec::with_capacity(rdlength + 16);
                out.extend_from_slice(self.take(2)?);
                self.expand_name_into(&mut out)?;
                out
            }
            RecordType::SOA => {
                let mut out = Vec::with_capacity(rdlength + 32);
                self.expand_name_into(&mut out)?;
                self.expand_name_into(&mut out)?;
                out.extend_from_slice(self.take(20)?);
                out
            }
            _ => self.take(rdlength)?.to_vec(),
        };

        if self.pos != rdata_end {
            return Err(malformed(format!(
                "record data length mismatch for {} {}",
                name, record_type
            )));
        }

        Ok(ResourceRecord {
            name,
            record_type,
            class,
            ttl,
            rdata,
        })
    }
}

/// Returns the labels of the name at `start` and the offset just past it in
/// the original (unfollowed) position.
fn read_labels(buf: &[u8], start: usize) -> Result<(Vec<&[u8]>, usize), DomainError> {
    let mut labels = Vec::new();
    let mut pos = start;
    let mut end = None;
    let mut jumps = 0;
    let mut wire_len = 1;

    loop {
        let len = *buf
            .get(pos)
            .ok_or_else(|| malformed(format!("name at offset {} is truncated", start)))?
            as usize;

        match len & 0xC0 {
            0x00 => {
                if len == 0 {
                    pos += 1;
                    break;
                }
                let label = buf
                    .get(pos + 1..pos + 1 + len)
                    .ok_or_else(|| malformed(format!("label at offset {} is truncated", pos)))?;
                wire_len += len + 1;
                if wire_len > MAX_NAME_WIRE_LEN {
                    return Err(malformed(format!("name at offset {} is too long", start)));
                }
                labels.push(label);
                pos += 1 + len;
            }
            0xC0 => {
                let low = *buf
                    .get(pos + 1)
                    .ok_or_else(|| malformed(format!("pointer at offset {} is truncated", pos)))?;
                jumps += 1;
                if jumps > MAX_POINTER_JUMPS {
                    return Err(malformed("compression pointer loop"));
                }
                if end.is_none() {
                    end = Some(pos + 2);
                }
                let target = ((len & 0x3F) << 8) | low as usize;
                if target >= buf.len() {
                    return Err(malformed(format!(
                        "compression pointer to {} is out of bounds",
                        target
                    )));
                }
                pos = target;
            }
            _ => {
                return Err(malformed(format!(
                    "unsupported label type 0x{:02x} at offset {}",
                    len, pos
                )))
            }
        }
    }

    Ok((labels, end.unwrap_or(pos)))
}

fn labels_to_name(labels: &[&[u8]]) -> Result<DomainName, DomainError> {
    let mut name = String::new();
    for (i, label) in labels.iter().enumerate() {
        let text = std::str::from_utf8(label)
            .map_err(|_| malformed("domain label is not valid UTF-8"))?;
        if text.contains('.') {
            return Err(malformed(format!("domain label '{}' contains a dot", text)));
        }
        if i > 0 {
            name.push('.');
        }
        name.push_str(text);
    }
    Ok(DomainName::new(&name))
}
