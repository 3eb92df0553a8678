//! DNS wire format (RFC 1035 §4) for classic UDP messages.
//!
//! Only the header, question and answer sections are modelled. Authority and
//! additional sections are skipped on decode and never written, so EDNS(0)
//! OPT records from clients are ignored.

mod decoder;
mod encoder;

pub use decoder::decode_message;
pub use encoder::encode_message;

/// Classic DNS-over-UDP payload limit; larger messages are not supported.
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

pub(crate) const HEADER_LEN: usize = 12;
pub(crate) const MAX_LABEL_LEN: usize = 63;
pub(crate) const MAX_NAME_WIRE_LEN: usize = 255;

pub(crate) const FLAG_RESPONSE: u16 = 0x8000;
pub(crate) const FLAG_AUTHORITATIVE: u16 = 0x0400;
pub(crate) const FLAG_TRUNCATED: u16 = 0x0200;
pub(crate) const FLAG_RECURSION_DESIRED: u16 = 0x0100;
pub(crate) const FLAG_RECURSION_AVAILABLE: u16 = 0x0080;
