// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1

mod error;
mod header;
mod message;
mod name;
mod question;
mod resource_record;

pub use error::{DnsError, Result};
pub use header::{Header, HEADER_LEN, OPCODE_QUERY, RCODE_NOT_IMPLEMENTED};
pub use message::Message;
pub use name::{decode_name, encode_name, encoded_len, DecodedName, NameFault, MAX_LABEL_LEN};
pub use question::Question;
pub use resource_record::{RData, ResourceRecord};

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;

// Messages carried by UDP are restricted to 512 bytes (not counting the IP
// or UDP headers).
pub const MAX_UDP_SIZE: usize = 512;

/// Encodes a single A/IN query for `domain`, recursion desired.
pub fn encode_request(id: u16, domain: &str) -> Result<Vec<u8>> {
    let header = Header::query(id, OPCODE_QUERY, true);
    let question = Question::new(domain, TYPE_A, CLASS_IN);

    Message::new(header, vec![question], vec![]).serialize()
}

pub fn decode_response(response_bytes: &[u8]) -> Result<Message> {
    Message::parse(response_bytes)
}
