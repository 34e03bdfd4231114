use crate::error::{DnsError, Result};
use crate::name::{decode_name, encode_name};
use byteorder::{ByteOrder, WriteBytesExt, BE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: &str, qtype: u16, qclass: u16) -> Self {
        Self {
            name: name.to_string(),
            qtype,
            qclass,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        encode_name(&self.name, bytes)?;
        bytes.write_u16::<BE>(self.qtype)?;
        bytes.write_u16::<BE>(self.qclass)?;

        Ok(())
    }

    /// Best-effort decode of the question at `offset` in `packet`.
    ///
    /// Returns the question and the offset just past QCLASS. When fewer than
    /// four bytes follow the name, QTYPE and QCLASS are left at zero and the
    /// offset only moves past the name.
    pub fn parse(packet: &[u8], offset: usize) -> (Self, usize) {
        let (question, next, _) = Self::parse_inner(packet, offset);
        (question, next)
    }

    /// Like `parse`, but a shortfall or a broken name is an error.
    pub fn parse_checked(packet: &[u8], offset: usize) -> Result<(Self, usize)> {
        match Self::parse_inner(packet, offset) {
            (question, next, None) => Ok((question, next)),
            (_, _, Some(e)) => Err(e),
        }
    }

    fn parse_inner(packet: &[u8], offset: usize) -> (Self, usize, Option<DnsError>) {
        let decoded = decode_name(packet, offset);
        let mut fault = decoded.fault.map(DnsError::from);

        let mut q = Self {
            name: decoded.name,
            ..Self::default()
        };

        let fixed = packet.get(decoded.next..decoded.next + 4);
        let Some(fixed) = fixed else {
            if fault.is_none() {
                fault = Some(DnsError::TruncatedQuestion {
                    offset: decoded.next,
                });
            }
            return (q, decoded.next, fault);
        };

        q.qtype = BE::read_u16(&fixed[0..2]);
        q.qclass = BE::read_u16(&fixed[2..4]);

        (q, decoded.next + 4, fault)
    }
}
