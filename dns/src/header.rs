use crate::error::{DnsError, Result};
use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use std::io::Cursor;

pub const HEADER_LEN: usize = 12;

/// OPCODE 0, a standard query.
pub const OPCODE_QUERY: u8 = 0;

/// RCODE answered for anything other than a standard query.
pub const RCODE_NOT_IMPLEMENTED: u8 = 4;

// 12 bytes
//                                 1  1  1  1  1  1
//   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Response header echoing `id`, `opcode` and `rd` of a request.
    pub fn response(id: u16, opcode: u8, rd: bool) -> Self {
        Self {
            id,
            qr: true,
            opcode,
            rd,
            rcode: if opcode == OPCODE_QUERY {
                0
            } else {
                RCODE_NOT_IMPLEMENTED
            },
            ..Self::default()
        }
    }

    /// Query header, as sent to an upstream resolver.
    pub fn query(id: u16, opcode: u8, rd: bool) -> Self {
        Self {
            id,
            opcode,
            rd,
            ..Self::default()
        }
    }

    pub fn flags(&self) -> u16 {
        let mut flags = 0u16;
        flags |= u16::from(self.qr) << 15;
        flags |= u16::from(self.opcode & 0x0F) << 11;
        flags |= u16::from(self.aa) << 10;
        flags |= u16::from(self.tc) << 9;
        flags |= u16::from(self.rd) << 8;
        flags |= u16::from(self.ra) << 7;
        flags |= u16::from(self.z & 0x07) << 4;
        flags |= u16::from(self.rcode & 0x0F);
        flags
    }

    fn set_flags(&mut self, flags: u16) {
        self.qr = (flags >> 15) & 0x1 == 1;
        self.opcode = ((flags >> 11) & 0x0F) as u8;
        self.aa = (flags >> 10) & 0x1 == 1;
        self.tc = (flags >> 9) & 0x1 == 1;
        self.rd = (flags >> 8) & 0x1 == 1;
        self.ra = (flags >> 7) & 0x1 == 1;
        self.z = ((flags >> 4) & 0x07) as u8;
        self.rcode = (flags & 0x0F) as u8;
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        bytes.write_u16::<BE>(self.id)?;
        bytes.write_u16::<BE>(self.flags())?;
        bytes.write_u16::<BE>(self.qdcount)?;
        bytes.write_u16::<BE>(self.ancount)?;
        bytes.write_u16::<BE>(self.nscount)?;
        bytes.write_u16::<BE>(self.arcount)?;

        Ok(())
    }

    /// Decodes the first 12 bytes of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            return Err(DnsError::MalformedHeader { len: buf.len() });
        }

        let mut rdr = Cursor::new(&buf[..HEADER_LEN]);
        let mut h = Self {
            id: rdr.read_u16::<BE>()?,
            ..Self::default()
        };
        h.set_flags(rdr.read_u16::<BE>()?);
        h.qdcount = rdr.read_u16::<BE>()?;
        h.ancount = rdr.read_u16::<BE>()?;
        h.nscount = rdr.read_u16::<BE>()?;
        h.arcount = rdr.read_u16::<BE>()?;

        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_query_header() {
        // id 0x1234, rd = 1, one question
        let bytes = [0x12, 0x34, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];

        let h = Header::parse(&bytes).unwrap();
        assert_eq!(h.id, 0x1234);
        assert!(!h.qr);
        assert_eq!(h.opcode, 0);
        assert!(h.rd);
        assert!(!h.ra);
        assert_eq!(h.qdcount, 1);
        assert_eq!(h.ancount, 0);
    }

    #[test]
    fn flag_bits() {
        let h = Header {
            qr: true,
            opcode: 0b1010,
            aa: true,
            tc: false,
            rd: true,
            ra: false,
            z: 0b101,
            rcode: 0b0011,
            ..Header::default()
        };

        assert_eq!(h.flags(), 0b1_1010_1_0_1_0_101_0011);
    }

    #[test]
    fn to_bytes_then_parse() {
        let h = Header {
            id: 0xBEEF,
            qr: true,
            opcode: 2,
            aa: true,
            tc: true,
            rd: false,
            ra: true,
            z: 7,
            rcode: 5,
            qdcount: 3,
            ancount: 4,
            nscount: 5,
            arcount: 6,
        };

        let mut bytes = vec![];
        h.to_bytes(&mut bytes).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(&bytes[4..], &[0, 3, 0, 4, 0, 5, 0, 6]);

        assert_eq!(Header::parse(&bytes).unwrap(), h);
    }

    #[test]
    fn short_buffer() {
        let err = Header::parse(&[0u8; 11]).unwrap_err();
        assert!(matches!(err, DnsError::MalformedHeader { len: 11 }));
    }

    #[test]
    fn response_rcode_follows_opcode() {
        let h = Header::response(7, OPCODE_QUERY, true);
        assert!(h.qr);
        assert!(h.rd);
        assert_eq!(h.rcode, 0);

        let h = Header::response(7, 2, false);
        assert_eq!(h.rcode, RCODE_NOT_IMPLEMENTED);
        assert_eq!(h.opcode, 2);
    }
}
