use crate::error::{DnsError, Result};
use crate::name::{decode_name, encode_name, encoded_len};
use crate::{CLASS_IN, TYPE_A};
use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use std::io::Cursor;
use std::net::Ipv4Addr;

// TYPE, CLASS, TTL, RDLENGTH
const FIXED_LEN: usize = 2 + 2 + 4 + 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    /// TYPE=A, CLASS=IN
    A(Ipv4Addr),
    /// Any other record, carried as a domain name.
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn a_record(name: &str, ttl: u32, addr: Ipv4Addr) -> Self {
        Self {
            name: name.to_string(),
            rtype: TYPE_A,
            rclass: CLASS_IN,
            ttl,
            rdata: RData::A(addr),
        }
    }

    pub fn rdlength(&self) -> usize {
        match &self.rdata {
            RData::A(_) => 4,
            RData::Name(target) => encoded_len(target),
        }
    }

    pub fn address(&self) -> Option<Ipv4Addr> {
        match self.rdata {
            RData::A(addr) => Some(addr),
            RData::Name(_) => None,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        encode_name(&self.name, bytes)?;
        bytes.write_u16::<BE>(self.rtype)?;
        bytes.write_u16::<BE>(self.rclass)?;
        bytes.write_u32::<BE>(self.ttl)?;
        bytes.write_u16::<BE>(self.rdlength() as u16)?;

        match &self.rdata {
            RData::A(addr) => bytes.extend_from_slice(&addr.octets()),
            RData::Name(target) => encode_name(target, bytes)?,
        }

        Ok(())
    }

    /// Decodes the record at `offset` in `packet`, returning it together with
    /// the offset of the byte right after its RDATA.
    pub fn parse(packet: &[u8], offset: usize) -> Result<(Self, usize)> {
        let decoded = decode_name(packet, offset);
        let start = decoded.next;

        let fixed = packet
            .get(start..start + FIXED_LEN)
            .ok_or(DnsError::TruncatedRecord { offset })?;
        let mut rdr = Cursor::new(fixed);
        let rtype = rdr.read_u16::<BE>()?;
        let rclass = rdr.read_u16::<BE>()?;
        let ttl = rdr.read_u32::<BE>()?;
        let rdlength = usize::from(rdr.read_u16::<BE>()?);

        let rdata_start = start + FIXED_LEN;
        let next = rdata_start + rdlength;
        let raw = packet
            .get(rdata_start..next)
            .ok_or(DnsError::TruncatedRecord { offset })?;

        let rdata = if rtype == TYPE_A && rclass == CLASS_IN && rdlength == 4 {
            RData::A(Ipv4Addr::new(raw[0], raw[1], raw[2], raw[3]))
        } else {
            // may point back into the packet, so decode against the whole buffer
            RData::Name(decode_name(packet, rdata_start).name)
        };

        let record = Self {
            name: decoded.name,
            rtype,
            rclass,
            ttl,
            rdata,
        };

        Ok((record, next))
    }
}
