use crate::error::{DnsError, Result};

pub const MAX_LABEL_LEN: usize = 63;

const POINTER_MASK: u8 = 0xC0;

/// Why a name stopped decoding before its terminating zero byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFault {
    /// A compression pointer targeted an offset already jumped to.
    PointerCycle { offset: usize },
    /// A label or pointer reached past the end of the buffer.
    OutOfBounds { offset: usize },
    /// Length byte with the `01`/`10` prefix, reserved by RFC 1035.
    ReservedLabelType { offset: usize },
}

/// Result of a best-effort name decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    pub name: String,
    /// Offset just past the name in the original position: past the zero
    /// byte, or past the first compression pointer.
    pub next: usize,
    pub fault: Option<NameFault>,
}

impl DecodedName {
    pub fn into_result(self) -> Result<(String, usize)> {
        match self.fault {
            None => Ok((self.name, self.next)),
            Some(fault) => Err(fault.into()),
        }
    }
}

impl From<NameFault> for DnsError {
    fn from(fault: NameFault) -> Self {
        match fault {
            NameFault::PointerCycle { offset } => DnsError::NameCycleDetected { offset },
            NameFault::OutOfBounds { offset } | NameFault::ReservedLabelType { offset } => {
                DnsError::NameOutOfBounds { offset }
            }
        }
    }
}

// 把域名转换为 length-prefixed labels，以 0 结尾
pub fn encode_name(domain: &str, bytes: &mut Vec<u8>) -> Result<()> {
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        if label.len() > MAX_LABEL_LEN {
            return Err(DnsError::InvalidLabel {
                label: label.to_string(),
            });
        }

        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }

    bytes.push(0);

    Ok(())
}

/// Number of bytes `encode_name` writes for `domain`.
pub fn encoded_len(domain: &str) -> usize {
    domain
        .split('.')
        .filter(|l| !l.is_empty())
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + 1
}

/// Decodes the name starting at `offset`, following compression pointers
/// into `packet`, which must be the whole message.
///
/// Never panics and never reads past the buffer: a bad length byte, an
/// out-of-range pointer or a pointer cycle ends the name where it is and is
/// reported through `fault`.
pub fn decode_name(packet: &[u8], offset: usize) -> DecodedName {
    let mut labels: Vec<String> = Vec::new();
    // pointer targets already taken during this decode
    let mut visited: Vec<usize> = Vec::new();
    let mut resume: Option<usize> = None;
    let mut fault = None;
    let mut pos = offset;

    loop {
        let len = match packet.get(pos) {
            Some(b) => *b,
            None => {
                fault = Some(NameFault::OutOfBounds { offset: pos });
                pos = packet.len();
                break;
            }
        };

        match len & POINTER_MASK {
            POINTER_MASK => {
                let low = match packet.get(pos + 1) {
                    Some(b) => *b,
                    None => {
                        fault = Some(NameFault::OutOfBounds { offset: pos });
                        pos = packet.len();
                        break;
                    }
                };
                let target = (usize::from(len & !POINTER_MASK) << 8) | usize::from(low);

                if resume.is_none() {
                    resume = Some(pos + 2);
                }

                if visited.contains(&target) {
                    fault = Some(NameFault::PointerCycle { offset: pos });
                    break;
                }
                visited.push(target);
                pos = target;
            }
            0x00 => {
                pos += 1;
                if len == 0 {
                    break;
                }

                let end = pos + usize::from(len);
                let Some(label) = packet.get(pos..end) else {
                    fault = Some(NameFault::OutOfBounds { offset: pos - 1 });
                    pos = packet.len();
                    break;
                };
                labels.push(String::from_utf8_lossy(label).to_string());
                pos = end;
            }
            _ => {
                fault = Some(NameFault::ReservedLabelType { offset: pos });
                pos += 1;
                break;
            }
        }
    }

    DecodedName {
        name: labels.join("."),
        next: resume.unwrap_or(pos),
        fault,
    }
}
