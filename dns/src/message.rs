use crate::error::Result;
use crate::header::{Header, HEADER_LEN};
use crate::question::Question;
use crate::resource_record::ResourceRecord;

/// Header plus question and answer sections.
///
/// QDCOUNT and ANCOUNT always equal the section lengths, whatever the header
/// passed to `new` carried; authority and additional sections are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(header: Header, questions: Vec<Question>, answers: Vec<ResourceRecord>) -> Self {
        let mut header = header;
        header.qdcount = count(questions.len());
        header.ancount = count(answers.len());
        header.nscount = 0;
        header.arcount = 0;

        Self {
            header,
            questions,
            answers,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        self.header.to_bytes(bytes)?;
        for q in self.questions.iter() {
            q.to_bytes(bytes)?;
        }
        for a in self.answers.iter() {
            a.to_bytes(bytes)?;
        }

        Ok(())
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(512);
        self.to_bytes(&mut bytes)?;

        Ok(bytes)
    }

    /// Decodes a whole message. Authority and additional records are ignored.
    pub fn parse(packet: &[u8]) -> Result<Self> {
        let header = Header::parse(packet)?;
        let mut offset = HEADER_LEN;

        let mut questions = Vec::with_capacity(usize::from(header.qdcount));
        for _ in 0..header.qdcount {
            let (q, next) = Question::parse_checked(packet, offset)?;
            questions.push(q);
            offset = next;
        }

        let mut answers = Vec::with_capacity(usize::from(header.ancount));
        for _ in 0..header.ancount {
            let (a, next) = ResourceRecord::parse(packet, offset)?;
            answers.push(a);
            offset = next;
        }

        Ok(Self::new(header, questions, answers))
    }
}

// a 512 byte datagram can not hold more records than fit in a u16
fn count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CLASS_IN, TYPE_A};
    use std::net::Ipv4Addr;

    #[test]
    fn to_bytes_test() {
        let header = Header::query(209 * 256 + 183, 0, true);
        let msg = Message::new(header, vec![Question::new("baidu.com", TYPE_A, CLASS_IN)], vec![]);

        let expected = [
            209, 183, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, // header
            5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0, 0, 1, 0, 1, // question
        ];
        assert_eq!(msg.serialize().unwrap(), expected);
    }

    #[test]
    fn counts_follow_sections() {
        let mut header = Header::response(1, 0, false);
        header.qdcount = 9;
        header.ancount = 9;
        header.nscount = 3;
        header.arcount = 2;

        let questions = vec![
            Question::new("a.com", TYPE_A, CLASS_IN),
            Question::new("b.com", TYPE_A, CLASS_IN),
        ];
        let answers = vec![ResourceRecord::a_record("a.com", 60, Ipv4Addr::new(1, 1, 1, 1))];
        let msg = Message::new(header, questions, answers);

        assert_eq!(msg.header().qdcount, 2);
        assert_eq!(msg.header().ancount, 1);
        assert_eq!(msg.header().nscount, 0);
        assert_eq!(msg.header().arcount, 0);

        let empty = Message::new(header, vec![], vec![]);
        assert_eq!(empty.header().qdcount, 0);
        assert_eq!(empty.header().ancount, 0);
        assert_eq!(empty.serialize().unwrap().len(), HEADER_LEN);
    }

    #[test]
    fn serialize_keeps_order() {
        let questions = vec![
            Question::new("one.com", TYPE_A, CLASS_IN),
            Question::new("two.com", TYPE_A, CLASS_IN),
        ];
        let answers = vec![
            ResourceRecord::a_record("two.com", 30, Ipv4Addr::new(2, 2, 2, 2)),
            ResourceRecord::a_record("one.com", 60, Ipv4Addr::new(1, 1, 1, 1)),
            ResourceRecord::a_record("two.com", 30, Ipv4Addr::new(2, 2, 2, 2)),
        ];
        let msg = Message::new(Header::response(0xABCD, 0, true), questions, answers);

        let bytes = msg.serialize().unwrap();
        let parsed = Message::parse(&bytes).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(parsed.answers()[0].name, "two.com");
        assert_eq!(parsed.answers()[1].name, "one.com");
    }
}
