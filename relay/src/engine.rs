use std::net::Ipv4Addr;
use dns::{DnsError, Header, Message, Question, ResourceRecord, HEADER_LEN};
use crate::context::RelayContext;
use crate::error::RelayError;
use crate::upstream;

pub const STUB_TTL: u32 = 60;
pub const STUB_ADDRESS: Ipv4Addr = Ipv4Addr::new(1, 1, 1, 1);

/// Turns one inbound query datagram into the bytes of its response.
///
/// An error means the request itself could not be decoded and no response
/// should be sent. Upstream failures never surface here: the affected
/// question just gets no answer.
pub async fn handle_datagram(ctx: &RelayContext, request: &[u8]) -> Result<Vec<u8>, RelayError> {
    let (header, questions) = parse_request(request)?;

    let answers = match ctx.upstream() {
        None => stub_answers(&questions),
        Some(upstream) => forward_all(ctx, upstream, &header, &questions).await,
    };

    let response_header = Header::response(header.id, header.opcode, header.rd);
    let response = Message::new(response_header, questions, answers);

    Ok(response.serialize()?)
}

/// Header and all QDCOUNT questions of an inbound request.
pub fn parse_request(request: &[u8]) -> Result<(Header, Vec<Question>), DnsError> {
    let header = Header::parse(request)?;

    let mut questions = Vec::with_capacity(usize::from(header.qdcount));
    let mut offset = HEADER_LEN;
    for _ in 0..header.qdcount {
        let (question, next) = Question::parse_checked(request, offset)?;
        questions.push(question);
        offset = next;
    }

    Ok((header, questions))
}

pub fn stub_answers(questions: &[Question]) -> Vec<ResourceRecord> {
    questions
        .iter()
        .map(|q| ResourceRecord::a_record(&q.name, STUB_TTL, STUB_ADDRESS))
        .collect()
}

// one question at a time, in order
async fn forward_all(
    ctx: &RelayContext,
    upstream: &str,
    header: &Header,
    questions: &[Question],
) -> Vec<ResourceRecord> {
    let mut answers = Vec::new();

    for question in questions {
        tracing::info!("forwarding {} query for {} to {}", question.qtype, question.name, upstream);

        match forward_question(ctx, upstream, header, question).await {
            Ok(mut records) => {
                tracing::debug!("{} answers for {}", records.len(), question.name);
                answers.append(&mut records);
            }
            Err(e) => {
                tracing::warn!("no answer for {}: {}", question.name, e);
            }
        }
    }

    answers
}

/// Sends `question` alone to `upstream`, with the request's ID, OPCODE and
/// RD, and returns the answers of the reply.
pub async fn forward_question(
    ctx: &RelayContext,
    upstream: &str,
    header: &Header,
    question: &Question,
) -> Result<Vec<ResourceRecord>, RelayError> {
    let query_header = Header::query(header.id, header.opcode, header.rd);
    let query = Message::new(query_header, vec![question.clone()], vec![]);
    let request_bytes = query.serialize()?;

    let reply = upstream::exchange(upstream, &request_bytes, ctx.timeout()).await?;

    Ok(extract_answers(&reply)?)
}

/// Skips the question section of an upstream reply and decodes ANCOUNT
/// answers. Reading stops at the first record that does not decode; the
/// ones before it are kept.
pub fn extract_answers(reply: &[u8]) -> Result<Vec<ResourceRecord>, DnsError> {
    let header = Header::parse(reply)?;

    let mut offset = HEADER_LEN;
    for _ in 0..header.qdcount {
        let (_, next) = Question::parse(reply, offset);
        offset = next;
    }

    let mut answers = Vec::with_capacity(usize::from(header.ancount));
    for _ in 0..header.ancount {
        match ResourceRecord::parse(reply, offset) {
            Ok((answer, next)) => {
                answers.push(answer);
                offset = next;
            }
            Err(e) => {
                tracing::warn!("dropping the rest of the upstream answers: {}", e);
                break;
            }
        }
    }

    Ok(answers)
}
