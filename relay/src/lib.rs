mod context;
mod engine;
mod error;
mod upstream;

pub use context::{RelayContext, DEFAULT_TIMEOUT};
pub use engine::{
    extract_answers, forward_question, handle_datagram, parse_request, stub_answers, STUB_ADDRESS,
    STUB_TTL,
};
pub use error::RelayError;
pub use upstream::exchange;
