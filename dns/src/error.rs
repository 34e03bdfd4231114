use thiserror::Error;

pub type Result<T> = std::result::Result<T, DnsError>;

#[derive(Error, Debug)]
pub enum DnsError {
    #[error("Malformed header: need 12 bytes, got {len}")]
    MalformedHeader { len: usize },

    #[error("Truncated question at offset {offset}")]
    TruncatedQuestion { offset: usize },

    #[error("Truncated resource record at offset {offset}")]
    TruncatedRecord { offset: usize },

    #[error("Compression pointer cycle detected at offset {offset}")]
    NameCycleDetected { offset: usize },

    #[error("Domain name runs past the end of the buffer at offset {offset}")]
    NameOutOfBounds { offset: usize },

    #[error("Invalid label: '{label}'")]
    InvalidLabel { label: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
