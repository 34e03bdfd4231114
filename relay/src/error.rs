use dns::DnsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Upstream {upstream} did not answer in time")]
    UpstreamTimeout { upstream: String },

    #[error("Upstream {upstream} unreachable: {source}")]
    UpstreamUnreachable {
        upstream: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed message: {0}")]
    Codec(#[from] DnsError),
}
