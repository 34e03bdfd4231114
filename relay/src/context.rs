use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything a request needs besides its own bytes.
#[derive(Debug, Clone)]
pub struct RelayContext {
    upstream: Option<String>,
    timeout: Duration,
}

impl RelayContext {
    /// No resolver: every question gets a canned answer.
    pub fn local() -> Self {
        Self {
            upstream: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn forwarding(upstream: &str) -> Self {
        Self {
            upstream: Some(upstream.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn upstream(&self) -> Option<&str> {
        self.upstream.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
