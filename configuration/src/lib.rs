use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 2053;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

pub fn get_config<'de, T: Deserialize<'de>>(config_path: PathBuf) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path);
    let config = config::Config::builder()
        .add_source(f)
        .build()?;
    config.try_deserialize::<T>()
}

#[derive(Debug, Default, Deserialize)]
pub struct RelayConfiguration {
    #[serde(default)]
    pub server: ServerConfiguration,
    #[serde(default)]
    pub upstream: UpstreamConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfiguration {
    #[serde(default = "loopback")]
    pub ip_address: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfiguration {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.ip_address, self.port)
    }
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            ip_address: loopback(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpstreamConfiguration {
    /// `host:port`; without it every question gets a canned local answer.
    #[serde(default)]
    pub resolver: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl UpstreamConfiguration {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfiguration {
    fn default() -> Self {
        Self {
            resolver: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn loopback() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_SECS
}
