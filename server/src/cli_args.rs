use std::path::PathBuf;
use argh::FromArgs;

#[derive(Debug, FromArgs)]
#[argh(description = "DNS server that answers A queries locally or relays them to a resolver")]
pub struct CliArgs {
    #[argh(
        option,
        description = "udp port to listen on, bound to 127.0.0.1, default: 2053"
    )]
    pub port: Option<u16>,

    #[argh(
        option,
        description = "resolver to forward questions to, as host:port"
    )]
    pub resolver: Option<String>,

    #[argh(option, description = "path to a TOML config file")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args() {
        let args = CliArgs::from_args(&["server"], &["--port", "5353", "--resolver", "8.8.8.8:53"]).unwrap();
        assert_eq!(args.port, Some(5353));
        assert_eq!(args.resolver.as_deref(), Some("8.8.8.8:53"));
        assert!(args.config.is_none());

        let args = CliArgs::from_args(&["server"], &[]).unwrap();
        assert!(args.port.is_none());
        assert!(args.resolver.is_none());
    }
}
