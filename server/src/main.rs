use std::error::Error;
use configuration::RelayConfiguration;
use relay::RelayContext;
use tokio::net::UdpSocket;
use tracing_subscriber::EnvFilter;

mod cli_args;

use cli_args::CliArgs;

// one datagram is fully handled, upstream round trips included, before the
// next one is received
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: CliArgs = argh::from_env();
    let config = load_configuration(args)?;

    let address = config.server.bind_address();
    let sock = UdpSocket::bind(address).await?;
    tracing::info!("Listening on: {}, pid: {}", address, std::process::id());

    let ctx = match config.upstream.resolver.as_deref() {
        Some(resolver) => {
            tracing::info!("Forwarding DNS queries to {}", resolver);
            RelayContext::forwarding(resolver)
        }
        None => {
            tracing::info!("No resolver configured, answering locally");
            RelayContext::local()
        }
    };
    let ctx = ctx.with_timeout(config.upstream.timeout());

    serve(&sock, &ctx).await?;

    Ok(())
}

fn load_configuration(args: CliArgs) -> Result<RelayConfiguration, Box<dyn Error>> {
    let mut config = match args.config {
        Some(path) => configuration::get_config::<RelayConfiguration>(path)?,
        None => RelayConfiguration::default(),
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(resolver) = args.resolver {
        config.upstream.resolver = Some(resolver);
    }

    Ok(config)
}

async fn serve(sock: &UdpSocket, ctx: &RelayContext) -> std::io::Result<()> {
    let mut buf = [0u8; dns::MAX_UDP_SIZE];

    loop {
        let (size, source) = match sock.recv_from(&mut buf).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Error receiving data: {}", e);
                return Err(e);
            }
        };
        tracing::debug!("received {} bytes from {}", size, source);

        let response = match relay::handle_datagram(ctx, &buf[..size]).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("dropping datagram from {}: {}", source, e);
                continue;
            }
        };

        if let Err(e) = sock.send_to(&response, source).await {
            tracing::error!("Failed to send response to {}: {}", source, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, SocketAddr};
    use std::time::Duration;
    use dns::Message;

    #[test]
    fn cli_overrides_defaults() {
        let args = CliArgs {
            port: Some(5300),
            resolver: Some("127.0.0.1:53".to_string()),
            config: None,
        };

        let config = load_configuration(args).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:5300".parse::<SocketAddr>().unwrap());
        assert_eq!(config.upstream.resolver.as_deref(), Some("127.0.0.1:53"));
        assert_eq!(config.upstream.timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn serve_local_mode() {
        let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = sock.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = serve(&sock, &RelayContext::local()).await;
        });

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.connect(server_addr).await.unwrap();

        // garbage is dropped without a reply, the next query still works
        client.send(&[1, 2, 3]).await.unwrap();
        client
            .send(&dns::encode_request(0x1234, "codecrafters.io").unwrap())
            .await
            .unwrap();

        let mut buf = [0u8; 512];
        let n = tokio::time::timeout(Duration::from_secs(5), client.recv(&mut buf))
            .await
            .unwrap()
            .unwrap();

        let msg = Message::parse(&buf[..n]).unwrap();
        assert_eq!(msg.header().id, 0x1234);
        assert_eq!(msg.answers().len(), 1);
        assert_eq!(msg.answers()[0].address(), Some(Ipv4Addr::new(1, 1, 1, 1)));
    }
}
