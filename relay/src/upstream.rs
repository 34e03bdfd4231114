use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use bytes::BytesMut;
use tokio::net::{lookup_host, UdpSocket};
use crate::error::RelayError;

/// One request/response round trip with `upstream` (`host:port`) over a fresh
/// UDP socket. The whole exchange, name lookup included, must finish within
/// `deadline`; there is no retry.
pub async fn exchange(upstream: &str, request_bytes: &[u8], deadline: Duration) -> Result<BytesMut, RelayError> {
    match tokio::time::timeout(deadline, send_and_receive(upstream, request_bytes)).await {
        Ok(ret) => ret.map_err(|source| RelayError::UpstreamUnreachable {
            upstream: upstream.to_string(),
            source,
        }),
        Err(_) => Err(RelayError::UpstreamTimeout {
            upstream: upstream.to_string(),
        }),
    }
}

async fn send_and_receive(upstream: &str, request_bytes: &[u8]) -> io::Result<BytesMut> {
    let server_addr = lookup_host(upstream)
        .await?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "resolver address did not resolve"))?;

    let local_addr = match server_addr {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    };
    let sock = UdpSocket::bind(local_addr).await?;
    // only accept datagrams coming back from the resolver
    sock.connect(server_addr).await?;

    let _send_size = sock.send(request_bytes).await?;

    let mut resp_buf = BytesMut::with_capacity(dns::MAX_UDP_SIZE);
    let response_size = sock.recv_buf(&mut resp_buf).await?;
    tracing::debug!("received udp response from {}, length: {}", server_addr, response_size);

    Ok(resp_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_round_trip() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (n, peer) = server.recv_from(&mut buf).await.unwrap();
            server.send_to(&buf[..n], peer).await.unwrap();
        });

        let resp = exchange(&server_addr, b"ping", Duration::from_secs(5)).await.unwrap();
        assert_eq!(&resp[..], b"ping");
    }

    #[tokio::test]
    async fn silent_upstream_times_out() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap().to_string();

        let err = exchange(&server_addr, b"ping", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::UpstreamTimeout { .. }));

        drop(server);
    }

    #[tokio::test]
    async fn bad_address_is_unreachable() {
        let err = exchange("not an address", b"ping", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::UpstreamUnreachable { .. }));
    }
}
