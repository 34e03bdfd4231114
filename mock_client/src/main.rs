extern crate tokio;

use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;
use log::{info, warn};
use tokio::net::UdpSocket;

// usage: mock_client [domain] [server]
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::try_init();

    let domain = std::env::args().nth(1).unwrap_or("codecrafters.io".to_string());
    let server_address = std::env::args().nth(2).unwrap_or("127.0.0.1:2053".to_string());
    let addr = server_address.parse::<SocketAddr>()?;

    // 1. sends an A query for the domain
    let request = dns::encode_request(std::process::id() as u16, &domain)?;
    let sock = UdpSocket::bind("0.0.0.0:0").await?;
    sock.connect(addr).await?;
    sock.send(&request).await?;
    info!("Sent {} byte query for {} to {}", request.len(), domain, addr);

    // 2. waits for the response
    let mut buf = [0u8; dns::MAX_UDP_SIZE];
    let n = match tokio::time::timeout(Duration::from_secs(5), sock.recv(&mut buf)).await {
        Ok(r) => r?,
        Err(_) => {
            warn!("No response from {} within 5 seconds", addr);
            return Ok(());
        }
    };

    // 3. prints the answers
    let resp = dns::decode_response(&buf[..n])?;
    let header = resp.header();
    println!(
        "id: {}, rcode: {}, questions: {}, answers: {}",
        header.id, header.rcode, header.qdcount, header.ancount
    );
    for answer in resp.answers() {
        match answer.address() {
            Some(ip) => println!("{}\t{}\tA\t{}", answer.name, answer.ttl, ip),
            None => println!("{}\t{}\ttype {}\t{:?}", answer.name, answer.ttl, answer.rtype, answer.rdata),
        }
    }

    Ok(())
}
