use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use configuration::TransportConfiguration;
use tokio::net::UdpSocket;

/// Sends one request datagram and hands back the reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn exchange(&self, server: SocketAddr, request: &[u8]) -> std::io::Result<Bytes>;
}

/// UDP exchange over a fresh socket per attempt.
pub struct UdpTransport {
    timeout: Duration,
    retries: u32,
    max_response_size: usize,
}

impl UdpTransport {
    pub fn new(config: &TransportConfiguration) -> Self {
        Self {
            timeout: config.timeout(),
            retries: config.retries,
            max_response_size: config.max_response_size,
        }
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn exchange(&self, server: SocketAddr, request: &[u8]) -> std::io::Result<Bytes> {
        for attempt in 0..=self.retries {
            let local_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0);
            let sock = UdpSocket::bind(local_addr).await?;
            // only accept datagrams from the server we asked
            sock.connect(server).await?;

            let _send_size = sock.send(request).await?;

            let mut resp_buf = BytesMut::with_capacity(self.max_response_size);
            match tokio::time::timeout(self.timeout, sock.recv_buf(&mut resp_buf)).await {
                Ok(received) => {
                    let response_size = received?;
                    tracing::debug!(
                        "received udp response from {}, length: {}",
                        server,
                        response_size
                    );
                    resp_buf.truncate(response_size);
                    return Ok(resp_buf.freeze());
                }
                Err(_) => {
                    tracing::debug!(
                        "no response from {} within {:?}, attempt {} of {}",
                        server,
                        self.timeout,
                        attempt + 1,
                        self.retries + 1
                    );
                }
            }
        }

        Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("no response from {}", server),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(timeout_ms: u64, retries: u32) -> UdpTransport {
        UdpTransport::new(&TransportConfiguration {
            timeout_ms,
            retries,
            max_response_size: 512,
        })
    }

    #[tokio::test]
    async fn exchange_returns_reply() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (n, peer) = server.recv_from(&mut buf).await.unwrap();
            let mut reply = buf[..n].to_vec();
            reply.reverse();
            server.send_to(&reply, peer).await.unwrap();
        });

        let reply = transport(1000, 0)
            .exchange(server_addr, &[1, 2, 3])
            .await
            .unwrap();
        assert_eq!(&reply[..], &[3, 2, 1]);
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        let err = transport(50, 1)
            .exchange(server_addr, &[1, 2, 3])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::TimedOut);

        // one datagram per attempt reached the server
        let mut buf = [0u8; 16];
        for _ in 0..2 {
            let (n, _) = server.recv_from(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], &[1, 2, 3]);
        }
    }
}
