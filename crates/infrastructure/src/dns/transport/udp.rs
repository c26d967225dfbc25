//! UDP transport (RFC 1035 §4.2.1)
//!
//! Messages go out unframed. Queries advertise a 4096 byte EDNS(0) buffer;
//! a reply with the TC bit set has to be retried over TCP by the caller.

use super::{DnsTransport, TransportResponse};
use crate::errors::UpstreamError;
use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn io_error(&self, e: std::io::Error) -> UpstreamError {
        UpstreamError::Io {
            server: self.server_addr,
            protocol: "UDP",
            reason: e.to_string(),
        }
    }

    fn timeout_error(&self) -> UpstreamError {
        UpstreamError::Timeout {
            server: self.server_addr,
            protocol: "UDP",
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, UpstreamError> {
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.io_error(e))?;

        let bytes_sent =
            tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
                .await
                .map_err(|_| self.timeout_error())?
                .map_err(|e| self.io_error(e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let query_id = message_bytes.get(0..2);

        // Datagrams from any other address or port, and replies carrying
        // another id, are dropped; the deadline covers the whole wait.
        let receive = async {
            loop {
                let (bytes_received, from_addr) = socket.recv_from(&mut recv_buf).await?;
                if from_addr != self.server_addr {
                    warn!(
                        expected = %self.server_addr,
                        received_from = %from_addr,
                        "UDP response from unexpected source"
                    );
                    continue;
                }
                if bytes_received < 2 || recv_buf.get(0..2) != query_id {
                    debug!(server = %self.server_addr, "Ignoring UDP reply with stale id");
                    continue;
                }
                return Ok::<usize, std::io::Error>(bytes_received);
            }
        };

        let bytes_received = tokio::time::timeout(timeout, receive)
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(e))?;

        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
