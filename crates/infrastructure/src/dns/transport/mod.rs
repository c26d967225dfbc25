pub mod tcp;
pub mod udp;

use crate::errors::UpstreamError;
use async_trait::async_trait;
use ferrous_lookup_domain::UpstreamServer;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, UpstreamError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, UpstreamError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}

pub fn create_transport(server: &UpstreamServer) -> Transport {
    match server {
        UpstreamServer::Udp(addr) => Transport::Udp(udp::UdpTransport::new(*addr)),
        UpstreamServer::Tcp(addr) => Transport::Tcp(tcp::TcpTransport::new(*addr)),
    }
}
