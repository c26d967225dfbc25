use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

const DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// `ip`, `ip:port`, `[v6]:port`, optionally prefixed `udp://` or `tcp://`.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retry over TCP when a UDP answer comes back truncated.
    #[serde(default = "default_true")]
    pub tcp_fallback: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            timeout_ms: default_timeout_ms(),
            tcp_fallback: true,
        }
    }
}

impl UpstreamConfig {
    pub fn parsed_servers(&self) -> Result<Vec<UpstreamServer>, ConfigError> {
        self.servers
            .iter()
            .map(|s| s.parse::<UpstreamServer>().map_err(ConfigError::Validation))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream timeout_ms cannot be 0".to_string(),
            ));
        }
        self.parsed_servers().map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamServer {
    Udp(SocketAddr),
    Tcp(SocketAddr),
}

impl UpstreamServer {
    pub fn addr(&self) -> SocketAddr {
        match self {
            UpstreamServer::Udp(addr) | UpstreamServer::Tcp(addr) => *addr,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            UpstreamServer::Udp(_) => "UDP",
            UpstreamServer::Tcp(_) => "TCP",
        }
    }
}

impl fmt::Display for UpstreamServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamServer::Udp(addr) => write!(f, "udp://{}", addr),
            UpstreamServer::Tcp(addr) => write!(f, "tcp://{}", addr),
        }
    }
}

fn parse_socket_addr(s: &str) -> Option<SocketAddr> {
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Some(addr);
    }
    s.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}

impl FromStr for UpstreamServer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(addr_str) = s.strip_prefix("udp://") {
            return parse_socket_addr(addr_str)
                .map(UpstreamServer::Udp)
                .ok_or_else(|| format!("Invalid UDP address '{}'", addr_str));
        }
        if let Some(addr_str) = s.strip_prefix("tcp://") {
            return parse_socket_addr(addr_str)
                .map(UpstreamServer::Tcp)
                .ok_or_else(|| format!("Invalid TCP address '{}'", addr_str));
        }
        parse_socket_addr(s)
            .map(UpstreamServer::Udp)
            .ok_or_else(|| format!("Invalid upstream server '{}'", s))
    }
}

fn default_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}
