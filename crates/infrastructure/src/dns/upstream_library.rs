//! Resolution library backed by upstream recursive resolvers.

use super::forwarding::reply_tree::{all_timeout, response_tree, status_only};
use super::forwarding::{MessageBuilder, ParsedReply, ResponseParser};
use super::transport::{create_transport, tcp::TcpTransport, DnsTransport, Transport};
use crate::errors::UpstreamError;
use async_trait::async_trait;
use ferrous_lookup_application::ports::{ResolutionLibrary, ResolutionRequest};
use ferrous_lookup_domain::response::extensions::DNSSEC_RETURN_ONLY_SECURE;
use ferrous_lookup_domain::config::UpstreamConfig;
use ferrous_lookup_domain::{
    AddressFamilyFilter, ConfigError, QueryKind, ResponseValue, StatusCode, TransportFailure,
    UpstreamServer,
};
use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, warn};

const TYPE_A: u16 = 1;
const TYPE_AAAA: u16 = 28;

pub struct UpstreamLibrary {
    servers: Vec<UpstreamServer>,
    timeout: Duration,
    tcp_fallback: bool,
}

impl UpstreamLibrary {
    pub fn new(servers: Vec<UpstreamServer>, timeout: Duration, tcp_fallback: bool) -> Self {
        Self {
            servers,
            timeout,
            tcp_fallback,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.parsed_servers()?,
            Duration::from_millis(config.timeout_ms),
            config.tcp_fallback,
        ))
    }

    pub fn servers(&self) -> &[UpstreamServer] {
        &self.servers
    }

    /// Asks each server in turn until one produces a parseable reply.
    pub async fn exchange(
        &self,
        name: &str,
        type_code: u16,
        dnssec_ok: bool,
    ) -> Result<ParsedReply, UpstreamError> {
        for server in &self.servers {
            match self.exchange_with(server, name, type_code, dnssec_ok).await {
                Ok(reply) => return Ok(reply),
                Err(e) => {
                    warn!(
                        server = %server,
                        name = %name,
                        qtype = type_code,
                        error = %e,
                        "Upstream exchange failed"
                    );
                }
            }
        }

        Err(UpstreamError::AllServersFailed {
            attempted: self.servers.len(),
        })
    }

    async fn exchange_with(
        &self,
        server: &UpstreamServer,
        name: &str,
        type_code: u16,
        dnssec_ok: bool,
    ) -> Result<ParsedReply, UpstreamError> {
        let query = MessageBuilder::build_query(name, type_code, dnssec_ok)?;
        let transport = create_transport(server);

        let mut response = transport.send(&query.bytes, self.timeout).await?;

        if matches!(transport, Transport::Udp(_))
            && self.tcp_fallback
            && ResponseParser::is_truncated(&response.bytes)
        {
            debug!(server = %server, name = %name, "Truncated UDP reply, retrying over TCP");
            let tcp = TcpTransport::new(server.addr());
            response = tcp.send(&query.bytes, self.timeout).await?;
        }

        let reply = ResponseParser::parse(&response.bytes)?;
        if reply.id != query.id {
            return Err(UpstreamError::IdMismatch {
                expected: query.id,
                received: reply.id,
            });
        }

        debug!(
            server = %server,
            protocol = response.protocol_used,
            name = %name,
            qtype = type_code,
            "Upstream reply accepted"
        );

        Ok(reply)
    }
}

/// Overall status for the replies that came back; an empty slice means
/// every exchange failed.
fn overall_status(replies: &[ParsedReply], secure: bool) -> u32 {
    if replies.is_empty() {
        StatusCode::ALL_TIMEOUT
    } else if secure && !replies.iter().any(|r| r.authenticated) {
        StatusCode::NO_SECURE_ANSWERS
    } else if replies.iter().all(|r| r.is_nxdomain()) {
        StatusCode::NO_NAME
    } else {
        StatusCode::GOOD
    }
}

/// RR types asked upstream for one request. Address lookups only ask for
/// the families the request admits.
fn query_types(request: &ResolutionRequest) -> Vec<u16> {
    match (request.kind, request.address_family) {
        (QueryKind::Address, AddressFamilyFilter::Any) => vec![TYPE_A, TYPE_AAAA],
        (QueryKind::Address, AddressFamilyFilter::V4Only) => vec![TYPE_A],
        (QueryKind::Address, AddressFamilyFilter::V6Only) => vec![TYPE_AAAA],
        (QueryKind::General(code), _) => vec![code],
    }
}

#[async_trait]
impl ResolutionLibrary for UpstreamLibrary {
    async fn resolve(&self, request: ResolutionRequest) -> Result<ResponseValue, TransportFailure> {
        let secure = request.extensions.is_enabled(DNSSEC_RETURN_ONLY_SECURE);
        let with_addresses = request.kind == QueryKind::Address;
        let types = query_types(&request);

        let results = join_all(
            types
                .iter()
                .map(|t| self.exchange(&request.name, *t, secure)),
        )
        .await;

        let mut replies: Vec<ParsedReply> = results.into_iter().filter_map(Result::ok).collect();

        if replies.is_empty() {
            return Ok(all_timeout());
        }

        let status = overall_status(&replies, secure);
        if status == StatusCode::NO_SECURE_ANSWERS {
            return Ok(status_only(status));
        }
        if secure {
            // each requested type stands or falls on its own AD bit
            replies.retain(|r| r.authenticated);
        }

        debug!(
            name = %request.name,
            kind = %request.kind,
            address_family = request.address_family.as_str(),
            status,
            replies = replies.len(),
            "Upstream resolution finished"
        );

        Ok(response_tree(status, &replies, with_addresses))
    }
}
