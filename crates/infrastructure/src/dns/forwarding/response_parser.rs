//! Reply parsing
//!
//! `hickory-proto` decodes the message. Owner names and rdata are then
//! re-emitted without compression, so every record stands on its own
//! outside the message it arrived in.

use crate::errors::UpstreamError;
use hickory_proto::op::{Message, Query, ResponseCode};
use hickory_proto::rr::{Name, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder, NameEncoding};
use tracing::debug;

const HEADER_LEN: usize = 12;
const TC_FLAG: u8 = 0x02;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireQuestion {
    pub name: Vec<u8>,
    pub qtype: u16,
    pub qclass: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRecord {
    pub name: Vec<u8>,
    pub rr_type: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ParsedReply {
    pub id: u16,
    pub rcode: ResponseCode,
    pub rcode_value: u8,
    /// AD bit: the upstream validated the answer.
    pub authenticated: bool,
    pub truncated: bool,
    pub question: Option<WireQuestion>,
    pub answers: Vec<WireRecord>,
    pub authority: Vec<WireRecord>,
}

impl ParsedReply {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Checks only the header for the TC bit, so a truncated UDP reply can
    /// be retried over TCP even if its body does not parse.
    pub fn is_truncated(response_bytes: &[u8]) -> bool {
        response_bytes.len() >= HEADER_LEN && response_bytes[2] & TC_FLAG != 0
    }

    pub fn parse(response_bytes: &[u8]) -> Result<ParsedReply, UpstreamError> {
        let message = Message::from_vec(response_bytes)
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

        let question = message.queries().first().map(wire_question).transpose()?;
        let answers = message
            .answers()
            .iter()
            .map(wire_record)
            .collect::<Result<Vec<_>, _>>()?;
        let authority = message
            .name_servers()
            .iter()
            .map(wire_record)
            .collect::<Result<Vec<_>, _>>()?;

        let reply = ParsedReply {
            id: message.id(),
            rcode: message.response_code(),
            rcode_value: message.response_code().low(),
            authenticated: message.authentic_data(),
            truncated: message.truncated(),
            question,
            answers,
            authority,
        };

        debug!(
            id = reply.id,
            rcode = ?reply.rcode,
            answers = reply.answers.len(),
            authority = reply.authority.len(),
            authenticated = reply.authenticated,
            truncated = reply.truncated,
            "DNS response parsed"
        );

        Ok(reply)
    }
}

fn uncompressed<T: BinEncodable + ?Sized>(value: &T) -> Result<Vec<u8>, UpstreamError> {
    let mut bytes = Vec::with_capacity(64);
    let mut encoder = BinEncoder::new(&mut bytes);
    encoder.set_name_encoding(NameEncoding::Uncompressed);
    value
        .emit(&mut encoder)
        .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;
    Ok(bytes)
}

fn wire_name(name: &Name) -> Result<Vec<u8>, UpstreamError> {
    uncompressed(name)
}

fn wire_question(query: &Query) -> Result<WireQuestion, UpstreamError> {
    Ok(WireQuestion {
        name: wire_name(query.name())?,
        qtype: u16::from(query.query_type()),
        qclass: u16::from(query.query_class()),
    })
}

fn wire_record(record: &Record) -> Result<WireRecord, UpstreamError> {
    Ok(WireRecord {
        name: wire_name(record.name())?,
        rr_type: u16::from(record.record_type()),
        class: u16::from(record.dns_class()),
        ttl: record.ttl(),
        rdata: uncompressed(record.data())?,
    })
}
