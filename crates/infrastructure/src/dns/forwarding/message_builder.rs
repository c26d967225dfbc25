//! DNS query construction
//!
//! Questions are built with `hickory-proto`; an EDNS(0) OPT record is
//! appended by hand so the DO bit can be set for security-only lookups.

use crate::dns::transport::udp::MAX_UDP_RESPONSE_SIZE;
use crate::errors::UpstreamError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

const HEADER_LEN: usize = 12;
const AD_FLAG: u8 = 0x20;
const OPT_TYPE: u16 = 41;
const DO_FLAG: u16 = 0x8000;

#[derive(Debug, Clone)]
pub struct QueryMessage {
    pub id: u16,
    pub bytes: Vec<u8>,
}

pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds a recursive query for `domain` and `type_code`.
    ///
    /// With `dnssec_ok` the OPT record carries the DO bit and the header
    /// carries AD, asking the upstream to report whether it validated.
    pub fn build_query(
        domain: &str,
        type_code: u16,
        dnssec_ok: bool,
    ) -> Result<QueryMessage, UpstreamError> {
        let name = Name::from_str(domain).map_err(|e| {
            UpstreamError::QueryBuild(format!("invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::from(type_code));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut bytes = Self::serialize_message(&message)?;
        Self::append_opt(&mut bytes, dnssec_ok)?;
        if dnssec_ok {
            bytes[3] |= AD_FLAG;
        }

        Ok(QueryMessage { id, bytes })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, UpstreamError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            UpstreamError::QueryBuild(format!("failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    fn append_opt(bytes: &mut Vec<u8>, dnssec_ok: bool) -> Result<(), UpstreamError> {
        if bytes.len() < HEADER_LEN {
            return Err(UpstreamError::QueryBuild(
                "serialized message shorter than a header".to_string(),
            ));
        }

        let arcount = u16::from_be_bytes([bytes[10], bytes[11]]) + 1;
        bytes[10..12].copy_from_slice(&arcount.to_be_bytes());

        let flags = if dnssec_ok { DO_FLAG } else { 0 };

        bytes.push(0); // root owner
        bytes.extend_from_slice(&OPT_TYPE.to_be_bytes());
        bytes.extend_from_slice(&(MAX_UDP_RESPONSE_SIZE as u16).to_be_bytes());
        bytes.push(0); // extended rcode
        bytes.push(0); // version
        bytes.extend_from_slice(&flags.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt_flags(bytes: &[u8]) -> u16 {
        let len = bytes.len();
        u16::from_be_bytes([bytes[len - 4], bytes[len - 3]])
    }

    #[test]
    fn test_build_a_query() {
        let query = MessageBuilder::build_query("example.com", 1, false).unwrap();
        let bytes = &query.bytes;

        assert_eq!(u16::from_be_bytes([bytes[0], bytes[1]]), query.id);
        assert_eq!(bytes[2] & 0x01, 0x01, "RD flag should be set");
        assert_eq!(bytes[3] & AD_FLAG, 0);
        assert_eq!(u16::from_be_bytes([bytes[4], bytes[5]]), 1, "QDCOUNT");
        assert_eq!(u16::from_be_bytes([bytes[10], bytes[11]]), 1, "ARCOUNT");
        assert_eq!(opt_flags(bytes), 0);
    }

    #[test]
    fn test_question_carries_type_code() {
        let query = MessageBuilder::build_query("example.com.", 15, false).unwrap();
        let bytes = &query.bytes;

        let qname = b"\x07example\x03com\x00";
        assert_eq!(&bytes[12..12 + qname.len()], qname);
        let qtype_at = 12 + qname.len();
        assert_eq!(u16::from_be_bytes([bytes[qtype_at], bytes[qtype_at + 1]]), 15);
        assert_eq!(u16::from_be_bytes([bytes[qtype_at + 2], bytes[qtype_at + 3]]), 1);
    }

    #[test]
    fn test_dnssec_ok_sets_do_and_ad() {
        let query = MessageBuilder::build_query("example.com", 28, true).unwrap();

        assert_eq!(query.bytes[3] & AD_FLAG, AD_FLAG);
        assert_eq!(opt_flags(&query.bytes), DO_FLAG);
    }
}
