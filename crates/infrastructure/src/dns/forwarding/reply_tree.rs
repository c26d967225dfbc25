//! Conversion of parsed replies into the response tree the engine decodes.

use super::response_parser::{ParsedReply, WireRecord};
use ferrous_lookup_domain::response::fields;
use ferrous_lookup_domain::{AddressFamily, Dict, ResponseValue, StatusCode};

const TYPE_A: u16 = 1;
const TYPE_AAAA: u16 = 28;

mod header_fields {
    pub const ID: &str = "id";
    pub const RCODE: &str = "rcode";
    pub const AD: &str = "ad";
    pub const TC: &str = "tc";
    pub const QNAME: &str = "qname";
    pub const QTYPE: &str = "qtype";
    pub const QCLASS: &str = "qclass";
}

pub fn record_value(record: &WireRecord) -> ResponseValue {
    ResponseValue::dict([
        (fields::NAME, ResponseValue::bytes(record.name.clone())),
        (fields::TYPE, ResponseValue::from(record.rr_type)),
        (fields::CLASS, ResponseValue::from(record.class)),
        (fields::TTL, ResponseValue::from(record.ttl)),
        (
            fields::RDATA,
            ResponseValue::dict([(fields::RDATA_RAW, ResponseValue::bytes(record.rdata.clone()))]),
        ),
    ])
}

pub fn reply_value(reply: &ParsedReply) -> ResponseValue {
    let mut dict = Dict::new();

    dict.insert(
        fields::HEADER.to_string(),
        ResponseValue::dict([
            (header_fields::ID, ResponseValue::from(reply.id)),
            (header_fields::RCODE, ResponseValue::from(u32::from(reply.rcode_value))),
            (header_fields::AD, ResponseValue::from(reply.authenticated)),
            (header_fields::TC, ResponseValue::from(reply.truncated)),
        ]),
    );

    if let Some(question) = &reply.question {
        dict.insert(
            fields::QUESTION.to_string(),
            ResponseValue::dict([
                (header_fields::QNAME, ResponseValue::bytes(question.name.clone())),
                (header_fields::QTYPE, ResponseValue::from(question.qtype)),
                (header_fields::QCLASS, ResponseValue::from(question.qclass)),
            ]),
        );
    }

    dict.insert(
        fields::ANSWER.to_string(),
        ResponseValue::list(reply.answers.iter().map(record_value)),
    );
    dict.insert(
        fields::AUTHORITY.to_string(),
        ResponseValue::list(reply.authority.iter().map(record_value)),
    );

    ResponseValue::Dict(dict)
}

/// Address entries for every A and AAAA answer, in reply order.
pub fn address_answers(replies: &[ParsedReply]) -> Vec<ResponseValue> {
    replies
        .iter()
        .flat_map(|reply| reply.answers.iter())
        .filter_map(|record| {
            let family = match record.rr_type {
                TYPE_A => AddressFamily::IPv4,
                TYPE_AAAA => AddressFamily::IPv6,
                _ => return None,
            };
            (record.rdata.len() == family.address_len()).then(|| {
                ResponseValue::dict([
                    (fields::ADDRESS_TYPE, ResponseValue::bytes(family.tag().as_bytes())),
                    (fields::ADDRESS_DATA, ResponseValue::bytes(record.rdata.clone())),
                ])
            })
        })
        .collect()
}

pub fn response_tree(status: u32, replies: &[ParsedReply], with_addresses: bool) -> ResponseValue {
    let mut dict = Dict::new();
    dict.insert(fields::STATUS.to_string(), ResponseValue::from(status));
    dict.insert(
        fields::REPLIES_TREE.to_string(),
        ResponseValue::list(replies.iter().map(reply_value)),
    );
    if with_addresses {
        dict.insert(
            fields::JUST_ADDRESS_ANSWERS.to_string(),
            ResponseValue::List(address_answers(replies)),
        );
    }
    ResponseValue::Dict(dict)
}

pub fn status_only(status: u32) -> ResponseValue {
    ResponseValue::dict([(fields::STATUS, ResponseValue::from(status))])
}

pub fn all_timeout() -> ResponseValue {
    status_only(StatusCode::ALL_TIMEOUT)
}
