use ferrous_lookup_domain::name::to_wire;
use ferrous_lookup_domain::response::fields;
use ferrous_lookup_domain::{ResponseValue, StatusCode};

pub fn status_only(code: u32) -> ResponseValue {
    ResponseValue::dict([(fields::STATUS, ResponseValue::from(code))])
}

pub fn ipv4(octets: [u8; 4]) -> ResponseValue {
    address_entry("IPv4", &octets)
}

pub fn ipv6(octets: [u8; 16]) -> ResponseValue {
    address_entry("IPv6", &octets)
}

pub fn address_entry(family: &str, data: &[u8]) -> ResponseValue {
    ResponseValue::dict([
        (fields::ADDRESS_TYPE, ResponseValue::bytes(family.as_bytes())),
        (fields::ADDRESS_DATA, ResponseValue::bytes(data)),
    ])
}

pub fn address_response(entries: Vec<ResponseValue>) -> ResponseValue {
    ResponseValue::dict([
        (fields::STATUS, ResponseValue::from(StatusCode::GOOD)),
        (fields::JUST_ADDRESS_ANSWERS, ResponseValue::List(entries)),
        (fields::REPLIES_TREE, ResponseValue::list([])),
    ])
}

pub fn record(owner: &str, type_code: u16, rdata: &[u8]) -> ResponseValue {
    ResponseValue::dict([
        (fields::NAME, ResponseValue::bytes(to_wire(owner).unwrap())),
        (fields::TYPE, ResponseValue::from(type_code)),
        (fields::CLASS, ResponseValue::from(1u16)),
        (fields::TTL, ResponseValue::from(3600u32)),
        (
            fields::RDATA,
            ResponseValue::dict([(fields::RDATA_RAW, ResponseValue::bytes(rdata))]),
        ),
    ])
}

pub fn record_without_rdata(owner: &str, type_code: u16) -> ResponseValue {
    ResponseValue::dict([
        (fields::NAME, ResponseValue::bytes(to_wire(owner).unwrap())),
        (fields::TYPE, ResponseValue::from(type_code)),
        (fields::CLASS, ResponseValue::from(1u16)),
        (fields::TTL, ResponseValue::from(3600u32)),
    ])
}

pub fn reply(answers: Vec<ResponseValue>) -> ResponseValue {
    ResponseValue::dict([(fields::ANSWER, ResponseValue::List(answers))])
}

pub fn records_response(replies: Vec<ResponseValue>) -> ResponseValue {
    ResponseValue::dict([
        (fields::STATUS, ResponseValue::from(StatusCode::GOOD)),
        (fields::REPLIES_TREE, ResponseValue::List(replies)),
    ])
}
