#![allow(dead_code)]
use ferrous_lookup_domain::response::fields;
use ferrous_lookup_domain::{ResponseValue, StatusCode};

pub fn address_entry(family: &str, data: &[u8]) -> ResponseValue {
    ResponseValue::dict([
        (fields::ADDRESS_TYPE, ResponseValue::bytes(family.as_bytes())),
        (fields::ADDRESS_DATA, ResponseValue::bytes(data)),
    ])
}

pub fn record(owner_wire: &[u8], type_code: u16, rdata: &[u8]) -> ResponseValue {
    ResponseValue::dict([
        (fields::NAME, ResponseValue::bytes(owner_wire)),
        (fields::TYPE, ResponseValue::from(type_code)),
        (fields::CLASS, ResponseValue::from(1u16)),
        (fields::TTL, ResponseValue::from(300u32)),
        (
            fields::RDATA,
            ResponseValue::dict([(fields::RDATA_RAW, ResponseValue::bytes(rdata))]),
        ),
    ])
}

pub struct ResponseBuilder {
    status: u32,
    addresses: Vec<ResponseValue>,
    answers: Vec<ResponseValue>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            status: StatusCode::GOOD,
            addresses: Vec::new(),
            answers: Vec::new(),
        }
    }

    pub fn status(mut self, status: u32) -> Self {
        self.status = status;
        self
    }

    pub fn ipv4(mut self, octets: [u8; 4]) -> Self {
        self.addresses.push(address_entry("IPv4", &octets));
        self
    }

    pub fn ipv6(mut self, octets: [u8; 16]) -> Self {
        self.addresses.push(address_entry("IPv6", &octets));
        self
    }

    pub fn answer(mut self, owner_wire: &[u8], type_code: u16, rdata: &[u8]) -> Self {
        self.answers.push(record(owner_wire, type_code, rdata));
        self
    }

    pub fn build(self) -> ResponseValue {
        let reply = ResponseValue::dict([(fields::ANSWER, ResponseValue::List(self.answers))]);
        ResponseValue::dict([
            (fields::STATUS, ResponseValue::from(self.status)),
            (fields::JUST_ADDRESS_ANSWERS, ResponseValue::List(self.addresses)),
            (fields::REPLIES_TREE, ResponseValue::list([reply])),
        ])
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
