use crate::errors::DecodeFault;
use crate::record_type::type_mnemonic;
use crate::response::bindata::encode_hex;
use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    IPv4,
    IPv6,
}

impl AddressFamily {
    /// The `address_type` tag used in response trees.
    pub fn tag(&self) -> &'static str {
        match self {
            AddressFamily::IPv4 => "IPv4",
            AddressFamily::IPv6 => "IPv6",
        }
    }

    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"IPv4" => Some(AddressFamily::IPv4),
            b"IPv6" => Some(AddressFamily::IPv6),
            _ => None,
        }
    }

    pub fn address_len(&self) -> usize {
        match self {
            AddressFamily::IPv4 => 4,
            AddressFamily::IPv6 => 16,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    pub family: AddressFamily,
    pub address: IpAddr,
}

impl DecodedAddress {
    pub fn new(address: IpAddr) -> Self {
        let family = match address {
            IpAddr::V4(_) => AddressFamily::IPv4,
            IpAddr::V6(_) => AddressFamily::IPv6,
        };
        Self { family, address }
    }

    /// Dotted quad for IPv4, RFC 5952 colon-hex for IPv6.
    pub fn presentation(&self) -> String {
        self.address.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    /// Fully-qualified owner name with trailing dot.
    pub owner: String,
    pub type_code: u16,
    pub rdata: Vec<u8>,
}

impl DecodedRecord {
    pub fn type_mnemonic(&self) -> String {
        type_mnemonic(self.type_code)
    }

    pub fn rdata_hex(&self) -> String {
        encode_hex(&self.rdata)
    }
}

/// A decode fault scoped to one reply (`record` is `None`) or one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFault {
    pub reply: usize,
    pub record: Option<usize>,
    pub fault: DecodeFault,
}

impl fmt::Display for RecordFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(record) => write!(f, "reply {} record {}: {}", self.reply, record, self.fault),
            None => write!(f, "reply {}: {}", self.reply, self.fault),
        }
    }
}

/// Records decoded from every reply, in reply order then answer order,
/// with the faults of the records that had to be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedRecords {
    pub records: Vec<DecodedRecord>,
    pub faults: Vec<RecordFault>,
}

impl DecodedRecords {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}
