use crate::record_type::type_mnemonic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// A and AAAA lookup reported as an address list.
    Address,
    /// Lookup of one RR type reported as raw records.
    General(u16),
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Address => f.write_str("address"),
            QueryKind::General(code) => write!(f, "general/{}", type_mnemonic(*code)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamilyFilter {
    #[default]
    Any,
    #[serde(rename = "v4")]
    V4Only,
    #[serde(rename = "v6")]
    V6Only,
}

impl AddressFamilyFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressFamilyFilter::Any => "any",
            AddressFamilyFilter::V4Only => "v4",
            AddressFamilyFilter::V6Only => "v6",
        }
    }
}

impl FromStr for AddressFamilyFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(AddressFamilyFilter::Any),
            "v4" | "ipv4" => Ok(AddressFamilyFilter::V4Only),
            "v6" | "ipv6" => Ok(AddressFamilyFilter::V6Only),
            _ => Err(format!("Unknown address family filter: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryFilters {
    pub address_family: AddressFamilyFilter,
    pub security_only: bool,
}

impl QueryFilters {
    pub fn new(address_family: AddressFamilyFilter, security_only: bool) -> Self {
        Self {
            address_family,
            security_only,
        }
    }

    pub fn v4_only() -> Self {
        Self::new(AddressFamilyFilter::V4Only, false)
    }

    pub fn v6_only() -> Self {
        Self::new(AddressFamilyFilter::V6Only, false)
    }

    pub fn secure(mut self) -> Self {
        self.security_only = true;
        self
    }
}
