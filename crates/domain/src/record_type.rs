use std::fmt;
use std::str::FromStr;

/// Well-known RR types. Queries carry the raw `u16` code; this enum only
/// gives codes a mnemonic for parsing and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    SRV,
    NAPTR,
    DNAME,
    OPT,
    DS,
    SSHFP,
    RRSIG,
    NSEC,
    DNSKEY,
    NSEC3,
    NSEC3PARAM,
    TLSA,
    CDS,
    CDNSKEY,
    SVCB,
    HTTPS,
    TKEY,
    TSIG,
    ANY,
    CAA,
}

const TABLE: &[(RecordType, u16, &str)] = &[
    (RecordType::A, 1, "A"),
    (RecordType::NS, 2, "NS"),
    (RecordType::CNAME, 5, "CNAME"),
    (RecordType::SOA, 6, "SOA"),
    (RecordType::PTR, 12, "PTR"),
    (RecordType::MX, 15, "MX"),
    (RecordType::TXT, 16, "TXT"),
    (RecordType::AAAA, 28, "AAAA"),
    (RecordType::SRV, 33, "SRV"),
    (RecordType::NAPTR, 35, "NAPTR"),
    (RecordType::DNAME, 39, "DNAME"),
    (RecordType::OPT, 41, "OPT"),
    (RecordType::DS, 43, "DS"),
    (RecordType::SSHFP, 44, "SSHFP"),
    (RecordType::RRSIG, 46, "RRSIG"),
    (RecordType::NSEC, 47, "NSEC"),
    (RecordType::DNSKEY, 48, "DNSKEY"),
    (RecordType::NSEC3, 50, "NSEC3"),
    (RecordType::NSEC3PARAM, 51, "NSEC3PARAM"),
    (RecordType::TLSA, 52, "TLSA"),
    (RecordType::CDS, 59, "CDS"),
    (RecordType::CDNSKEY, 60, "CDNSKEY"),
    (RecordType::SVCB, 64, "SVCB"),
    (RecordType::HTTPS, 65, "HTTPS"),
    (RecordType::TKEY, 249, "TKEY"),
    (RecordType::TSIG, 250, "TSIG"),
    (RecordType::ANY, 255, "ANY"),
    (RecordType::CAA, 257, "CAA"),
];

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        TABLE
            .iter()
            .find(|(rt, _, _)| rt == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("UNKNOWN")
    }

    pub fn to_u16(&self) -> u16 {
        TABLE
            .iter()
            .find(|(rt, _, _)| rt == self)
            .map(|(_, code, _)| *code)
            .unwrap_or(0)
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(rt, _, _)| *rt)
    }

    /// Types that cannot be asked for in a plain query: reserved 0, the EDNS
    /// pseudo-record and the transaction-security meta types.
    pub fn is_query_forbidden(code: u16) -> bool {
        matches!(code, 0 | 41 | 249 | 250)
    }
}

/// Mnemonic for display, falling back to the RFC 3597 `TYPEnnn` form.
pub fn type_mnemonic(code: u16) -> String {
    match RecordType::from_u16(code) {
        Some(rt) => rt.as_str().to_string(),
        None => format!("TYPE{}", code),
    }
}

/// Parses a query type given as a number, a mnemonic or `TYPEnnn`.
pub fn parse_type_code(s: &str) -> Result<u16, String> {
    if let Ok(code) = s.parse::<u16>() {
        return Ok(code);
    }
    let upper = s.to_ascii_uppercase();
    if let Some(num) = upper.strip_prefix("TYPE") {
        if let Ok(code) = num.parse::<u16>() {
            return Ok(code);
        }
    }
    upper.parse::<RecordType>().map(|rt| rt.to_u16())
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        TABLE
            .iter()
            .find(|(_, _, name)| *name == upper)
            .map(|(rt, _, _)| *rt)
            .ok_or_else(|| format!("Unknown record type: {}", s))
    }
}
