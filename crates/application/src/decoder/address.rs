use ferrous_lookup_domain::response::fields;
use ferrous_lookup_domain::{
    AddressFamily, AddressFamilyFilter, DecodeFault, DecodedAddress, QueryFailure, ResponseValue,
};
use std::net::IpAddr;

/// Decodes `just_address_answers` in answer order, keeping only entries the
/// family filter admits. Any malformed entry aborts the whole decode, even
/// one the filter would have dropped.
pub fn decode_addresses(
    raw: &ResponseValue,
    filter: AddressFamilyFilter,
) -> Result<Vec<DecodedAddress>, QueryFailure> {
    let entries = match raw.optional_list_field(fields::JUST_ADDRESS_ANSWERS)? {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Err(QueryFailure::NoAddressesFound),
    };

    let mut addresses = Vec::with_capacity(entries.len());
    for entry in entries {
        let address = decode_entry(entry)?;
        if admits(filter, address.family) {
            addresses.push(address);
        }
    }
    Ok(addresses)
}

fn decode_entry(entry: &ResponseValue) -> Result<DecodedAddress, DecodeFault> {
    let tag = entry.bytes_field(fields::ADDRESS_TYPE)?;
    let family = AddressFamily::from_tag(tag)
        .ok_or_else(|| DecodeFault::UnknownAddressFamily(String::from_utf8_lossy(tag).into_owned()))?;

    let data = entry.bytes_field(fields::ADDRESS_DATA)?;
    let malformed = || DecodeFault::MalformedAddressData {
        family: family.tag(),
        len: data.len(),
    };
    let address = match family {
        AddressFamily::IPv4 => <[u8; 4]>::try_from(data)
            .map(IpAddr::from)
            .map_err(|_| malformed())?,
        AddressFamily::IPv6 => <[u8; 16]>::try_from(data)
            .map(IpAddr::from)
            .map_err(|_| malformed())?,
    };
    Ok(DecodedAddress::new(address))
}

fn admits(filter: AddressFamilyFilter, family: AddressFamily) -> bool {
    match filter {
        AddressFamilyFilter::Any => true,
        AddressFamilyFilter::V4Only => family == AddressFamily::IPv4,
        AddressFamilyFilter::V6Only => family == AddressFamily::IPv6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: &str, data: &[u8]) -> ResponseValue {
        ResponseValue::dict([
            (fields::ADDRESS_TYPE, ResponseValue::bytes(tag.as_bytes())),
            (fields::ADDRESS_DATA, ResponseValue::bytes(data)),
        ])
    }

    fn response(entries: Vec<ResponseValue>) -> ResponseValue {
        ResponseValue::dict([
            (fields::STATUS, ResponseValue::from(900u32)),
            (fields::JUST_ADDRESS_ANSWERS, ResponseValue::List(entries)),
        ])
    }

    #[test]
    fn test_ipv6_presentation() {
        let mut v6 = [0u8; 16];
        v6[0] = 0x20;
        v6[1] = 0x01;
        v6[2] = 0x0d;
        v6[3] = 0xb8;
        v6[15] = 1;
        let raw = response(vec![entry("IPv6", &v6)]);

        let addresses = decode_addresses(&raw, AddressFamilyFilter::Any).unwrap();
        assert_eq!(addresses[0].presentation(), "2001:db8::1");
        assert_eq!(addresses[0].family, AddressFamily::IPv6);
    }

    #[test]
    fn test_missing_list_is_no_addresses() {
        let raw = ResponseValue::dict([(fields::STATUS, ResponseValue::from(900u32))]);
        assert_eq!(
            decode_addresses(&raw, AddressFamilyFilter::Any),
            Err(QueryFailure::NoAddressesFound)
        );
    }

    #[test]
    fn test_unknown_family_aborts() {
        let raw = response(vec![entry("IPv4", &[192, 0, 2, 1]), entry("IPX", &[1, 2])]);
        assert_eq!(
            decode_addresses(&raw, AddressFamilyFilter::Any),
            Err(QueryFailure::Decode(DecodeFault::UnknownAddressFamily(
                "IPX".to_string()
            )))
        );
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        let raw = response(vec![entry("IPv4", &[192, 0, 2])]);
        assert_eq!(
            decode_addresses(&raw, AddressFamilyFilter::V6Only),
            Err(QueryFailure::Decode(DecodeFault::MalformedAddressData {
                family: "IPv4",
                len: 3,
            }))
        );
    }
}
