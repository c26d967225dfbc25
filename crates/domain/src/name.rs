//! Domain name conversions between presentation and uncompressed wire form.

use crate::errors::NameError;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// Converts a presentation-form name to uncompressed wire labels.
///
/// A trailing dot is optional. `\.`, `\\` and `\DDD` escapes are honoured.
/// `"."` is the root name.
pub fn to_wire(name: &str) -> Result<Vec<u8>, NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name == "." {
        return Ok(vec![0]);
    }

    let mut wire = Vec::with_capacity(name.len() + 2);
    let mut label: Vec<u8> = Vec::with_capacity(MAX_LABEL_LEN);
    let mut bytes = name.bytes().peekable();
    let mut terminated = false;

    while let Some(b) = bytes.next() {
        match b {
            b'.' => {
                push_label(&mut wire, &label)?;
                label.clear();
                if bytes.peek().is_none() {
                    terminated = true;
                }
            }
            b'\\' => {
                let escaped = bytes.next().ok_or(NameError::BadEscape)?;
                if escaped.is_ascii_digit() {
                    let d2 = bytes.next().filter(u8::is_ascii_digit);
                    let d3 = bytes.next().filter(u8::is_ascii_digit);
                    let (d2, d3) = d2.zip(d3).ok_or(NameError::BadEscape)?;
                    let value = u32::from(escaped - b'0') * 100
                        + u32::from(d2 - b'0') * 10
                        + u32::from(d3 - b'0');
                    let octet = u8::try_from(value).map_err(|_| NameError::BadEscape)?;
                    label.push(octet);
                } else {
                    label.push(escaped);
                }
            }
            other => label.push(other),
        }
    }

    if !terminated {
        push_label(&mut wire, &label)?;
    }
    wire.push(0);

    if wire.len() > MAX_NAME_LEN {
        return Err(NameError::NameTooLong(wire.len()));
    }
    Ok(wire)
}

fn push_label(wire: &mut Vec<u8>, label: &[u8]) -> Result<(), NameError> {
    if label.is_empty() {
        return Err(NameError::EmptyLabel);
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(NameError::LabelTooLong(label.len()));
    }
    wire.push(label.len() as u8);
    wire.extend_from_slice(label);
    Ok(())
}

/// Converts uncompressed wire labels to a fully-qualified presentation name
/// with a trailing dot.
pub fn wire_to_fqdn(wire: &[u8]) -> Result<String, NameError> {
    if wire.len() > MAX_NAME_LEN {
        return Err(NameError::NameTooLong(wire.len()));
    }

    let mut out = String::with_capacity(wire.len() + 1);
    let mut pos = 0;

    loop {
        let len = *wire.get(pos).ok_or(NameError::Truncated)? as usize;
        pos += 1;

        if len == 0 {
            break;
        }
        if len & 0xC0 == 0xC0 {
            return Err(NameError::CompressionPointer);
        }
        if len > MAX_LABEL_LEN {
            return Err(NameError::LabelTooLong(len));
        }

        let label = wire.get(pos..pos + len).ok_or(NameError::Truncated)?;
        pos += len;

        for &b in label {
            match b {
                b'.' | b'\\' => {
                    out.push('\\');
                    out.push(b as char);
                }
                0x21..=0x7e => out.push(b as char),
                _ => out.push_str(&format!("\\{:03}", b)),
            }
        }
        out.push('.');
    }

    if pos != wire.len() {
        return Err(NameError::TrailingData(wire.len() - pos));
    }
    if out.is_empty() {
        out.push('.');
    }
    Ok(out)
}

/// Checks that `name` is acceptable as a query name.
pub fn validate(name: &str) -> Result<(), NameError> {
    to_wire(name).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wire_simple() {
        assert_eq!(
            to_wire("www.example.com").unwrap(),
            b"\x03www\x07example\x03com\x00".to_vec()
        );
    }

    #[test]
    fn test_trailing_dot_is_optional() {
        assert_eq!(to_wire("example.com.").unwrap(), to_wire("example.com").unwrap());
    }

    #[test]
    fn test_root() {
        assert_eq!(to_wire(".").unwrap(), vec![0]);
        assert_eq!(wire_to_fqdn(&[0]).unwrap(), ".");
    }

    #[test]
    fn test_escapes_round_trip() {
        let wire = to_wire("a\\.b.c\\032d").unwrap();
        assert_eq!(wire, b"\x03a.b\x03c d\x00".to_vec());
        assert_eq!(wire_to_fqdn(&wire).unwrap(), "a\\.b.c\\032d.");
    }

    #[test]
    fn test_wire_to_fqdn_rejects_pointer() {
        assert_eq!(
            wire_to_fqdn(&[0xC0, 0x0C]),
            Err(NameError::CompressionPointer)
        );
    }

    #[test]
    fn test_wire_to_fqdn_rejects_trailing_data() {
        assert_eq!(
            wire_to_fqdn(b"\x03com\x00\x01"),
            Err(NameError::TrailingData(1))
        );
    }
}
