use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Opaque byte string leaf of a response tree.
///
/// Renders as text when every octet is printable ASCII, otherwise as `0x`
/// followed by lowercase hex. Text that itself starts with `0x` is rendered
/// as hex so the form parses back to the same octets.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Bindata(Vec<u8>);

impl Bindata {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(data.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn is_text(&self) -> bool {
        self.0.iter().all(|b| (0x20..=0x7e).contains(b)) && !self.0.starts_with(b"0x")
    }

    /// Parses the rendered form back into octets.
    pub fn parse(s: &str) -> Self {
        if let Some(hex) = s.strip_prefix("0x") {
            if let Some(bytes) = decode_hex(hex) {
                return Self(bytes);
            }
        }
        Self(s.as_bytes().to_vec())
    }
}

pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}

impl fmt::Display for Bindata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_text() {
            // is_text guarantees ASCII
            f.write_str(&String::from_utf8_lossy(&self.0))
        } else {
            write!(f, "0x{}", encode_hex(&self.0))
        }
    }
}

impl fmt::Debug for Bindata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<bindata {}>", self)
    }
}

impl From<Vec<u8>> for Bindata {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for Bindata {
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

impl Serialize for Bindata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct BindataVisitor;

impl<'de> Visitor<'de> for BindataVisitor {
    type Value = Bindata;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or 0x-prefixed hex string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Bindata, E> {
        Ok(Bindata::parse(v))
    }
}

impl<'de> Deserialize<'de> for Bindata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(BindataVisitor)
    }
}
