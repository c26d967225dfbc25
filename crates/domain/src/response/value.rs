use super::Bindata;
use crate::errors::DecodeFault;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type Dict = BTreeMap<String, ResponseValue>;

/// Hierarchical response value handed over by a resolution library.
///
/// Leaves are integers or bindata; inner nodes are lists and string-keyed
/// dicts. The engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Int(u32),
    Bytes(Bindata),
    List(Vec<ResponseValue>),
    Dict(Dict),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Bytes,
    List,
    Dict,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Int => "an integer",
            ValueKind::Bytes => "bindata",
            ValueKind::List => "a list",
            ValueKind::Dict => "a dict",
        };
        f.write_str(s)
    }
}

impl ResponseValue {
    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, ResponseValue)>) -> Self {
        ResponseValue::Dict(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list(items: impl IntoIterator<Item = ResponseValue>) -> Self {
        ResponseValue::List(items.into_iter().collect())
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        ResponseValue::Bytes(Bindata::new(data))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ResponseValue::Int(_) => ValueKind::Int,
            ResponseValue::Bytes(_) => ValueKind::Bytes,
            ResponseValue::List(_) => ValueKind::List,
            ResponseValue::Dict(_) => ValueKind::Dict,
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        match self {
            ResponseValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ResponseValue::Bytes(b) => Some(b.as_bytes()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ResponseValue]> {
        match self {
            ResponseValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            ResponseValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a dict.
    pub fn get(&self, key: &str) -> Option<&ResponseValue> {
        self.as_dict().and_then(|d| d.get(key))
    }

    /// Fails with `WrongType` unless this value is a dict. `field` names the
    /// place the value was taken from.
    pub fn expect_dict(&self, field: &'static str) -> Result<&ResponseValue, DecodeFault> {
        match self {
            ResponseValue::Dict(_) => Ok(self),
            _ => Err(DecodeFault::WrongType {
                field,
                expected: ValueKind::Dict,
            }),
        }
    }

    pub fn field(&self, field: &'static str) -> Result<&ResponseValue, DecodeFault> {
        match self {
            ResponseValue::Dict(d) => d.get(field).ok_or(DecodeFault::MissingField(field)),
            _ => Err(DecodeFault::WrongType {
                field,
                expected: ValueKind::Dict,
            }),
        }
    }

    pub fn int_field(&self, field: &'static str) -> Result<u32, DecodeFault> {
        let value = self.field(field)?;
        value.as_int().ok_or(DecodeFault::WrongType {
            field,
            expected: ValueKind::Int,
        })
    }

    pub fn bytes_field(&self, field: &'static str) -> Result<&[u8], DecodeFault> {
        let value = self.field(field)?;
        value.as_bytes().ok_or(DecodeFault::WrongType {
            field,
            expected: ValueKind::Bytes,
        })
    }

    pub fn list_field(&self, field: &'static str) -> Result<&[ResponseValue], DecodeFault> {
        let value = self.field(field)?;
        value.as_list().ok_or(DecodeFault::WrongType {
            field,
            expected: ValueKind::List,
        })
    }

    pub fn dict_field(&self, field: &'static str) -> Result<&ResponseValue, DecodeFault> {
        self.field(field)?.expect_dict(field)
    }

    /// Like `list_field`, but an absent key yields `None`.
    pub fn optional_list_field(
        &self,
        field: &'static str,
    ) -> Result<Option<&[ResponseValue]>, DecodeFault> {
        match self.list_field(field) {
            Ok(list) => Ok(Some(list)),
            Err(DecodeFault::MissingField(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl From<u32> for ResponseValue {
    fn from(v: u32) -> Self {
        ResponseValue::Int(v)
    }
}

impl From<u16> for ResponseValue {
    fn from(v: u16) -> Self {
        ResponseValue::Int(u32::from(v))
    }
}

impl From<bool> for ResponseValue {
    fn from(v: bool) -> Self {
        ResponseValue::Int(u32::from(v))
    }
}

impl From<&str> for ResponseValue {
    fn from(v: &str) -> Self {
        ResponseValue::bytes(v.as_bytes())
    }
}

impl From<Vec<u8>> for ResponseValue {
    fn from(v: Vec<u8>) -> Self {
        ResponseValue::bytes(v)
    }
}

impl From<Vec<ResponseValue>> for ResponseValue {
    fn from(v: Vec<ResponseValue>) -> Self {
        ResponseValue::List(v)
    }
}

impl From<Dict> for ResponseValue {
    fn from(v: Dict) -> Self {
        ResponseValue::Dict(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResponseValue {
        ResponseValue::dict([
            ("status", ResponseValue::from(900u32)),
            ("name", ResponseValue::from("example")),
            ("items", ResponseValue::list([ResponseValue::from(1u32)])),
        ])
    }

    #[test]
    fn test_typed_accessors() {
        let value = sample();
        assert_eq!(value.int_field("status"), Ok(900));
        assert_eq!(value.bytes_field("name"), Ok(&b"example"[..]));
        assert_eq!(value.list_field("items").map(|l| l.len()), Ok(1));
    }

    #[test]
    fn test_missing_and_wrong_type() {
        let value = sample();
        assert_eq!(
            value.int_field("absent"),
            Err(DecodeFault::MissingField("absent"))
        );
        assert_eq!(
            value.list_field("status"),
            Err(DecodeFault::WrongType {
                field: "status",
                expected: ValueKind::List
            })
        );
    }

    #[test]
    fn test_optional_list_field() {
        let value = sample();
        assert_eq!(value.optional_list_field("absent"), Ok(None));
        assert!(value.optional_list_field("status").is_err());
    }
}
