use super::ResponseValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const EXTENSION_TRUE: u32 = 1000;
pub const EXTENSION_FALSE: u32 = 1001;

pub const DNSSEC_RETURN_ONLY_SECURE: &str = "dnssec_return_only_secure";
pub const RETURN_BOTH_V4_AND_V6: &str = "return_both_v4_and_v6";

/// Extension options passed through to the resolution library untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extensions(BTreeMap<String, ResponseValue>);

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ResponseValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn enable(&mut self, name: impl Into<String>) {
        self.set(name, EXTENSION_TRUE);
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ResponseValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ResponseValue> {
        self.0.get(name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).and_then(ResponseValue::as_int) == Some(EXTENSION_TRUE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResponseValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks extension names and the values of boolean extensions
    /// (`dnssec_*`, `return_*`), which must be `EXTENSION_TRUE` or
    /// `EXTENSION_FALSE`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in &self.0 {
            let valid_name = !name.is_empty()
                && name
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
            if !valid_name {
                return Err(format!("invalid extension name '{}'", name));
            }

            let boolean = name.starts_with("dnssec_") || name.starts_with("return_");
            if boolean && !matches!(value.as_int(), Some(EXTENSION_TRUE | EXTENSION_FALSE)) {
                return Err(format!(
                    "extension '{}' must be {} or {}",
                    name, EXTENSION_TRUE, EXTENSION_FALSE
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_and_query() {
        let mut ext = Extensions::new();
        ext.enable(DNSSEC_RETURN_ONLY_SECURE);
        assert!(ext.is_enabled(DNSSEC_RETURN_ONLY_SECURE));
        assert!(!ext.is_enabled(RETURN_BOTH_V4_AND_V6));
    }

    #[test]
    fn test_validate_rejects_bad_boolean() {
        let ext = Extensions::new().with(RETURN_BOTH_V4_AND_V6, 1u32);
        assert!(ext.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_name() {
        let ext = Extensions::new().with("Not-Valid", 1u32);
        assert!(ext.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_opaque_values() {
        let ext = Extensions::new()
            .with("specify_class", 1u32)
            .with(DNSSEC_RETURN_ONLY_SECURE, EXTENSION_FALSE);
        assert!(ext.validate().is_ok());
    }
}
