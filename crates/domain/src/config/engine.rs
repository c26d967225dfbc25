use super::errors::ConfigError;
use crate::query::AddressFamilyFilter;
use crate::response::extensions::DNSSEC_RETURN_ONLY_SECURE;
use crate::response::Extensions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Only return DNSSEC secured answers, for every query.
    #[serde(default)]
    pub security_only: bool,

    /// Family filter applied to address queries that don't set their own.
    #[serde(default)]
    pub address_family: AddressFamilyFilter,

    /// Upper bound on transactions in flight at once.
    #[serde(default = "default_max_outstanding")]
    pub max_outstanding: usize,

    #[serde(default)]
    pub extensions: Extensions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            security_only: false,
            address_family: AddressFamilyFilter::Any,
            max_outstanding: default_max_outstanding(),
            extensions: Extensions::default(),
        }
    }
}

impl EngineConfig {
    /// Whether every query is security-only, set either directly or through
    /// the `dnssec_return_only_secure` extension.
    pub fn secure_by_default(&self) -> bool {
        self.security_only || self.extensions.is_enabled(DNSSEC_RETURN_ONLY_SECURE)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_outstanding == 0 {
            return Err(ConfigError::Validation(
                "max_outstanding must be at least 1".to_string(),
            ));
        }
        self.extensions.validate().map_err(ConfigError::Validation)
    }
}

fn default_max_outstanding() -> usize {
    1024
}
