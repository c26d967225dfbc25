//! Resolution library answering from canned response trees.
//!
//! Fixture files are JSON:
//!
//! ```json
//! { "fixtures": [
//!     { "name": "example.com", "response": { "status": 900, "just_address_answers": [] } },
//!     { "name": "example.com", "qtype": "MX", "response": { "status": 901 } },
//!     { "name": "broken.test", "transport_error": "upstream crashed" }
//! ] }
//! ```
//!
//! An entry without `qtype` answers address queries.

use crate::errors::FixtureError;
use async_trait::async_trait;
use ferrous_lookup_application::ports::{ResolutionLibrary, ResolutionRequest};
use ferrous_lookup_domain::record_type::parse_type_code;
use ferrous_lookup_domain::response::fields;
use ferrous_lookup_domain::{QueryKind, ResponseValue, StatusCode, TransportFailure};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    fixtures: Vec<FixtureEntry>,
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    name: String,
    #[serde(default)]
    qtype: Option<String>,
    #[serde(default)]
    response: Option<ResponseValue>,
    #[serde(default)]
    transport_error: Option<String>,
}

#[derive(Debug, Clone)]
enum Canned {
    Response(ResponseValue),
    TransportError(String),
}

#[derive(Debug, Default)]
pub struct FixtureLibrary {
    entries: FxHashMap<(String, QueryKind), Canned>,
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

impl FixtureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FixtureError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let library = Self::from_json(&content)?;
        info!(path = %path.display(), fixtures = library.len(), "Fixture library loaded");
        Ok(library)
    }

    pub fn from_json(content: &str) -> Result<Self, FixtureError> {
        let file: FixtureFile =
            serde_json::from_str(content).map_err(|e| FixtureError::Parse(e.to_string()))?;

        let mut library = Self::new();
        for entry in file.fixtures {
            let kind = match &entry.qtype {
                None => QueryKind::Address,
                Some(qtype) => {
                    QueryKind::General(parse_type_code(qtype).map_err(|reason| {
                        FixtureError::Invalid {
                            name: entry.name.clone(),
                            reason,
                        }
                    })?)
                }
            };

            let canned = match (entry.response, entry.transport_error) {
                (Some(response), None) => Canned::Response(response),
                (None, Some(message)) => Canned::TransportError(message),
                _ => {
                    return Err(FixtureError::Invalid {
                        name: entry.name,
                        reason: "exactly one of 'response' or 'transport_error' is required"
                            .to_string(),
                    })
                }
            };

            library.entries.insert((normalize(&entry.name), kind), canned);
        }

        Ok(library)
    }

    pub fn insert(&mut self, name: &str, kind: QueryKind, response: ResponseValue) {
        self.entries
            .insert((normalize(name), kind), Canned::Response(response));
    }

    pub fn insert_transport_error(&mut self, name: &str, kind: QueryKind, message: &str) {
        self.entries.insert(
            (normalize(name), kind),
            Canned::TransportError(message.to_string()),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ResolutionLibrary for FixtureLibrary {
    async fn resolve(&self, request: ResolutionRequest) -> Result<ResponseValue, TransportFailure> {
        let key = (normalize(&request.name), request.kind);

        match self.entries.get(&key) {
            Some(Canned::Response(response)) => Ok(response.clone()),
            Some(Canned::TransportError(message)) => Err(TransportFailure::error(message.clone())),
            None => {
                debug!(name = %request.name, kind = %request.kind, "No fixture, answering NoName");
                Ok(ResponseValue::dict([(
                    fields::STATUS,
                    ResponseValue::from(StatusCode::NO_NAME),
                )]))
            }
        }
    }
}
