use async_trait::async_trait;
use ferrous_lookup_domain::{
    AddressFamilyFilter, Extensions, QueryKind, ResponseValue, TransportFailure,
};
use std::sync::Arc;

/// One lookup handed to the library: target name, what to ask for, and
/// the extension options in effect for this transaction.
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    pub name: Arc<str>,
    pub kind: QueryKind,
    /// Families an address lookup asks for; ignored by general lookups.
    pub address_family: AddressFamilyFilter,
    pub extensions: Extensions,
}

impl ResolutionRequest {
    pub fn new(name: impl Into<Arc<str>>, kind: QueryKind, extensions: Extensions) -> Self {
        Self {
            name: name.into(),
            kind,
            address_family: AddressFamilyFilter::Any,
            extensions,
        }
    }

    pub fn with_address_family(mut self, address_family: AddressFamilyFilter) -> Self {
        self.address_family = address_family;
        self
    }
}

/// The resolution library behind the engine. Whatever it returns becomes the
/// transaction's single terminal notification: `Ok` is a completed response
/// tree, `Err` a transport error.
#[async_trait]
pub trait ResolutionLibrary: Send + Sync {
    async fn resolve(&self, request: ResolutionRequest) -> Result<ResponseValue, TransportFailure>;
}
