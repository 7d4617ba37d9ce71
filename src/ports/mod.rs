//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts
//! between the domain and the outside world. Adapters implement these
//! ports.
//!
//! The session core consumes exactly one external capability: the AI
//! enrichment provider behind `EnrichmentProvider`.

mod enrichment;

pub use enrichment::{
    EnrichmentError, EnrichmentProvider, ProviderInfo, SearchEntry, UrgencyRequest,
};
