//! Enrichment Provider Adapters.
//!
//! Implementations of the EnrichmentProvider port.
//!
//! ## Available Adapters
//!
//! - `MockEnrichmentProvider` - Configurable mock for testing
//! - `GeminiProvider` - Google Gemini models over HTTP

mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use mock::{MockEnrichmentProvider, MockError, RecordedCall};
