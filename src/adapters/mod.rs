//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the session core to external systems:
//! - `ai` - Enrichment provider implementations (Gemini, mock)

pub mod ai;

pub use ai::{GeminiConfig, GeminiProvider, MockEnrichmentProvider, MockError, RecordedCall};
