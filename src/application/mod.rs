//! Application layer - session state and enrichment orchestration.
//!
//! `SessionState` is the single synchronous source of truth. The
//! `EnrichmentPipeline` dispatches AI calls as independent tasks whose
//! completions re-enter the state through identifier-keyed merges.
//! `CampusSession` composes the two behind the operations the
//! presentation layer calls.

pub mod pipeline;
pub mod search;
pub mod seed;
pub mod session;
pub mod state;

pub use pipeline::{EnrichmentPipeline, TaskRegistry};
pub use search::SearchFilter;
pub use seed::SeedData;
pub use session::CampusSession;
pub use state::SessionState;
