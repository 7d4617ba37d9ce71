//! Enrichment Provider Port - Interface for AI enrichment integrations.
//!
//! This port abstracts the external AI capability the session consumes:
//! summarizing notice text, scoring urgency, producing a daily insight,
//! and resolving a free-text query to matching notice ids.
//!
//! # Design
//!
//! - Structured inputs, plain-value outputs; prompt rendering is an
//!   adapter concern
//! - No retry contract: a call either resolves or fails, and the
//!   caller applies its documented fallback exactly once
//! - Error types for common failure modes (rate limits, auth, network)
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedProvider;
//!
//! #[async_trait]
//! impl EnrichmentProvider for FixedProvider {
//!     async fn summarize(&self, _content: &str) -> Result<String, EnrichmentError> {
//!         Ok("Short version.".to_string())
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::foundation::{NoticeId, Role, Timestamp};
use crate::domain::notice::{Notice, NoticeDraft, NoticePriority, UrgencyScore};

/// Port for AI enrichment interactions.
///
/// Implementations connect to an external AI service (or simulate one)
/// and translate between the provider API and our domain types.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Produces a one-line summary of the given text.
    async fn summarize(&self, content: &str) -> Result<String, EnrichmentError>;

    /// Scores how urgent a notice is, in the 1 to 100 range.
    async fn urgency_score(&self, request: UrgencyRequest) -> Result<UrgencyScore, EnrichmentError>;

    /// Produces a short motivational insight for the given role.
    async fn daily_insight(&self, role: Role) -> Result<String, EnrichmentError>;

    /// Resolves a free-text query to the subset of entries that match.
    async fn search_matches(
        &self,
        query: &str,
        entries: &[SearchEntry],
    ) -> Result<HashSet<NoticeId>, EnrichmentError>;

    /// Returns provider identification for logging.
    fn provider_info(&self) -> ProviderInfo;
}

/// Input to an urgency-scoring call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgencyRequest {
    /// Notice headline.
    pub title: String,
    /// Author-assigned priority.
    pub priority: NoticePriority,
    /// Free-text audience description.
    pub target_audience: String,
    /// Deadline the notice refers to, if any.
    pub deadline: Option<Timestamp>,
}

impl UrgencyRequest {
    /// Builds a scoring request from a published notice.
    pub fn from_notice(notice: &Notice) -> Self {
        Self {
            title: notice.title().to_string(),
            priority: notice.priority(),
            target_audience: notice.target_audience().to_string(),
            deadline: notice.deadline().copied(),
        }
    }

    /// Builds a scoring request from a draft under composition.
    pub fn from_draft(draft: &NoticeDraft) -> Self {
        Self {
            title: draft.title.clone(),
            priority: draft.priority,
            target_audience: draft.target_audience.clone(),
            deadline: draft.deadline,
        }
    }
}

/// One (id, title) pair offered to the search resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    /// Identifier the resolver may return.
    pub id: NoticeId,
    /// Title the resolver matches against.
    pub title: String,
}

impl SearchEntry {
    /// Builds a search entry from a published notice.
    pub fn from_notice(notice: &Notice) -> Self {
        Self {
            id: notice.id(),
            title: notice.title().to_string(),
        }
    }
}

/// Provider identification for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier, if the provider has one.
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Enrichment provider errors.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    /// Rate limited by the provider.
    #[error("rate limited by provider")]
    RateLimited,

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl EnrichmentError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns true if a later identical call could plausibly succeed.
    ///
    /// Used for log classification only; no caller retries
    /// automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EnrichmentError::RateLimited
                | EnrichmentError::Unavailable { .. }
                | EnrichmentError::Network(_)
                | EnrichmentError::Timeout { .. }
        )
    }
}
