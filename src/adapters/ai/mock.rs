//! Mock Enrichment Provider for testing.
//!
//! Provides a configurable mock implementation of the
//! EnrichmentProvider port, allowing tests and demos to run without
//! calling the real Gemini API.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in call order per operation
//! - Per-reply delays for completion-order testing
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockEnrichmentProvider::new()
//!     .with_score(91)
//!     .with_score_after(45, Duration::from_millis(50));
//!
//! let score = provider.urgency_score(request).await?;
//! assert_eq!(score.value(), 91);
//! ```

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{NoticeId, Role};
use crate::domain::notice::UrgencyScore;
use crate::ports::{
    EnrichmentError, EnrichmentProvider, ProviderInfo, SearchEntry, UrgencyRequest,
};

/// One configured reply, with an optional delay overriding the
/// provider-wide one.
#[derive(Debug, Clone)]
struct MockReply<T> {
    outcome: Result<T, MockError>,
    delay: Option<Duration>,
}

/// Mock error types for testing fallback handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited,
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate an unparseable response.
    Parse { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for EnrichmentError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited => EnrichmentError::RateLimited,
            MockError::Unavailable { message } => EnrichmentError::unavailable(message),
            MockError::AuthenticationFailed => EnrichmentError::AuthenticationFailed,
            MockError::Network { message } => EnrichmentError::network(message),
            MockError::Parse { message } => EnrichmentError::parse(message),
            MockError::Timeout { timeout_secs } => EnrichmentError::Timeout { timeout_secs },
        }
    }
}

/// A call recorded by the mock, for verification.
#[derive(Debug, Clone)]
pub enum RecordedCall {
    /// A summarize call with the content that was passed.
    Summarize { content: String },
    /// An urgency-score call with the full request.
    UrgencyScore { request: UrgencyRequest },
    /// A daily-insight call with the role that was passed.
    DailyInsight { role: Role },
    /// A search call with the query and how many entries were offered.
    SearchMatches { query: String, entry_count: usize },
}

/// Mock enrichment provider for testing.
///
/// Configurable to return specific replies, simulate delays, or inject
/// errors. Each operation has its own reply queue; an exhausted queue
/// yields a fixed default so unconfigured calls still succeed.
#[derive(Debug, Clone)]
pub struct MockEnrichmentProvider {
    summaries: Arc<Mutex<VecDeque<MockReply<String>>>>,
    scores: Arc<Mutex<VecDeque<MockReply<UrgencyScore>>>>,
    insights: Arc<Mutex<VecDeque<MockReply<String>>>>,
    matches: Arc<Mutex<VecDeque<MockReply<HashSet<NoticeId>>>>>,
    /// Simulated latency applied when a reply has no delay of its own.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for MockEnrichmentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnrichmentProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            summaries: Arc::new(Mutex::new(VecDeque::new())),
            scores: Arc::new(Mutex::new(VecDeque::new())),
            insights: Arc::new(Mutex::new(VecDeque::new())),
            matches: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets simulated latency for replies without a delay of their own.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    // ----- summarize replies -----

    /// Queues a successful summary.
    pub fn with_summary(self, text: impl Into<String>) -> Self {
        push(&self.summaries, Ok(text.into()), None);
        self
    }

    /// Queues a successful summary that resolves after a delay.
    pub fn with_summary_after(self, text: impl Into<String>, delay: Duration) -> Self {
        push(&self.summaries, Ok(text.into()), Some(delay));
        self
    }

    /// Queues a failing summary.
    pub fn with_summary_error(self, error: MockError) -> Self {
        push(&self.summaries, Err(error), None);
        self
    }

    // ----- urgency-score replies -----

    /// Queues a successful score (clamped into 1 to 100).
    pub fn with_score(self, value: i64) -> Self {
        push(&self.scores, Ok(UrgencyScore::clamped(value)), None);
        self
    }

    /// Queues a successful score that resolves after a delay.
    pub fn with_score_after(self, value: i64, delay: Duration) -> Self {
        push(&self.scores, Ok(UrgencyScore::clamped(value)), Some(delay));
        self
    }

    /// Queues a failing score.
    pub fn with_score_error(self, error: MockError) -> Self {
        push(&self.scores, Err(error), None);
        self
    }

    // ----- daily-insight replies -----

    /// Queues a successful insight.
    pub fn with_insight(self, text: impl Into<String>) -> Self {
        push(&self.insights, Ok(text.into()), None);
        self
    }

    /// Queues a successful insight that resolves after a delay.
    pub fn with_insight_after(self, text: impl Into<String>, delay: Duration) -> Self {
        push(&self.insights, Ok(text.into()), Some(delay));
        self
    }

    /// Queues a failing insight.
    pub fn with_insight_error(self, error: MockError) -> Self {
        push(&self.insights, Err(error), None);
        self
    }

    // ----- search replies -----

    /// Queues a successful set of matches.
    pub fn with_matches(self, ids: impl IntoIterator<Item = NoticeId>) -> Self {
        push(&self.matches, Ok(ids.into_iter().collect()), None);
        self
    }

    /// Queues a successful set of matches that resolves after a delay.
    pub fn with_matches_after(
        self,
        ids: impl IntoIterator<Item = NoticeId>,
        delay: Duration,
    ) -> Self {
        push(&self.matches, Ok(ids.into_iter().collect()), Some(delay));
        self
    }

    /// Queues a failing search.
    pub fn with_matches_error(self, error: MockError) -> Self {
        push(&self.matches, Err(error), None);
        self
    }

    // ----- verification -----

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn settle<T>(&self, reply: MockReply<T>) -> Result<T, EnrichmentError> {
        let delay = reply.delay.unwrap_or(self.delay);
        if !delay.is_zero() {
            sleep(delay).await;
        }
        reply.outcome.map_err(EnrichmentError::from)
    }
}

/// Appends a reply to a queue.
fn push<T>(queue: &Arc<Mutex<VecDeque<MockReply<T>>>>, outcome: Result<T, MockError>, delay: Option<Duration>) {
    queue.lock().unwrap().push_back(MockReply { outcome, delay });
}

/// Pops the next reply, or a default success when the queue is empty.
fn pop_or<T>(queue: &Arc<Mutex<VecDeque<MockReply<T>>>>, default: T) -> MockReply<T> {
    queue.lock().unwrap().pop_front().unwrap_or(MockReply {
        outcome: Ok(default),
        delay: None,
    })
}

#[async_trait]
impl EnrichmentProvider for MockEnrichmentProvider {
    async fn summarize(&self, content: &str) -> Result<String, EnrichmentError> {
        self.record(RecordedCall::Summarize {
            content: content.to_string(),
        });
        let reply = pop_or(&self.summaries, "Mock summary.".to_string());
        self.settle(reply).await
    }

    async fn urgency_score(
        &self,
        request: UrgencyRequest,
    ) -> Result<UrgencyScore, EnrichmentError> {
        self.record(RecordedCall::UrgencyScore {
            request: request.clone(),
        });
        let reply = pop_or(&self.scores, UrgencyScore::clamped(60));
        self.settle(reply).await
    }

    async fn daily_insight(&self, role: Role) -> Result<String, EnrichmentError> {
        self.record(RecordedCall::DailyInsight { role });
        let reply = pop_or(&self.insights, "Mock daily insight. ✨".to_string());
        self.settle(reply).await
    }

    async fn search_matches(
        &self,
        query: &str,
        entries: &[SearchEntry],
    ) -> Result<HashSet<NoticeId>, EnrichmentError> {
        self.record(RecordedCall::SearchMatches {
            query: query.to_string(),
            entry_count: entries.len(),
        });
        let reply = pop_or(&self.matches, HashSet::new());
        self.settle(reply).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}
