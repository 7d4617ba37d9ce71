//! Asynchronous enrichment dispatch.
//!
//! Every AI call runs as an independent spawned task. A task settles
//! exactly once: on success with the provider's value, on failure with
//! the documented fallback for that operation. The settled value
//! re-enters `SessionState` through an identifier-keyed merge, so
//! completions may land in any order without corrupting anything.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::application::state::SessionState;
use crate::domain::foundation::{NoticeId, Role};
use crate::domain::notice::UrgencyScore;
use crate::ports::{EnrichmentProvider, ProviderInfo, SearchEntry, UrgencyRequest};

/// Insight text applied when the provider call fails.
pub const FALLBACK_INSIGHT: &str = "Make today productive! 📚";

/// Tracks spawned enrichment tasks so a caller can await quiescence.
///
/// Handles are registered at spawn time and reaped lazily; `settled`
/// drains and joins until no task remains, including tasks spawned
/// while it was waiting.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, handle: JoinHandle<()>) {
        let mut handles = self.handles.lock().unwrap();
        handles.retain(|handle| !handle.is_finished());
        handles.push(handle);
    }

    /// Number of tasks not yet finished.
    pub fn active_count(&self) -> usize {
        let handles = self.handles.lock().unwrap();
        handles.iter().filter(|handle| !handle.is_finished()).count()
    }

    /// Waits until every registered task has finished.
    pub async fn settled(&self) {
        loop {
            let drained: Vec<JoinHandle<()>> = {
                let mut handles = self.handles.lock().unwrap();
                handles.drain(..).collect()
            };
            if drained.is_empty() {
                return;
            }
            for result in futures::future::join_all(drained).await {
                if let Err(err) = result {
                    tracing::warn!("Enrichment task aborted: {}", err);
                }
            }
        }
    }
}

/// Dispatches enrichment calls and merges their settled values.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    provider: Arc<dyn EnrichmentProvider>,
    state: Arc<RwLock<SessionState>>,
    tasks: Arc<TaskRegistry>,
}

impl EnrichmentPipeline {
    pub fn new(provider: Arc<dyn EnrichmentProvider>, state: Arc<RwLock<SessionState>>) -> Self {
        Self {
            provider,
            state,
            tasks: Arc::new(TaskRegistry::new()),
        }
    }

    /// Returns the provider's advertised identity, for startup logs.
    pub fn provider_info(&self) -> ProviderInfo {
        self.provider.provider_info()
    }

    /// Number of enrichment tasks still in flight.
    pub fn active_tasks(&self) -> usize {
        self.tasks.active_count()
    }

    /// Waits until every in-flight enrichment task has settled.
    pub async fn settled(&self) {
        self.tasks.settled().await;
    }

    /// Summary used when the provider call fails: the leading hundred
    /// characters of the input plus an ellipsis.
    pub fn fallback_summary(content: &str) -> String {
        let mut summary: String = content.chars().take(100).collect();
        summary.push_str("...");
        summary
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fire-and-merge tasks
    // ─────────────────────────────────────────────────────────────────────────

    /// Scores one notice's urgency in the background.
    ///
    /// Failure settles to the neutral score so the field is always
    /// defined once the task finishes.
    pub fn spawn_score(&self, id: NoticeId, request: UrgencyRequest) {
        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        self.tasks.register(tokio::spawn(async move {
            let score = match provider.urgency_score(request).await {
                Ok(score) => score,
                Err(err) => {
                    tracing::warn!(
                        notice_id = %id,
                        error = %err,
                        retryable = err.is_retryable(),
                        "Urgency scoring failed, applying neutral fallback"
                    );
                    UrgencyScore::NEUTRAL
                }
            };
            if !state.write().await.merge_urgency_score(id, score) {
                tracing::debug!(notice_id = %id, "Dropping score for absent notice");
            }
        }));
    }

    /// Summarizes a published notice in the background and merges the
    /// result by id.
    pub fn spawn_summary(&self, id: NoticeId, content: String) {
        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        self.tasks.register(tokio::spawn(async move {
            let summary = match provider.summarize(&content).await {
                Ok(summary) => summary,
                Err(err) => {
                    tracing::warn!(
                        notice_id = %id,
                        error = %err,
                        retryable = err.is_retryable(),
                        "Summarization failed, falling back to truncation"
                    );
                    Self::fallback_summary(&content)
                }
            };
            if !state.write().await.merge_summary(id, summary) {
                tracing::debug!(notice_id = %id, "Dropping summary for absent notice");
            }
        }));
    }

    /// Fetches the daily insight for a role in the background.
    ///
    /// The epoch pins this fetch to the login that requested it; a
    /// completion that lost the race to a newer login is dropped.
    pub fn spawn_insight(&self, role: Role, epoch: u64) {
        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        self.tasks.register(tokio::spawn(async move {
            let text = match provider.daily_insight(role).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(
                        role = %role,
                        error = %err,
                        retryable = err.is_retryable(),
                        "Daily insight failed, applying fallback"
                    );
                    FALLBACK_INSIGHT.to_string()
                }
            };
            if !state.write().await.apply_insight(epoch, text) {
                tracing::debug!(epoch, "Dropping stale insight completion");
            }
        }));
    }

    /// Resolves a search query against the given notice index in the
    /// background. Failure settles to the empty match set, which is an
    /// explicit "no results", not a cleared filter.
    pub fn spawn_search(&self, query: String, entries: Vec<SearchEntry>, epoch: u64) {
        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        self.tasks.register(tokio::spawn(async move {
            let matches = match provider.search_matches(&query, &entries).await {
                Ok(matches) => matches,
                Err(err) => {
                    tracing::warn!(
                        query = %query,
                        error = %err,
                        retryable = err.is_retryable(),
                        "Search resolution failed, showing no matches"
                    );
                    HashSet::new()
                }
            };
            if !state.write().await.apply_search_result(epoch, matches) {
                tracing::debug!(epoch, "Dropping stale search completion");
            }
        }));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Awaited calls
    // ─────────────────────────────────────────────────────────────────────────

    /// Summarizes draft content and returns the text directly.
    ///
    /// Used while composing, before any notice exists to merge into.
    /// Applies the same truncation fallback as the background path.
    pub async fn summarize_now(&self, content: &str) -> String {
        match self.provider.summarize(content).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(error = %err, "Draft summarization failed, falling back to truncation");
                Self::fallback_summary(content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::{MockEnrichmentProvider, MockError};
    use crate::application::search::SearchFilter;
    use crate::application::seed::SeedData;
    use crate::domain::foundation::Outcome;
    use crate::domain::notice::NoticeDraft;

    fn board_with(provider: MockEnrichmentProvider) -> (EnrichmentPipeline, Arc<RwLock<SessionState>>) {
        let mut state = SessionState::new(SeedData::empty());
        state.log_in(Role::Teacher);
        let state = Arc::new(RwLock::new(state));
        let pipeline = EnrichmentPipeline::new(Arc::new(provider), Arc::clone(&state));
        (pipeline, state)
    }

    async fn publish(state: &Arc<RwLock<SessionState>>, title: &str) -> NoticeId {
        match state.write().await.create_notice(NoticeDraft::new(title, "body")) {
            Outcome::Applied(id) => id,
            Outcome::Rejected(reason) => panic!("seed notice rejected: {reason}"),
        }
    }

    #[test]
    fn fallback_summary_truncates_at_one_hundred_chars() {
        let long: String = "x".repeat(150);

        let summary = EnrichmentPipeline::fallback_summary(&long);

        assert_eq!(summary.chars().count(), 103);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn fallback_summary_keeps_short_content_whole() {
        assert_eq!(EnrichmentPipeline::fallback_summary("Hall A"), "Hall A...");
    }

    #[test]
    fn fallback_summary_respects_multibyte_boundaries() {
        let content: String = "📚".repeat(120);

        let summary = EnrichmentPipeline::fallback_summary(&content);

        assert_eq!(summary.chars().count(), 103);
    }

    #[tokio::test]
    async fn settled_score_merges_into_its_notice() {
        let (pipeline, state) = board_with(MockEnrichmentProvider::new().with_score(88));
        let id = publish(&state, "Exam").await;

        pipeline.spawn_score(id, UrgencyRequest::from_notice(state.read().await.notice(id).unwrap()));
        pipeline.settled().await;

        let state = state.read().await;
        assert_eq!(state.notice(id).unwrap().ranking_score(), Some(UrgencyScore::clamped(88)));
    }

    #[tokio::test]
    async fn failed_score_settles_to_neutral() {
        let (pipeline, state) =
            board_with(MockEnrichmentProvider::new().with_score_error(MockError::RateLimited));
        let id = publish(&state, "Exam").await;

        pipeline.spawn_score(id, UrgencyRequest::from_notice(state.read().await.notice(id).unwrap()));
        pipeline.settled().await;

        let state = state.read().await;
        assert_eq!(state.notice(id).unwrap().ranking_score(), Some(UrgencyScore::NEUTRAL));
    }

    #[tokio::test]
    async fn same_field_race_resolves_by_completion_order() {
        let provider = MockEnrichmentProvider::new()
            .with_score_after(30, Duration::from_millis(40))
            .with_score(80);
        let (pipeline, state) = board_with(provider);
        let id = publish(&state, "Exam").await;

        let request = UrgencyRequest::from_notice(state.read().await.notice(id).unwrap());
        pipeline.spawn_score(id, request.clone());
        pipeline.spawn_score(id, request);
        pipeline.settled().await;

        // The first dispatch settles last, so its value stands.
        let state = state.read().await;
        assert_eq!(state.notice(id).unwrap().ranking_score(), Some(UrgencyScore::clamped(30)));
    }

    #[tokio::test]
    async fn failed_summary_settles_to_truncation() {
        let provider = MockEnrichmentProvider::new().with_summary_error(MockError::Unavailable {
            message: "overloaded".into(),
        });
        let (pipeline, state) = board_with(provider);
        let id = publish(&state, "Exam").await;

        pipeline.spawn_summary(id, "Final exams begin next Monday in Hall A".into());
        pipeline.settled().await;

        let state = state.read().await;
        assert_eq!(
            state.notice(id).unwrap().summary(),
            Some("Final exams begin next Monday in Hall A...")
        );
    }

    #[tokio::test]
    async fn stale_insight_is_dropped_at_the_merge_point() {
        let provider = MockEnrichmentProvider::new()
            .with_insight_after("for the student", Duration::from_millis(40))
            .with_insight("for the teacher");
        let (pipeline, state) = board_with(provider);

        let stale = state.write().await.begin_insight_refresh();
        let fresh = state.write().await.begin_insight_refresh();
        pipeline.spawn_insight(Role::Student, stale);
        pipeline.spawn_insight(Role::Teacher, fresh);
        pipeline.settled().await;

        let state = state.read().await;
        assert_eq!(state.daily_insight(), Some("for the teacher"));
    }

    #[tokio::test]
    async fn failed_insight_settles_to_fixed_fallback() {
        let provider = MockEnrichmentProvider::new().with_insight_error(MockError::Network {
            message: "dns".into(),
        });
        let (pipeline, state) = board_with(provider);

        let epoch = state.write().await.begin_insight_refresh();
        pipeline.spawn_insight(Role::Student, epoch);
        pipeline.settled().await;

        let state = state.read().await;
        assert_eq!(state.daily_insight(), Some(FALLBACK_INSIGHT));
    }

    #[tokio::test]
    async fn failed_search_settles_to_empty_matches_not_cleared_filter() {
        let provider = MockEnrichmentProvider::new().with_matches_error(MockError::Timeout {
            timeout_secs: 30,
        });
        let (pipeline, state) = board_with(provider);
        publish(&state, "Exam").await;

        let epoch = state.write().await.begin_search();
        pipeline.spawn_search("exam".into(), Vec::new(), epoch);
        pipeline.settled().await;

        let state = state.read().await;
        assert_eq!(state.search_filter(), &SearchFilter::Matches(HashSet::new()));
        assert!(state.visible_notices().is_empty());
        assert!(!state.is_searching());
    }

    #[tokio::test]
    async fn summarize_now_returns_provider_text() {
        let (pipeline, _) = board_with(MockEnrichmentProvider::new().with_summary("Exams start Monday."));

        assert_eq!(pipeline.summarize_now("long draft text").await, "Exams start Monday.");
    }

    #[tokio::test]
    async fn summarize_now_falls_back_on_failure() {
        let provider = MockEnrichmentProvider::new().with_summary_error(MockError::AuthenticationFailed);
        let (pipeline, _) = board_with(provider);

        assert_eq!(pipeline.summarize_now("draft body").await, "draft body...");
    }

    #[tokio::test]
    async fn settled_waits_for_every_spawned_task() {
        let provider = MockEnrichmentProvider::new()
            .with_delay(Duration::from_millis(15))
            .with_score(70)
            .with_score(71)
            .with_score(72);
        let (pipeline, state) = board_with(provider);
        let ids = [
            publish(&state, "A").await,
            publish(&state, "B").await,
            publish(&state, "C").await,
        ];

        for id in ids {
            let request = UrgencyRequest::from_notice(state.read().await.notice(id).unwrap());
            pipeline.spawn_score(id, request);
        }
        pipeline.settled().await;

        assert_eq!(pipeline.active_tasks(), 0);
        let state = state.read().await;
        assert!(ids.iter().all(|id| state.notice(*id).unwrap().is_scored()));
    }
}
