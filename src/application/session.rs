//! Portal session facade.
//!
//! Couples the synchronous `SessionState` with the asynchronous
//! `EnrichmentPipeline`: every operation that should trigger an AI
//! task performs its state mutation under one lock acquisition, then
//! dispatches the task after the lock is released.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};

use crate::application::pipeline::EnrichmentPipeline;
use crate::application::seed::SeedData;
use crate::application::state::SessionState;
use crate::domain::chat::ChatChannel;
use crate::domain::event_request::{Disposition, RequestStatus};
use crate::domain::foundation::{
    MessageId, NoticeId, Outcome, RejectReason, RequestId, Role,
};
use crate::domain::notice::{ClassSection, NoticeDraft};
use crate::ports::{EnrichmentProvider, ProviderInfo, SearchEntry, UrgencyRequest};

/// One user's portal session.
pub struct CampusSession {
    state: Arc<RwLock<SessionState>>,
    pipeline: EnrichmentPipeline,
}

impl CampusSession {
    /// Opens a session over the given provider and seed collections.
    ///
    /// The session starts logged out; call [`login`](Self::login) to
    /// enter it and kick off the initial enrichment wave.
    pub fn new(provider: Arc<dyn EnrichmentProvider>, seed: SeedData) -> Self {
        let state = Arc::new(RwLock::new(SessionState::new(seed)));
        let pipeline = EnrichmentPipeline::new(provider, Arc::clone(&state));
        Self { state, pipeline }
    }

    /// Acquires a read view of the session state.
    pub async fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().await
    }

    /// Returns the provider's advertised identity.
    pub fn provider_info(&self) -> ProviderInfo {
        self.pipeline.provider_info()
    }

    /// Number of enrichment tasks still in flight.
    pub fn active_tasks(&self) -> usize {
        self.pipeline.active_tasks()
    }

    /// Waits until every in-flight enrichment task has settled.
    pub async fn settled(&self) {
        self.pipeline.settled().await;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Enters the session under a role and dispatches the initial
    /// enrichment wave: one daily-insight fetch plus one urgency score
    /// per notice on the board.
    ///
    /// Logging in again under another role re-fires the wave; the
    /// insight epoch taken under the same lock as the role change
    /// guarantees a slow fetch for the old role cannot overwrite the
    /// new one.
    pub async fn login(&self, role: Role) {
        let (epoch, scoring) = {
            let mut state = self.state.write().await;
            state.log_in(role);
            let epoch = state.begin_insight_refresh();
            let scoring: Vec<(NoticeId, UrgencyRequest)> = state
                .notices()
                .iter()
                .map(|notice| (notice.id(), UrgencyRequest::from_notice(notice)))
                .collect();
            (epoch, scoring)
        };

        tracing::info!(role = %role, notices = scoring.len(), "Session login");
        self.pipeline.spawn_insight(role, epoch);
        for (id, request) in scoring {
            self.pipeline.spawn_score(id, request);
        }
    }

    /// Leaves the session. Collections stay in place and in-flight
    /// enrichment completions still merge, so logging back in shows
    /// the same board.
    pub async fn logout(&self) {
        self.state.write().await.log_out();
        tracing::info!("Session logout");
    }

    /// Switches the selected class section.
    pub async fn set_active_class(&self, section: ClassSection) {
        self.state.write().await.set_active_class(section);
    }

    /// Applies a profile edit. Rejects blank names.
    pub async fn update_profile(&self, name: &str, avatar_ref: &str) -> Outcome<()> {
        self.state.write().await.update_profile(name, avatar_ref)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────────────────────

    /// Publishes a notice and dispatches its urgency scoring.
    ///
    /// A rejected draft dispatches nothing.
    pub async fn create_notice(&self, draft: NoticeDraft) -> Outcome<NoticeId> {
        let request = UrgencyRequest::from_draft(&draft);
        let outcome = self.state.write().await.create_notice(draft);
        if let Outcome::Applied(id) = &outcome {
            self.pipeline.spawn_score(*id, request);
        }
        outcome
    }

    /// Summarizes draft content for the composer, returning the text
    /// directly. Falls back to truncation on provider failure.
    pub async fn summarize_draft(&self, content: &str) -> String {
        self.pipeline.summarize_now(content).await
    }

    /// Dispatches a background summary for an already-published
    /// notice. Rejects unknown ids without dispatching.
    pub async fn summarize_notice(&self, id: NoticeId) -> Outcome<()> {
        let content = {
            let state = self.state.read().await;
            match state.notice(id) {
                Some(notice) => notice.content().to_string(),
                None => return Outcome::rejected(RejectReason::UnknownTarget),
            }
        };
        self.pipeline.spawn_summary(id, content);
        Outcome::applied(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Messaging and event requests
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a message to a channel log.
    pub async fn send_message(&self, content: &str, channel: ChatChannel) -> Outcome<MessageId> {
        self.state.write().await.send_message(content, channel)
    }

    /// Submits an event request for approval.
    pub async fn submit_event_request(
        &self,
        title: &str,
        description: &str,
    ) -> Outcome<RequestId> {
        self.state.write().await.submit_event_request(title, description)
    }

    /// Applies an approve/reject disposition to a pending request.
    pub async fn dispose_event_request(
        &self,
        id: RequestId,
        disposition: Disposition,
    ) -> Outcome<RequestStatus> {
        self.state.write().await.dispose_event_request(id, disposition)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    /// Runs the notice search for a query.
    ///
    /// A blank query clears the filter synchronously. A non-blank
    /// query snapshots the current board as (id, title) pairs and
    /// resolves in the background; the previous filter stays in effect
    /// until the result lands.
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.state.write().await.clear_search();
            return;
        }

        let (epoch, entries) = {
            let mut state = self.state.write().await;
            let epoch = state.begin_search();
            let entries: Vec<SearchEntry> = state
                .notices()
                .iter()
                .map(SearchEntry::from_notice)
                .collect();
            (epoch, entries)
        };
        self.pipeline.spawn_search(query.to_string(), entries, epoch);
    }
}
