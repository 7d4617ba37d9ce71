//! Session state aggregate.
//!
//! Owns every session-scoped collection and is the only place any of
//! them is mutated. Synchronous operations (create, send, submit,
//! dispose) validate and apply in one step; settled enrichment tasks
//! re-enter through the identifier-keyed merge methods, so an
//! out-of-order completion can never touch anything but its own
//! target field.

use std::collections::HashSet;

use crate::application::search::SearchFilter;
use crate::application::seed::{login_name, SeedData, DEFAULT_AVATAR};
use crate::domain::alert::Alert;
use crate::domain::chat::{ChatChannel, ChatMessage};
use crate::domain::event_request::{Disposition, EventRequest, RequestStatus};
use crate::domain::foundation::{
    Capability, MessageId, NoticeId, Outcome, RejectReason, RequestId, Role,
};
use crate::domain::notice::{ClassSection, Notice, NoticeDraft, UrgencyScore};
use crate::domain::profile::UserProfile;

/// All client-side state for one portal session.
///
/// # Invariants
///
/// - Every entity lives in exactly one collection here; nothing else
///   holds a writable copy across a suspension point.
/// - Created notices and event requests are prepended so newer items
///   display first; chat logs append in send order.
/// - Rejected operations leave the state untouched.
#[derive(Debug)]
pub struct SessionState {
    role: Role,
    profile: UserProfile,
    active_class: ClassSection,
    logged_in: bool,
    notices: Vec<Notice>,
    alerts: Vec<Alert>,
    messages: Vec<ChatMessage>,
    requests: Vec<EventRequest>,
    daily_insight: Option<String>,
    insight_epoch: u64,
    search_filter: SearchFilter,
    is_searching: bool,
    search_epoch: u64,
}

impl SessionState {
    /// Creates a fresh session over the given seed collections.
    ///
    /// The session starts logged out with the Student role selected.
    pub fn new(seed: SeedData) -> Self {
        Self {
            role: Role::Student,
            profile: UserProfile::new(login_name(Role::Student), DEFAULT_AVATAR),
            active_class: ClassSection::CseA,
            logged_in: false,
            notices: seed.notices,
            alerts: seed.alerts,
            messages: seed.messages,
            requests: seed.requests,
            daily_insight: None,
            insight_epoch: 0,
            search_filter: SearchFilter::Inactive,
            is_searching: false,
            search_epoch: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the active role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the user profile.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the currently selected class section.
    pub fn active_class(&self) -> ClassSection {
        self.active_class
    }

    /// Whether a login has been performed.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Returns all notices in display order, ignoring any search filter.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Returns the notices that pass the active search filter, in display order.
    pub fn visible_notices(&self) -> Vec<&Notice> {
        self.notices
            .iter()
            .filter(|notice| self.search_filter.allows(notice.id()))
            .collect()
    }

    /// Looks up a notice by id.
    pub fn notice(&self, id: NoticeId) -> Option<&Notice> {
        self.notices.iter().find(|notice| notice.id() == id)
    }

    /// Returns the proactive alert feed, identical for every role.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Returns all event requests, newest submission first.
    pub fn requests(&self) -> &[EventRequest] {
        &self.requests
    }

    /// Looks up an event request by id.
    pub fn request(&self, id: RequestId) -> Option<&EventRequest> {
        self.requests.iter().find(|request| request.id() == id)
    }

    /// Returns the latest daily insight, if one has settled.
    pub fn daily_insight(&self) -> Option<&str> {
        self.daily_insight.as_deref()
    }

    /// Returns the active search filter.
    pub fn search_filter(&self) -> &SearchFilter {
        &self.search_filter
    }

    /// Whether a search is currently resolving.
    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Enters the session under the given role.
    ///
    /// Replaces the profile name with the role's login identity and
    /// marks the session authenticated. Collections are untouched.
    pub fn log_in(&mut self, role: Role) {
        self.role = role;
        self.profile.set_name(login_name(role));
        self.logged_in = true;
    }

    /// Leaves the session. Collections and enrichment results are
    /// retained so a re-login sees the same board.
    pub fn log_out(&mut self) {
        self.logged_in = false;
    }

    /// Switches the selected class section.
    pub fn set_active_class(&mut self, section: ClassSection) {
        self.active_class = section;
    }

    /// Applies a profile edit. Rejects a blank name; the avatar
    /// reference is optional and stored as given.
    pub fn update_profile(&mut self, name: &str, avatar_ref: &str) -> Outcome<()> {
        if name.trim().is_empty() {
            return Outcome::rejected(RejectReason::BlankField("name"));
        }
        self.profile.set_name(name.trim());
        self.profile.set_avatar_ref(avatar_ref);
        Outcome::applied(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Synchronous operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Publishes a notice from a draft, newest-first.
    ///
    /// Requires the compose capability and a draft with non-blank
    /// title and content. Rejections leave the board untouched.
    pub fn create_notice(&mut self, draft: NoticeDraft) -> Outcome<NoticeId> {
        if !self.role.can(Capability::ComposeNotice) {
            return Outcome::rejected(RejectReason::MissingCapability(Capability::ComposeNotice));
        }
        if let Some(field) = draft.first_blank_field() {
            return Outcome::rejected(RejectReason::BlankField(field));
        }
        let notice = Notice::from_draft(draft, self.profile.name());
        let id = notice.id();
        self.notices.insert(0, notice);
        Outcome::applied(id)
    }

    /// Appends a message to a channel log.
    ///
    /// Rejects blank content, and the CR/Teacher channel for roles
    /// without exclusive-channel access.
    pub fn send_message(&mut self, content: &str, channel: ChatChannel) -> Outcome<MessageId> {
        if content.trim().is_empty() {
            return Outcome::rejected(RejectReason::BlankField("content"));
        }
        if channel.requires_exclusive_access()
            && !self.role.can(Capability::AccessExclusiveChannel)
        {
            return Outcome::rejected(RejectReason::MissingCapability(
                Capability::AccessExclusiveChannel,
            ));
        }
        let message = ChatMessage::new(self.profile.name(), self.role, content.trim(), channel);
        let id = message.id();
        self.messages.push(message);
        Outcome::applied(id)
    }

    /// Returns one channel's full log in send order, or an empty view
    /// when the channel is not visible to the active role.
    pub fn channel_view(&self, channel: ChatChannel) -> Vec<&ChatMessage> {
        if !channel.visible_to(self.role) {
            return Vec::new();
        }
        self.messages
            .iter()
            .filter(|message| message.channel() == channel)
            .collect()
    }

    /// Submits an event request, newest-first. Open to every role;
    /// rejects blank title or description.
    pub fn submit_event_request(&mut self, title: &str, description: &str) -> Outcome<RequestId> {
        if title.trim().is_empty() {
            return Outcome::rejected(RejectReason::BlankField("title"));
        }
        if description.trim().is_empty() {
            return Outcome::rejected(RejectReason::BlankField("description"));
        }
        let request = EventRequest::new(
            title.trim(),
            description.trim(),
            self.profile.name(),
            self.role,
        );
        let id = request.id();
        self.requests.insert(0, request);
        Outcome::applied(id)
    }

    /// Applies an approve/reject disposition to a pending request.
    ///
    /// Requires the dispose capability. Unknown ids and already
    /// resolved requests are rejected without touching the request,
    /// which keeps a double-click harmless.
    pub fn dispose_event_request(
        &mut self,
        id: RequestId,
        disposition: Disposition,
    ) -> Outcome<RequestStatus> {
        if !self.role.can(Capability::DisposeEventRequest) {
            return Outcome::rejected(RejectReason::MissingCapability(
                Capability::DisposeEventRequest,
            ));
        }
        let Some(request) = self.requests.iter_mut().find(|request| request.id() == id) else {
            return Outcome::rejected(RejectReason::UnknownTarget);
        };
        if !request.apply_disposition(disposition) {
            return Outcome::rejected(RejectReason::AlreadyResolved);
        }
        Outcome::applied(request.status())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enrichment merges
    // ─────────────────────────────────────────────────────────────────────────

    /// Merges a settled urgency score into the matching notice.
    ///
    /// Returns false when no notice with that id exists; the
    /// completion is then discarded without side effects.
    pub fn merge_urgency_score(&mut self, id: NoticeId, score: UrgencyScore) -> bool {
        match self.notices.iter_mut().find(|notice| notice.id() == id) {
            Some(notice) => {
                notice.set_ranking_score(score);
                true
            }
            None => false,
        }
    }

    /// Merges a settled summary into the matching notice.
    pub fn merge_summary(&mut self, id: NoticeId, summary: String) -> bool {
        match self.notices.iter_mut().find(|notice| notice.id() == id) {
            Some(notice) => {
                notice.set_summary(summary);
                true
            }
            None => false,
        }
    }

    /// Starts a new insight fetch and returns its epoch.
    ///
    /// Any earlier fetch still in flight becomes stale; its completion
    /// will be dropped at the merge point. The previous insight text
    /// stays visible until the new one settles.
    pub fn begin_insight_refresh(&mut self) -> u64 {
        self.insight_epoch += 1;
        self.insight_epoch
    }

    /// Applies a settled insight if it is still the latest fetch.
    pub fn apply_insight(&mut self, epoch: u64, text: String) -> bool {
        if epoch != self.insight_epoch {
            return false;
        }
        self.daily_insight = Some(text);
        true
    }

    /// Starts a new search and returns its epoch.
    ///
    /// The previous filter stays in effect while the new query
    /// resolves, so the board never flashes to an unfiltered or empty
    /// view mid-search.
    pub fn begin_search(&mut self) -> u64 {
        self.search_epoch += 1;
        self.is_searching = true;
        self.search_epoch
    }

    /// Drops any filter and invalidates every in-flight search.
    pub fn clear_search(&mut self) {
        self.search_epoch += 1;
        self.search_filter = SearchFilter::Inactive;
        self.is_searching = false;
    }

    /// Installs a settled match set if it is still the latest search.
    pub fn apply_search_result(&mut self, epoch: u64, ids: HashSet<NoticeId>) -> bool {
        if epoch != self.search_epoch {
            return false;
        }
        self.search_filter = SearchFilter::Matches(ids);
        self.is_searching = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_as(role: Role) -> SessionState {
        let mut state = SessionState::new(SeedData::empty());
        state.log_in(role);
        state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn new_session_starts_logged_out_as_student() {
        let state = SessionState::new(SeedData::empty());

        assert!(!state.is_logged_in());
        assert_eq!(state.role(), Role::Student);
        assert_eq!(state.active_class(), ClassSection::CseA);
        assert!(state.daily_insight().is_none());
    }

    #[test]
    fn log_in_swaps_role_and_profile_identity() {
        let mut state = SessionState::new(SeedData::empty());

        state.log_in(Role::Teacher);

        assert!(state.is_logged_in());
        assert_eq!(state.role(), Role::Teacher);
        assert_eq!(state.profile().name(), "Prof. David");
    }

    #[test]
    fn log_out_retains_collections() {
        let mut state = state_as(Role::Teacher);
        state
            .create_notice(NoticeDraft::new("Exam", "Hall A"))
            .into_value()
            .unwrap();

        state.log_out();

        assert!(!state.is_logged_in());
        assert_eq!(state.notices().len(), 1);
    }

    #[test]
    fn update_profile_rejects_blank_name_but_not_blank_avatar() {
        let mut state = state_as(Role::Student);
        let avatar_before = state.profile().avatar_ref().to_string();

        assert!(state.update_profile("   ", "avatar-07").is_rejected());
        assert_eq!(state.profile().avatar_ref(), avatar_before);

        assert!(state.update_profile("Anya", "").is_applied());
        assert_eq!(state.profile().name(), "Anya");
        assert_eq!(state.profile().avatar_ref(), "");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn create_notice_prepends_for_privileged_roles() {
        let mut state = state_as(Role::Cr);

        let first = state
            .create_notice(NoticeDraft::new("First", "Body"))
            .into_value()
            .unwrap();
        let second = state
            .create_notice(NoticeDraft::new("Second", "Body"))
            .into_value()
            .unwrap();

        assert_eq!(state.notices()[0].id(), second);
        assert_eq!(state.notices()[1].id(), first);
        assert_eq!(state.notices()[0].author(), "Prof. David");
    }

    #[test]
    fn create_notice_rejected_for_student_without_mutation() {
        let mut state = state_as(Role::Student);

        let outcome = state.create_notice(NoticeDraft::new("Party", "Tonight"));

        assert_eq!(
            outcome.reject_reason(),
            Some(&RejectReason::MissingCapability(Capability::ComposeNotice))
        );
        assert!(state.notices().is_empty());
    }

    #[test]
    fn create_notice_rejects_blank_title() {
        let mut state = state_as(Role::Admin);

        let outcome = state.create_notice(NoticeDraft::new("  ", "Body"));

        assert_eq!(
            outcome.reject_reason(),
            Some(&RejectReason::BlankField("title"))
        );
        assert!(state.notices().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Messaging
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn send_message_appends_in_order() {
        let mut state = state_as(Role::Teacher);

        state.send_message("first", ChatChannel::General);
        state.send_message("second", ChatChannel::General);

        let view = state.channel_view(ChatChannel::General);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].content(), "first");
        assert_eq!(view[1].content(), "second");
    }

    #[test]
    fn send_message_rejects_whitespace_content() {
        let mut state = state_as(Role::Teacher);

        let outcome = state.send_message("   \n", ChatChannel::General);

        assert_eq!(
            outcome.reject_reason(),
            Some(&RejectReason::BlankField("content"))
        );
        assert!(state.channel_view(ChatChannel::General).is_empty());
    }

    #[test]
    fn student_cannot_post_to_exclusive_channel() {
        let mut state = state_as(Role::Student);

        let outcome = state.send_message("hello", ChatChannel::CrTeacher);

        assert_eq!(
            outcome.reject_reason(),
            Some(&RejectReason::MissingCapability(
                Capability::AccessExclusiveChannel
            ))
        );
    }

    #[test]
    fn exclusive_channel_view_is_empty_for_students() {
        let mut state = state_as(Role::Cr);
        state.send_message("sync at 5", ChatChannel::CrTeacher);

        assert_eq!(state.channel_view(ChatChannel::CrTeacher).len(), 1);

        state.log_in(Role::Student);
        assert!(state.channel_view(ChatChannel::CrTeacher).is_empty());
    }

    #[test]
    fn channel_views_do_not_leak_across_channels() {
        let mut state = state_as(Role::Admin);
        state.send_message("to everyone", ChatChannel::General);
        state.send_message("staff only", ChatChannel::CrTeacher);

        let general = state.channel_view(ChatChannel::General);
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].content(), "to everyone");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event requests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn any_role_may_submit_event_requests() {
        for role in Role::all() {
            let mut state = state_as(role);
            let outcome = state.submit_event_request("Trip", "Day trip");
            assert!(outcome.is_applied(), "{role} should be able to submit");
            assert_eq!(state.requests()[0].requester_role(), role);
        }
    }

    #[test]
    fn submitted_requests_are_newest_first() {
        let mut state = state_as(Role::Student);

        state.submit_event_request("Older", "d");
        state.submit_event_request("Newer", "d");

        assert_eq!(state.requests()[0].title(), "Newer");
        assert_eq!(state.requests()[1].title(), "Older");
    }

    #[test]
    fn dispose_requires_admin() {
        let mut state = state_as(Role::Student);
        let id = state
            .submit_event_request("Trip", "Day trip")
            .into_value()
            .unwrap();

        for role in [Role::Student, Role::Teacher, Role::Cr] {
            state.log_in(role);
            let outcome = state.dispose_event_request(id, Disposition::Approve);
            assert!(outcome.is_rejected(), "{role} must not dispose");
        }
        assert!(state.request(id).unwrap().is_pending());

        state.log_in(Role::Admin);
        let outcome = state.dispose_event_request(id, Disposition::Approve);
        assert_eq!(outcome.into_value(), Some(RequestStatus::Approved));
    }

    #[test]
    fn dispose_is_idempotent_against_double_clicks() {
        let mut state = state_as(Role::Admin);
        let id = state
            .submit_event_request("Fest", "Annual fest")
            .into_value()
            .unwrap();

        state.dispose_event_request(id, Disposition::Approve);
        let second = state.dispose_event_request(id, Disposition::Reject);

        assert_eq!(second.reject_reason(), Some(&RejectReason::AlreadyResolved));
        assert_eq!(state.request(id).unwrap().status(), RequestStatus::Approved);
    }

    #[test]
    fn dispose_of_unknown_id_is_a_no_op() {
        let mut state = state_as(Role::Admin);

        let outcome = state.dispose_event_request(RequestId::new(), Disposition::Reject);

        assert_eq!(outcome.reject_reason(), Some(&RejectReason::UnknownTarget));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Alerts
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn alert_feed_is_identical_for_every_role() {
        let mut state = SessionState::new(SeedData::campus());
        let seeded = state.alerts().len();
        assert_eq!(seeded, 3);

        for role in Role::all() {
            state.log_in(role);
            assert_eq!(state.alerts().len(), seeded);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enrichment merges
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn merge_urgency_score_targets_only_its_notice() {
        let mut state = state_as(Role::Teacher);
        let first = state
            .create_notice(NoticeDraft::new("A", "a"))
            .into_value()
            .unwrap();
        let second = state
            .create_notice(NoticeDraft::new("B", "b"))
            .into_value()
            .unwrap();

        assert!(state.merge_urgency_score(first, UrgencyScore::clamped(90)));

        assert_eq!(
            state.notice(first).unwrap().ranking_score(),
            Some(UrgencyScore::clamped(90))
        );
        assert!(state.notice(second).unwrap().ranking_score().is_none());
    }

    #[test]
    fn merge_for_absent_notice_is_discarded() {
        let mut state = state_as(Role::Teacher);

        assert!(!state.merge_urgency_score(NoticeId::new(), UrgencyScore::NEUTRAL));
        assert!(!state.merge_summary(NoticeId::new(), "gone".into()));
    }

    #[test]
    fn overlapping_score_merges_are_last_write_wins() {
        let mut state = state_as(Role::Teacher);
        let id = state
            .create_notice(NoticeDraft::new("A", "a"))
            .into_value()
            .unwrap();

        state.merge_urgency_score(id, UrgencyScore::clamped(30));
        state.merge_urgency_score(id, UrgencyScore::clamped(80));

        assert_eq!(
            state.notice(id).unwrap().ranking_score(),
            Some(UrgencyScore::clamped(80))
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Insight staleness
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn stale_insight_completion_is_dropped() {
        let mut state = state_as(Role::Student);

        let first = state.begin_insight_refresh();
        let second = state.begin_insight_refresh();

        assert!(!state.apply_insight(first, "stale".into()));
        assert!(state.daily_insight().is_none());

        assert!(state.apply_insight(second, "fresh".into()));
        assert_eq!(state.daily_insight(), Some("fresh"));
    }

    #[test]
    fn insight_survives_until_replaced() {
        let mut state = state_as(Role::Student);

        let epoch = state.begin_insight_refresh();
        state.apply_insight(epoch, "keep going".into());
        state.begin_insight_refresh();

        assert_eq!(state.daily_insight(), Some("keep going"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search staleness
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn previous_filter_holds_while_new_search_is_pending() {
        let mut state = state_as(Role::Teacher);
        let id = state
            .create_notice(NoticeDraft::new("Exam", "Hall A"))
            .into_value()
            .unwrap();

        let first = state.begin_search();
        state.apply_search_result(first, HashSet::from([id]));

        state.begin_search();

        assert!(state.is_searching());
        assert_eq!(state.search_filter(), &SearchFilter::Matches(HashSet::from([id])));
        assert_eq!(state.visible_notices().len(), 1);
    }

    #[test]
    fn stale_search_completion_cannot_overwrite_newer_one() {
        let mut state = state_as(Role::Teacher);
        let id = state
            .create_notice(NoticeDraft::new("Exam", "Hall A"))
            .into_value()
            .unwrap();

        let first = state.begin_search();
        let second = state.begin_search();

        assert!(state.apply_search_result(second, HashSet::from([id])));
        assert!(!state.apply_search_result(first, HashSet::new()));

        assert_eq!(state.visible_notices().len(), 1);
        assert!(!state.is_searching());
    }

    #[test]
    fn clear_search_invalidates_in_flight_queries() {
        let mut state = state_as(Role::Teacher);

        let epoch = state.begin_search();
        state.clear_search();

        assert!(!state.apply_search_result(epoch, HashSet::new()));
        assert_eq!(state.search_filter(), &SearchFilter::Inactive);
        assert!(!state.is_searching());
    }

    #[test]
    fn empty_result_set_hides_all_notices_but_inactive_shows_all() {
        let mut state = state_as(Role::Teacher);
        state.create_notice(NoticeDraft::new("Exam", "Hall A"));

        let epoch = state.begin_search();
        state.apply_search_result(epoch, HashSet::new());
        assert!(state.visible_notices().is_empty());

        state.clear_search();
        assert_eq!(state.visible_notices().len(), 1);
    }
}
