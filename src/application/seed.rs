//! Pre-seeded campus board.
//!
//! The collections a fresh session starts with, mirroring a portal
//! already in use: three notices, three proactive alerts, a short chat
//! history with one exclusive-channel message, and two pending event
//! requests. Timestamps are relative to session start so deadlines
//! stay in the future and history stays in the past.

use chrono::Duration;

use crate::domain::alert::{Alert, AlertKind, AlertSeverity};
use crate::domain::chat::{ChatChannel, ChatMessage};
use crate::domain::event_request::{EventRequest, RequestStatus};
use crate::domain::foundation::{MessageId, NoticeId, RequestId, Role, Timestamp};
use crate::domain::notice::{Notice, NoticePriority};

/// Avatar every session starts with.
pub const DEFAULT_AVATAR: &str = "https://picsum.photos/seed/user/100/100";

/// Display name assumed at login for the given role.
pub fn login_name(role: Role) -> &'static str {
    match role {
        Role::Student => "Charan",
        _ => "Prof. David",
    }
}

/// Collections a session starts with.
#[derive(Debug, Default)]
pub struct SeedData {
    pub notices: Vec<Notice>,
    pub alerts: Vec<Alert>,
    pub messages: Vec<ChatMessage>,
    pub requests: Vec<EventRequest>,
}

impl SeedData {
    /// No pre-seeded entities, for tests that want a blank board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The populated campus board.
    ///
    /// Seed notices carry editorial summaries but no urgency score;
    /// scoring for each of them is dispatched at login.
    pub fn campus() -> Self {
        Self {
            notices: campus_notices(),
            alerts: campus_alerts(),
            messages: campus_messages(),
            requests: campus_requests(),
        }
    }
}

fn days_ago(days: i64) -> Timestamp {
    Timestamp::now().minus_days(days)
}

fn days_ahead(days: i64) -> Timestamp {
    Timestamp::now().add_days(days)
}

fn minutes_ago(minutes: i64) -> Timestamp {
    Timestamp::from_datetime(chrono::Utc::now() - Duration::minutes(minutes))
}

fn campus_notices() -> Vec<Notice> {
    vec![
        Notice::reconstitute(
            NoticeId::new(),
            "Mid-Term Examination Schedule Released".to_string(),
            "The mid-term examinations for the current semester will commence shortly. \
             Please check the portal for your individual schedules and venue assignments."
                .to_string(),
            Some("Mid-term exams schedule released. Check portal for individual details.".to_string()),
            NoticePriority::Critical,
            "All Students".to_string(),
            None,
            None,
            Some(days_ahead(15)),
            days_ago(1),
            "Registrar Office".to_string(),
        ),
        Notice::reconstitute(
            NoticeId::new(),
            "Smart Hub Hackathon: Registration Closing".to_string(),
            "Final call for the Smart Academic Hackathon registrations! Teams must submit \
             their project abstracts by the end of this week."
                .to_string(),
            Some("Hackathon registration deadline is approaching fast.".to_string()),
            NoticePriority::High,
            "Engineering Students".to_string(),
            None,
            None,
            Some(days_ahead(3)),
            days_ago(0),
            "Innovation Hub".to_string(),
        ),
        Notice::reconstitute(
            NoticeId::new(),
            "Scheduled Campus Maintenance: Library".to_string(),
            "Maintenance will occur in the central library this weekend. Access to the \
             digital lab will be limited during the morning hours."
                .to_string(),
            Some("Library maintenance this weekend; digital lab access limited.".to_string()),
            NoticePriority::Medium,
            "All Staff and Students".to_string(),
            None,
            None,
            Some(days_ahead(2)),
            days_ago(2),
            "Facilities Dept".to_string(),
        ),
    ]
}

fn campus_alerts() -> Vec<Alert> {
    vec![
        Alert::new(
            AlertKind::Attendance,
            "Attendance dropped below 75% in Computer Networks.",
            AlertSeverity::High,
        ),
        Alert::new(
            AlertKind::Deadline,
            "Assignment \"Database Schema Design\" is due in 12 hours.",
            AlertSeverity::Medium,
        ),
        Alert::new(
            AlertKind::Engagement,
            "Low engagement detected in extra-curricular forum.",
            AlertSeverity::Low,
        ),
    ]
}

fn campus_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::reconstitute(
            MessageId::new(),
            "Prof. David".to_string(),
            Role::Teacher,
            "Has everyone submitted the draft for the network project?".to_string(),
            minutes_ago(90),
            ChatChannel::General,
        ),
        ChatMessage::reconstitute(
            MessageId::new(),
            "Prakash (CR)".to_string(),
            Role::Cr,
            "Most students have, Professor. I will follow up with the rest.".to_string(),
            minutes_ago(85),
            ChatChannel::General,
        ),
        ChatMessage::reconstitute(
            MessageId::new(),
            "Prof. David".to_string(),
            Role::Teacher,
            "Prakash, can you meet at 4 PM to discuss the picnic logistics?".to_string(),
            minutes_ago(60),
            ChatChannel::CrTeacher,
        ),
    ]
}

fn campus_requests() -> Vec<EventRequest> {
    vec![
        EventRequest::reconstitute(
            RequestId::new(),
            "Annual Departmental Picnic".to_string(),
            "A request for a day trip to Green Valley for the Computer Science department."
                .to_string(),
            "Prakash".to_string(),
            Role::Cr,
            RequestStatus::Pending,
            days_ago(3),
        ),
        EventRequest::reconstitute(
            RequestId::new(),
            "Tech Symposium 2024".to_string(),
            "Student-led conference on Emerging AI Trends.".to_string(),
            "Charan".to_string(),
            Role::Student,
            RequestStatus::Pending,
            days_ago(5),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campus_board_has_the_expected_shape() {
        let seed = SeedData::campus();

        assert_eq!(seed.notices.len(), 3);
        assert_eq!(seed.alerts.len(), 3);
        assert_eq!(seed.messages.len(), 3);
        assert_eq!(seed.requests.len(), 2);
    }

    #[test]
    fn seed_notices_are_summarized_but_unscored() {
        let seed = SeedData::campus();

        for notice in &seed.notices {
            assert!(notice.summary().is_some());
            assert!(notice.ranking_score().is_none());
        }
    }

    #[test]
    fn seed_deadlines_are_in_the_future() {
        let seed = SeedData::campus();
        let now = Timestamp::now();

        for notice in &seed.notices {
            let deadline = notice.deadline().copied().unwrap();
            assert!(deadline.is_after(&now));
        }
    }

    #[test]
    fn seed_requests_are_pending_and_newest_first() {
        let seed = SeedData::campus();

        assert!(seed.requests.iter().all(|request| request.is_pending()));
        assert!(seed.requests[0]
            .created_at()
            .is_after(seed.requests[1].created_at()));
    }

    #[test]
    fn seed_chat_includes_one_exclusive_message() {
        let seed = SeedData::campus();

        let exclusive = seed
            .messages
            .iter()
            .filter(|message| message.channel() == ChatChannel::CrTeacher)
            .count();
        assert_eq!(exclusive, 1);
    }

    #[test]
    fn login_identity_depends_on_role() {
        assert_eq!(login_name(Role::Student), "Charan");
        assert_eq!(login_name(Role::Teacher), "Prof. David");
        assert_eq!(login_name(Role::Admin), "Prof. David");
        assert_eq!(login_name(Role::Cr), "Prof. David");
    }
}
