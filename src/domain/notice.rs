//! Notice entity and its value objects.
//!
//! Notices are campus announcements authored by privileged roles. Two
//! fields arrive asynchronously after creation: `ranking_score` from
//! the urgency scorer and (optionally) `summary` from the summarizer.
//! Both are merged in by identifier lookup, never by holding a live
//! reference across the asynchronous gap.

use crate::domain::foundation::{NoticeId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority assigned by the notice author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticePriority {
    Critical,
    High,
    Medium,
    Low,
}

impl NoticePriority {
    /// Human-readable label used in prompts and transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            NoticePriority::Critical => "Critical",
            NoticePriority::High => "High",
            NoticePriority::Medium => "Medium",
            NoticePriority::Low => "Low",
        }
    }
}

impl fmt::Display for NoticePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Class section a notice can be targeted at.
///
/// Advisory metadata only: targeting never hides a notice from a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassSection {
    CseA,
    CseB,
    CseC,
    All,
}

impl ClassSection {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ClassSection::CseA => "CSE-A",
            ClassSection::CseB => "CSE-B",
            ClassSection::CseC => "CSE-C",
            ClassSection::All => "All",
        }
    }
}

impl fmt::Display for ClassSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Urgency score in the 1 to 100 range.
///
/// Produced by the enrichment provider; raw provider output is clamped
/// into range rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrgencyScore(u8);

impl UrgencyScore {
    /// Lowest possible urgency.
    pub const MIN: Self = Self(1);

    /// Highest possible urgency.
    pub const MAX: Self = Self(100);

    /// Neutral midpoint, used as the fallback when scoring fails.
    pub const NEUTRAL: Self = Self(50);

    /// Creates a score, clamping any integer into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for UrgencyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A notice being composed, before it is published.
///
/// Carried by the presentation layer while the author fills in the
/// form. The summarizer may populate `summary` here, pre-publication;
/// the finished draft is handed to the session for publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeDraft {
    pub title: String,
    pub content: String,
    pub priority: NoticePriority,
    pub target_audience: String,
    pub target_class: Option<ClassSection>,
    pub deadline: Option<Timestamp>,
    pub summary: Option<String>,
}

impl NoticeDraft {
    /// Creates a draft with the given title and content and neutral
    /// defaults for everything else.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            priority: NoticePriority::Medium,
            target_audience: "All Students".to_string(),
            target_class: None,
            deadline: None,
            summary: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: NoticePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the target audience text.
    pub fn with_target_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = audience.into();
        self
    }

    /// Sets the target class section.
    pub fn with_target_class(mut self, class: ClassSection) -> Self {
        self.target_class = Some(class);
        self
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: Timestamp) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a pre-publication summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Returns the name of the first required field that is blank, or
    /// `None` if the draft is complete enough to publish.
    pub fn first_blank_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.content.trim().is_empty() {
            Some("content")
        } else {
            None
        }
    }
}

/// A published campus notice.
///
/// # Invariants
///
/// - `id` is unique and never changes
/// - `ranking_score` is populated only after publication, by the
///   identifier-keyed merge path
/// - notices are never deleted in this core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Unique identifier for this notice.
    id: NoticeId,

    /// Headline shown in the list.
    title: String,

    /// Full body text.
    content: String,

    /// AI-generated one-line summary, if one has been produced.
    summary: Option<String>,

    /// Author-assigned priority.
    priority: NoticePriority,

    /// Free-text audience description.
    target_audience: String,

    /// Class section the notice is aimed at, if any.
    target_class: Option<ClassSection>,

    /// AI-derived urgency score, merged in after creation.
    ranking_score: Option<UrgencyScore>,

    /// Deadline the notice refers to, if any.
    deadline: Option<Timestamp>,

    /// When the notice was published.
    created_at: Timestamp,

    /// Display name of the author.
    author: String,
}

impl Notice {
    /// Publishes a draft as a new notice authored by `author`.
    ///
    /// Caller is responsible for having validated the draft; any
    /// pre-publication summary on the draft is carried over.
    pub fn from_draft(draft: NoticeDraft, author: impl Into<String>) -> Self {
        Self {
            id: NoticeId::new(),
            title: draft.title,
            content: draft.content,
            summary: draft.summary,
            priority: draft.priority,
            target_audience: draft.target_audience,
            target_class: draft.target_class,
            ranking_score: None,
            deadline: draft.deadline,
            created_at: Timestamp::now(),
            author: author.into(),
        }
    }

    /// Reconstitutes a notice from known field values (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: NoticeId,
        title: String,
        content: String,
        summary: Option<String>,
        priority: NoticePriority,
        target_audience: String,
        target_class: Option<ClassSection>,
        ranking_score: Option<UrgencyScore>,
        deadline: Option<Timestamp>,
        created_at: Timestamp,
        author: String,
    ) -> Self {
        Self {
            id,
            title,
            content,
            summary,
            priority,
            target_audience,
            target_class,
            ranking_score,
            deadline,
            created_at,
            author,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the notice ID.
    pub fn id(&self) -> NoticeId {
        self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the AI summary, if one has been attached.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Returns the priority.
    pub fn priority(&self) -> NoticePriority {
        self.priority
    }

    /// Returns the audience description.
    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    /// Returns the targeted class section, if any.
    pub fn target_class(&self) -> Option<ClassSection> {
        self.target_class
    }

    /// Returns the urgency score, if one has been attached.
    pub fn ranking_score(&self) -> Option<UrgencyScore> {
        self.ranking_score
    }

    /// Returns true if an urgency score has been attached.
    pub fn is_scored(&self) -> bool {
        self.ranking_score.is_some()
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<&Timestamp> {
        self.deadline.as_ref()
    }

    /// Returns when the notice was published.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the author's display name.
    pub fn author(&self) -> &str {
        &self.author
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enrichment merge targets
    // ─────────────────────────────────────────────────────────────────────────

    /// Attaches an urgency score, replacing any previous one.
    pub fn set_ranking_score(&mut self, score: UrgencyScore) {
        self.ranking_score = Some(score);
    }

    /// Attaches a summary, replacing any previous one.
    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
    }
}
