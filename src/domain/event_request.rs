//! Event-request workflow.
//!
//! Requests are created in `Pending` and move exactly once to
//! `Approved` or `Rejected`. Both outcomes are terminal; a second
//! disposition attempt leaves the request untouched.

use crate::domain::foundation::{RequestId, Role, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an event request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Returns true if a transition from self to target is valid.
    pub fn can_transition_to(&self, target: &RequestStatus) -> bool {
        matches!(
            (self, target),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }

    /// Returns all valid target states from the current state.
    pub fn valid_transitions(&self) -> Vec<RequestStatus> {
        match self {
            RequestStatus::Pending => vec![RequestStatus::Approved, RequestStatus::Rejected],
            RequestStatus::Approved | RequestStatus::Rejected => vec![],
        }
    }

    /// Returns true if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        };
        write!(f, "{}", label)
    }
}

/// An admin's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Approve,
    Reject,
}

impl Disposition {
    /// The status this disposition moves a pending request to.
    pub fn target_status(self) -> RequestStatus {
        match self {
            Disposition::Approve => RequestStatus::Approved,
            Disposition::Reject => RequestStatus::Rejected,
        }
    }
}

/// A request for an event, awaiting admin disposition.
///
/// # Invariants
///
/// - `id` is unique
/// - `status` starts at `Pending` and changes at most once
/// - `requester` and `requester_role` record who submitted, at
///   submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    id: RequestId,
    title: String,
    description: String,
    requester: String,
    requester_role: Role,
    status: RequestStatus,
    created_at: Timestamp,
}

impl EventRequest {
    /// Creates a pending request submitted by the given user.
    ///
    /// Caller is responsible for having validated title and
    /// description.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        requester: impl Into<String>,
        requester_role: Role,
    ) -> Self {
        Self {
            id: RequestId::new(),
            title: title.into(),
            description: description.into(),
            requester: requester.into(),
            requester_role,
            status: RequestStatus::Pending,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a request from known field values (no validation).
    pub fn reconstitute(
        id: RequestId,
        title: String,
        description: String,
        requester: String,
        requester_role: Role,
        status: RequestStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            description,
            requester,
            requester_role,
            status,
            created_at,
        }
    }

    /// Applies a disposition if the request is still pending.
    ///
    /// Returns true if the status changed, false if the request had
    /// already been resolved.
    pub fn apply_disposition(&mut self, disposition: Disposition) -> bool {
        let target = disposition.target_status();
        if self.status.can_transition_to(&target) {
            self.status = target;
            true
        } else {
            false
        }
    }

    /// Returns the request ID.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the requester's display name.
    pub fn requester(&self) -> &str {
        &self.requester
    }

    /// Returns the role the requester held at submission.
    pub fn requester_role(&self) -> Role {
        self.requester_role
    }

    /// Returns the current status.
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns true if no disposition has been applied yet.
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Returns when the request was submitted.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
