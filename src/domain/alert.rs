//! Alert entity.
//!
//! Alerts are externally supplied, read-only signals. The session
//! holds them as a static feed; no create or update path exists here.

use crate::domain::foundation::AlertId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of signal the alert carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Attendance,
    Deadline,
    Engagement,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertKind::Attendance => "attendance",
            AlertKind::Deadline => "deadline",
            AlertKind::Engagement => "engagement",
        };
        write!(f, "{}", label)
    }
}

/// How pressing the alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

/// A read-only alert from the campus monitoring feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    id: AlertId,
    kind: AlertKind,
    message: String,
    severity: AlertSeverity,
}

impl Alert {
    /// Creates an alert record.
    pub fn new(kind: AlertKind, message: impl Into<String>, severity: AlertSeverity) -> Self {
        Self {
            id: AlertId::new(),
            kind,
            message: message.into(),
            severity,
        }
    }

    /// Returns the alert ID.
    pub fn id(&self) -> AlertId {
        self.id
    }

    /// Returns the alert kind.
    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    /// Returns the alert message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity.
    pub fn severity(&self) -> AlertSeverity {
        self.severity
    }
}
