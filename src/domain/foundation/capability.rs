//! Role capability model.
//!
//! Pure mapping from a role to the set of permitted actions. No state,
//! recomputed on demand. Capability checks never fail; absence of a
//! capability means the corresponding mutation is withheld by the
//! session layer, not that an error is raised.

use super::Role;
use serde::{Deserialize, Serialize};

/// A named permission granted to a subset of roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create and publish notices.
    ComposeNotice,
    /// Approve or reject pending event requests.
    DisposeEventRequest,
    /// Read and post in the CR/teacher coordination channel.
    AccessExclusiveChannel,
    /// View the analytics dashboard.
    ViewAnalytics,
}

impl Capability {
    /// All capabilities, in no particular order.
    pub fn all() -> [Capability; 4] {
        [
            Capability::ComposeNotice,
            Capability::DisposeEventRequest,
            Capability::AccessExclusiveChannel,
            Capability::ViewAnalytics,
        ]
    }

    /// Returns true if the given role holds this capability.
    pub fn granted_to(self, role: Role) -> bool {
        match self {
            Capability::ComposeNotice => {
                matches!(role, Role::Teacher | Role::Admin | Role::Cr)
            }
            Capability::DisposeEventRequest => matches!(role, Role::Admin),
            Capability::AccessExclusiveChannel => {
                matches!(role, Role::Teacher | Role::Cr | Role::Admin)
            }
            Capability::ViewAnalytics => !matches!(role, Role::Student),
        }
    }
}

impl Role {
    /// Returns true if this role holds the given capability.
    pub fn can(self, capability: Capability) -> bool {
        capability.granted_to(self)
    }

    /// Returns every capability this role holds.
    pub fn capabilities(self) -> Vec<Capability> {
        Capability::all()
            .into_iter()
            .filter(|c| c.granted_to(self))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_notice_granted_to_teacher_admin_cr() {
        assert!(Role::Teacher.can(Capability::ComposeNotice));
        assert!(Role::Admin.can(Capability::ComposeNotice));
        assert!(Role::Cr.can(Capability::ComposeNotice));
        assert!(!Role::Student.can(Capability::ComposeNotice));
    }

    #[test]
    fn dispose_event_request_granted_only_to_admin() {
        assert!(Role::Admin.can(Capability::DisposeEventRequest));
        assert!(!Role::Teacher.can(Capability::DisposeEventRequest));
        assert!(!Role::Cr.can(Capability::DisposeEventRequest));
        assert!(!Role::Student.can(Capability::DisposeEventRequest));
    }

    #[test]
    fn exclusive_channel_excludes_student() {
        assert!(Role::Teacher.can(Capability::AccessExclusiveChannel));
        assert!(Role::Cr.can(Capability::AccessExclusiveChannel));
        assert!(Role::Admin.can(Capability::AccessExclusiveChannel));
        assert!(!Role::Student.can(Capability::AccessExclusiveChannel));
    }

    #[test]
    fn analytics_excludes_student() {
        for role in [Role::Teacher, Role::Admin, Role::Cr] {
            assert!(role.can(Capability::ViewAnalytics));
        }
        assert!(!Role::Student.can(Capability::ViewAnalytics));
    }

    #[test]
    fn student_holds_no_capabilities() {
        assert!(Role::Student.capabilities().is_empty());
    }

    #[test]
    fn admin_holds_every_capability() {
        assert_eq!(Role::Admin.capabilities().len(), Capability::all().len());
    }

    #[test]
    fn capability_checks_are_total() {
        // Every (role, capability) pair resolves without panicking.
        for role in Role::all() {
            for cap in Capability::all() {
                let _ = role.can(cap);
            }
        }
    }
}
