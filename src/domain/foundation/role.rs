//! User roles within the campus portal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a signed-in user holds for the duration of a session.
///
/// The role is fixed at sign-in and drives every capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular student.
    Student,
    /// Faculty member.
    Teacher,
    /// Administrative staff.
    Admin,
    /// Class representative, a student with liaison duties.
    Cr,
}

impl Role {
    /// All roles, in presentation order.
    pub fn all() -> [Role; 4] {
        [Role::Student, Role::Teacher, Role::Admin, Role::Cr]
    }

    /// Human-readable label used in prompts and transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Admin => "Admin",
            Role::Cr => "CR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
