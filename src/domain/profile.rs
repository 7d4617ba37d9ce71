//! User profile owned by the session holder.

use serde::{Deserialize, Serialize};

/// Display identity of the signed-in user.
///
/// Mutable, but only through the session's own update operation; blank
/// updates are withheld there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    name: String,
    avatar_ref: String,
}

impl UserProfile {
    /// Creates a profile with the given display name and avatar
    /// reference.
    pub fn new(name: impl Into<String>, avatar_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar_ref: avatar_ref.into(),
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the avatar reference.
    pub fn avatar_ref(&self) -> &str {
        &self.avatar_ref
    }

    /// Replaces the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the avatar reference.
    pub fn set_avatar_ref(&mut self, avatar_ref: impl Into<String>) {
        self.avatar_ref = avatar_ref.into();
    }
}
