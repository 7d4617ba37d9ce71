//! Chat channels and messages.
//!
//! The chat log is append-only. A message's channel is fixed at
//! creation and decides which roles can see it.

use crate::domain::foundation::{Capability, MessageId, Role, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named partition of the chat log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatChannel {
    /// Open to every role.
    General,
    /// Coordination channel for teachers, class representatives, and
    /// admins. Students can neither read nor post here.
    CrTeacher,
}

impl ChatChannel {
    /// Both channels, in presentation order.
    pub fn all() -> [ChatChannel; 2] {
        [ChatChannel::General, ChatChannel::CrTeacher]
    }

    /// Returns true if posting here requires the exclusive-channel
    /// capability.
    pub fn requires_exclusive_access(&self) -> bool {
        matches!(self, ChatChannel::CrTeacher)
    }

    /// Returns true if the given role can read this channel.
    pub fn visible_to(&self, role: Role) -> bool {
        match self {
            ChatChannel::General => true,
            ChatChannel::CrTeacher => role.can(Capability::AccessExclusiveChannel),
        }
    }
}

impl fmt::Display for ChatChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChatChannel::General => "General",
            ChatChannel::CrTeacher => "CR/Teacher",
        };
        write!(f, "{}", label)
    }
}

/// An immutable message in the chat log.
///
/// # Invariants
///
/// - `id` is unique
/// - `channel` never changes after creation
/// - ordering within a channel is append order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    sender: String,
    sender_role: Role,
    content: String,
    timestamp: Timestamp,
    channel: ChatChannel,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    ///
    /// Caller is responsible for having validated the content.
    pub fn new(
        sender: impl Into<String>,
        sender_role: Role,
        content: impl Into<String>,
        channel: ChatChannel,
    ) -> Self {
        Self {
            id: MessageId::new(),
            sender: sender.into(),
            sender_role,
            content: content.into(),
            timestamp: Timestamp::now(),
            channel,
        }
    }

    /// Rebuilds a message from already-validated parts.
    pub fn reconstitute(
        id: MessageId,
        sender: String,
        sender_role: Role,
        content: String,
        timestamp: Timestamp,
        channel: ChatChannel,
    ) -> Self {
        Self {
            id,
            sender,
            sender_role,
            content,
            timestamp,
            channel,
        }
    }

    /// Returns the message ID.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sender's display name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the role the sender held when posting.
    pub fn sender_role(&self) -> Role {
        self.sender_role
    }

    /// Returns the message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was posted.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Returns the channel this message lives in.
    pub fn channel(&self) -> ChatChannel {
        self.channel
    }
}
