//! Domain layer containing the portal's entities and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (typed ids, timestamps, roles,
//!   capabilities, mutation outcomes)
//! - `notice` - Campus notices and their AI-enriched metadata
//! - `alert` - Read-only alert feed entries
//! - `chat` - Channel-scoped chat messages
//! - `event_request` - Event requests and their approval state machine
//! - `profile` - The session holder's editable profile

pub mod alert;
pub mod chat;
pub mod event_request;
pub mod foundation;
pub mod notice;
pub mod profile;
