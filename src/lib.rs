//! Campus Hub - Role-Aware Campus Portal Client
//!
//! This crate implements the domain state and asynchronous-enrichment core
//! of a campus portal: notices, alerts, peer chat, and event-approval
//! workflows, differentiated by user role and augmented with AI-derived
//! metadata (urgency scores, summaries, semantic search).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
