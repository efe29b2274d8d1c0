//! Content use-case services.
//!
//! # Responsibility
//! - Own the in-memory collection and its durable mirror (`content_store`).
//! - Drive the form/list state machine from UI events (`controller`).

pub mod content_store;
pub mod controller;
