//! Content domain model.
//!
//! # Responsibility
//! - Define the single persisted entity (`ContentRecord`) and its identity.
//! - Validate raw form input at the boundary where it enters the system.
//!
//! # Invariants
//! - Every record is identified by a stable `ContentId`.
//! - Content type is a closed enumeration, never free text.

pub mod content;
