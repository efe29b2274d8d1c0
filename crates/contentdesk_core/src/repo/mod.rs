//! Durable key-value slot access.
//!
//! # Responsibility
//! - Define the contract for reading and writing one named slot.
//! - Keep SQL details out of the content store.
//!
//! # Invariants
//! - A slot holds one opaque text value; writes replace it whole.

pub mod slot_repo;
