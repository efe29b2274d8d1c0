//! SQLite bootstrap for the durable key-value slot store.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the durable slots.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Slots must not be read or written before migrations succeed.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
