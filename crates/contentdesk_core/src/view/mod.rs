//! Presentation state: the entry form and the rendered content list.
//!
//! # Responsibility
//! - Hold form field values and control state (`form`).
//! - Project the collection into list item views (`render`).

pub mod form;
pub mod render;
