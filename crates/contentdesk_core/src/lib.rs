//! Core of ContentDesk: a single-user content manager.
//! Owns the content collection, its durable slot mirror, the entry form
//! controller, and list rendering. Front ends only translate input into
//! `UiEvent`s and display the resulting `ListView`.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::content::{
    ContentId, ContentInput, ContentRecord, ContentType, ContentValidationError,
};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use service::content_store::{
    decode_collection, encode_collection, ContentStore, DecodedCollection, LoadOutcome,
    StoreError, StoreResult, DEFAULT_SLOT_KEY,
};
pub use service::controller::{
    Controller, EditMode, EventOutcome, Prompt, UiEvent, DELETE_CONFIRM_MESSAGE,
    VALIDATION_MESSAGE,
};
pub use view::form::{FormState, SAVE_LABEL, UPDATE_LABEL};
pub use view::render::{
    ActionControl, ItemView, ListAction, ListView, Renderer, TimestampFormat, UnknownLocaleError,
    EMPTY_PLACEHOLDER,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
