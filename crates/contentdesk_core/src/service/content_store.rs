//! In-memory content collection mirrored to one durable slot.
//!
//! # Responsibility
//! - Hold the ordered collection and apply create/update/delete.
//! - Encode/decode the whole collection to and from the slot.
//!
//! # Invariants
//! - Ids are unique within the collection.
//! - New records are prepended; edits keep position.
//! - `persist` always writes the full collection.
//! - A missing, non-text, or non-array slot loads as an empty collection.
//! - Array entries that fail the record schema are skipped one by one; the
//!   rest of the collection still loads.

use crate::clock::{Clock, SystemClock};
use crate::model::content::{ContentId, ContentInput, ContentRecord};
use crate::repo::slot_repo::{RepoError, SlotRepository};
use chrono::Duration;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default slot key, matching the original page's storage key.
pub const DEFAULT_SLOT_KEY: &str = "contents";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure. Not-found is never an error here.
#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode content collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// What `load` found in the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Slot was never written.
    Empty,
    /// Slot decoded. `dropped_duplicates` counts records skipped for
    /// repeating an earlier id, `dropped_invalid` entries that did not match
    /// the record schema.
    Loaded {
        count: usize,
        dropped_duplicates: usize,
        dropped_invalid: usize,
    },
    /// Slot content was unreadable and the collection was reset to empty.
    Recovered { reason: String },
}

/// Serializes a collection into the slot wire format (JSON array).
pub fn encode_collection(records: &[ContentRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Records recovered from one slot value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCollection {
    pub records: Vec<ContentRecord>,
    /// Array entries skipped because they did not match the record schema.
    pub dropped_invalid: usize,
}

/// Parses the slot wire format entry by entry.
///
/// # Errors
/// - Returns the JSON error only when the slot is not a JSON array.
///   Individual entries that fail (unknown content type, missing field, bad
///   timestamp) are counted in `dropped_invalid` instead.
pub fn decode_collection(raw: &str) -> Result<DecodedCollection, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut decoded = DecodedCollection {
        records: Vec::with_capacity(entries.len()),
        dropped_invalid: 0,
    };
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ContentRecord>(entry) {
            Ok(record) => decoded.records.push(record),
            Err(err) => {
                // Category only; the message may quote stored text.
                debug!(
                    "event=slot_decode module=store status=skipped index={index} category={:?}",
                    err.classify()
                );
                decoded.dropped_invalid += 1;
            }
        }
    }
    Ok(decoded)
}

/// Ordered content collection with a durable mirror.
pub struct ContentStore<R: SlotRepository> {
    repo: R,
    slot_key: String,
    records: Vec<ContentRecord>,
    clock: Box<dyn Clock>,
}

impl<R: SlotRepository> ContentStore<R> {
    /// Creates an empty store over `repo`. Call `load` to read the slot.
    pub fn new(repo: R, slot_key: impl Into<String>) -> Self {
        Self {
            repo,
            slot_key: slot_key.into(),
            records: Vec::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Records in display order (newest created first).
    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the in-memory collection with the slot content.
    ///
    /// # Errors
    /// - Returns an error only when the slot cannot be read at all.
    ///   Absent, non-text, or corrupt content is not an error.
    pub fn load(&mut self) -> StoreResult<LoadOutcome> {
        let raw = match self.repo.read_slot(&self.slot_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.records.clear();
                info!(
                    "event=store_load module=store status=ok outcome=empty key={}",
                    self.slot_key
                );
                return Ok(LoadOutcome::Empty);
            }
            Err(err @ RepoError::UnreadableSlot { .. }) => {
                return Ok(self.recover("slot_unreadable", err.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let decoded = match decode_collection(&raw) {
            Ok(decoded) => decoded,
            Err(err) => return Ok(self.recover("slot_decode_failed", err.to_string())),
        };

        let dropped_invalid = decoded.dropped_invalid;
        let mut seen = HashSet::with_capacity(decoded.records.len());
        let mut records = Vec::with_capacity(decoded.records.len());
        let mut dropped_duplicates = 0;
        for record in decoded.records {
            if seen.insert(record.id.clone()) {
                records.push(record);
            } else {
                dropped_duplicates += 1;
            }
        }
        if dropped_duplicates > 0 {
            warn!(
                "event=store_load module=store status=dedup key={} dropped={}",
                self.slot_key, dropped_duplicates
            );
        }
        if dropped_invalid > 0 {
            warn!(
                "event=store_load module=store status=partial key={} dropped_invalid={}",
                self.slot_key, dropped_invalid
            );
        }

        self.records = records;
        info!(
            "event=store_load module=store status=ok outcome=loaded key={} count={}",
            self.slot_key,
            self.records.len()
        );
        Ok(LoadOutcome::Loaded {
            count: self.records.len(),
            dropped_duplicates,
            dropped_invalid,
        })
    }

    fn recover(&mut self, error_code: &str, reason: String) -> LoadOutcome {
        self.records.clear();
        warn!(
            "event=store_load module=store status=recovered key={} error_code={} error={}",
            self.slot_key, error_code, reason
        );
        LoadOutcome::Recovered { reason }
    }

    /// Writes the whole collection to the slot.
    pub fn persist(&mut self) -> StoreResult<()> {
        let encoded = encode_collection(&self.records).map_err(StoreError::Encode)?;
        self.repo.write_slot(&self.slot_key, &encoded)?;
        debug!(
            "event=store_persist module=store status=ok key={} count={} bytes={}",
            self.slot_key,
            self.records.len(),
            encoded.len()
        );
        Ok(())
    }

    /// Inserts a new record at the head and returns it.
    pub fn create(&mut self, input: ContentInput) -> &ContentRecord {
        let record = ContentRecord::new(input, self.clock.now());
        debug!(
            "event=content_create module=store status=ok id={} type={}",
            record.id, record.kind
        );
        self.records.insert(0, record);
        &self.records[0]
    }

    /// Replaces title/type/body of `id` in place.
    ///
    /// Returns `false` (and changes nothing) when `id` is unknown.
    /// `updated_at` always moves strictly forward, even if the clock did not.
    pub fn update(&mut self, id: &ContentId, input: ContentInput) -> bool {
        let now = self.clock.now();
        let Some(record) = self.records.iter_mut().find(|record| &record.id == id) else {
            debug!("event=content_update module=store status=not_found id={id}");
            return false;
        };

        let updated_at = if now > record.updated_at {
            now
        } else {
            record.updated_at + Duration::milliseconds(1)
        };
        record.apply_edit(input, updated_at);
        debug!(
            "event=content_update module=store status=ok id={} type={}",
            record.id, record.kind
        );
        true
    }

    /// Removes the record with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: &ContentId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        let removed = self.records.len() != before;
        debug!(
            "event=content_delete module=store status={} id={id}",
            if removed { "ok" } else { "not_found" }
        );
        removed
    }

    pub fn find_by_id(&self, id: &ContentId) -> Option<&ContentRecord> {
        self.records.iter().find(|record| &record.id == id)
    }
}
