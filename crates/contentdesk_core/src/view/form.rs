//! Entry form state.

use crate::model::content::{ContentId, ContentRecord, ContentType};

pub const SAVE_LABEL: &str = "Save Content";
pub const UPDATE_LABEL: &str = "Update Content";

/// Current values and control state of the entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Hidden id field, set only while editing.
    pub content_id: Option<ContentId>,
    pub title: String,
    pub kind: Option<ContentType>,
    pub body: String,
    pub submit_label: &'static str,
    pub cancel_visible: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            content_id: None,
            title: String::new(),
            kind: None,
            body: String::new(),
            submit_label: SAVE_LABEL,
            cancel_visible: false,
        }
    }
}

impl FormState {
    /// Clears every field, including the hidden id, and restores controls.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fills the form from `record` and switches controls to update mode.
    pub fn populate(&mut self, record: &ContentRecord) {
        self.content_id = Some(record.id.clone());
        self.title = record.title.clone();
        self.kind = Some(record.kind);
        self.body = record.body.clone();
        self.submit_label = UPDATE_LABEL;
        self.cancel_visible = true;
    }

    pub fn is_blank(&self) -> bool {
        self.content_id.is_none()
            && self.title.is_empty()
            && self.kind.is_none()
            && self.body.is_empty()
    }
}
