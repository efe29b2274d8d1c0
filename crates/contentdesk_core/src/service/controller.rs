//! Form/list controller.
//!
//! # Responsibility
//! - Translate UI events into store mutations and form state changes.
//! - Persist and re-render after every mutating transition.
//! - Dispatch every list click through one delegated handler keyed by the
//!   control's tagged record id.
//!
//! # Invariants
//! - Invalid submits never mutate the collection, the mode, or the form.
//! - Deletes happen only after the prompt confirms them.
//! - `Editing(id)` always refers to a record that existed when editing began;
//!   deleting that record returns the controller to `Idle`.

use crate::model::content::{ContentId, ContentInput, ContentType, ContentValidationError};
use crate::repo::slot_repo::SlotRepository;
use crate::service::content_store::{ContentStore, LoadOutcome, StoreResult};
use crate::view::form::FormState;
use crate::view::render::{ActionControl, ListAction, ListView, Renderer};
use log::{debug, info};

pub const VALIDATION_MESSAGE: &str = "Please fill in all fields";
pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this content?";

/// Blocking user dialogs raised by the controller.
pub trait Prompt {
    /// Shows a message the user must acknowledge.
    fn alert(&mut self, message: &str);
    /// Asks a yes/no question; `true` means confirmed.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Whether the form creates new content or updates an existing record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(ContentId),
}

/// Input events from the UI surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TitleInput(String),
    TypeSelected(Option<ContentType>),
    BodyInput(String),
    Submit,
    /// A click on any per-item control inside the list region.
    ListClick(ActionControl),
    CancelClick,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    FormChanged,
    Created(ContentId),
    Updated(ContentId),
    Deleted(ContentId),
    Rejected(ContentValidationError),
    EditStarted(ContentId),
    EditCancelled,
    DeleteDeclined,
    /// Event had no effect (unknown id, cancel while idle, ...).
    Ignored,
}

/// Owns the store, the form, and the last rendered list.
pub struct Controller<R: SlotRepository> {
    store: ContentStore<R>,
    renderer: Renderer,
    mode: EditMode,
    form: FormState,
    view: ListView,
}

impl<R: SlotRepository> Controller<R> {
    /// Wraps an already-loaded store and renders it once.
    pub fn new(store: ContentStore<R>, renderer: Renderer) -> Self {
        let view = renderer.render(store.records());
        Self {
            store,
            renderer,
            mode: EditMode::Idle,
            form: FormState::default(),
            view,
        }
    }

    /// Loads the store from its slot, then builds the controller.
    pub fn init(
        mut store: ContentStore<R>,
        renderer: Renderer,
    ) -> StoreResult<(Self, LoadOutcome)> {
        let outcome = store.load()?;
        Ok((Self::new(store, renderer), outcome))
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn store(&self) -> &ContentStore<R> {
        &self.store
    }

    /// Handles one UI event to completion.
    ///
    /// # Errors
    /// - Returns a store error when persisting fails. In-memory state keeps
    ///   the mutation; the next successful persist writes it.
    pub fn handle(
        &mut self,
        event: UiEvent,
        prompt: &mut dyn Prompt,
    ) -> StoreResult<EventOutcome> {
        match event {
            UiEvent::TitleInput(value) => {
                self.form.title = value;
                Ok(EventOutcome::FormChanged)
            }
            UiEvent::TypeSelected(kind) => {
                self.form.kind = kind;
                Ok(EventOutcome::FormChanged)
            }
            UiEvent::BodyInput(value) => {
                self.form.body = value;
                Ok(EventOutcome::FormChanged)
            }
            UiEvent::Submit => self.submit(prompt),
            UiEvent::ListClick(control) => self.list_click(control, prompt),
            UiEvent::CancelClick => Ok(self.cancel()),
        }
    }

    fn submit(&mut self, prompt: &mut dyn Prompt) -> StoreResult<EventOutcome> {
        let input = match ContentInput::new(&self.form.title, self.form.kind, &self.form.body) {
            Ok(input) => input,
            Err(err) => {
                info!("event=ui_submit module=controller status=rejected reason={err}");
                prompt.alert(VALIDATION_MESSAGE);
                return Ok(EventOutcome::Rejected(err));
            }
        };

        let outcome = match std::mem::take(&mut self.mode) {
            EditMode::Idle => {
                let id = self.store.create(input).id.clone();
                info!("event=ui_submit module=controller status=created id={id}");
                EventOutcome::Created(id)
            }
            EditMode::Editing(id) => {
                if self.store.update(&id, input) {
                    info!("event=ui_submit module=controller status=updated id={id}");
                    EventOutcome::Updated(id)
                } else {
                    info!("event=ui_submit module=controller status=not_found id={id}");
                    EventOutcome::Ignored
                }
            }
        };

        self.form.reset();
        self.commit()?;
        Ok(outcome)
    }

    /// Delegated handler for every control in the list region.
    fn list_click(
        &mut self,
        control: ActionControl,
        prompt: &mut dyn Prompt,
    ) -> StoreResult<EventOutcome> {
        match control.action {
            ListAction::Edit => Ok(self.begin_edit(control.target)),
            ListAction::Delete => self.delete(control.target, prompt),
        }
    }

    fn begin_edit(&mut self, id: ContentId) -> EventOutcome {
        let Some(record) = self.store.find_by_id(&id) else {
            debug!("event=ui_edit module=controller status=not_found id={id}");
            return EventOutcome::Ignored;
        };

        self.form.populate(record);
        self.mode = EditMode::Editing(id.clone());
        info!("event=ui_edit module=controller status=editing id={id}");
        EventOutcome::EditStarted(id)
    }

    fn delete(&mut self, id: ContentId, prompt: &mut dyn Prompt) -> StoreResult<EventOutcome> {
        if !prompt.confirm(DELETE_CONFIRM_MESSAGE) {
            debug!("event=ui_delete module=controller status=declined id={id}");
            return Ok(EventOutcome::DeleteDeclined);
        }

        let removed = self.store.delete(&id);
        if self.mode == EditMode::Editing(id.clone()) {
            self.mode = EditMode::Idle;
            self.form.reset();
        }
        self.commit()?;

        if removed {
            info!("event=ui_delete module=controller status=deleted id={id}");
            Ok(EventOutcome::Deleted(id))
        } else {
            debug!("event=ui_delete module=controller status=not_found id={id}");
            Ok(EventOutcome::Ignored)
        }
    }

    fn cancel(&mut self) -> EventOutcome {
        if self.mode == EditMode::Idle {
            return EventOutcome::Ignored;
        }

        self.mode = EditMode::Idle;
        self.form.reset();
        info!("event=ui_cancel module=controller status=ok");
        EventOutcome::EditCancelled
    }

    fn commit(&mut self) -> StoreResult<()> {
        let persisted = self.store.persist();
        self.view = self.renderer.render(self.store.records());
        persisted
    }
}
