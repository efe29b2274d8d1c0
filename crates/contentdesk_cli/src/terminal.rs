//! Line-oriented terminal surface for the content controller.
//!
//! # Responsibility
//! - Read commands, turn them into `UiEvent`s, and print the results.
//! - Answer controller dialogs (`alert`, `confirm`) on the same streams.
//!
//! # Invariants
//! - The list is printed after every event that re-renders it.
//! - Store errors are reported and the session keeps running.

use crate::command::{parse_command, Command, ItemRef, HELP_TEXT};
use contentdesk_core::{
    ActionControl, Controller, EventOutcome, FormState, ListAction, Prompt, SlotRepository,
    UiEvent,
};
use log::error;
use std::io::{self, BufRead, Write};

/// Input/output pair acting as the page.
pub struct Terminal<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Terminal<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<I: BufRead, O: Write> Prompt for Terminal<I, O> {
    fn alert(&mut self, message: &str) {
        // A broken stdout leaves nothing to report to.
        let _ = writeln!(self.output, "! {message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        let _ = write!(self.output, "{message} [y/N] ");
        let _ = self.output.flush();
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// Runs the read-dispatch-print loop until `quit` or end of input.
pub fn run_session<R, I, O>(
    controller: &mut Controller<R>,
    terminal: &mut Terminal<I, O>,
) -> io::Result<()>
where
    R: SlotRepository,
    I: BufRead,
    O: Write,
{
    write!(terminal.output, "{}", controller.view())?;
    loop {
        write!(terminal.output, "> ")?;
        terminal.output.flush()?;

        let Some(line) = terminal.read_line()? else {
            writeln!(terminal.output)?;
            return Ok(());
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(terminal.output, "! {err}")?;
                continue;
            }
        };

        let event = match command {
            Command::Quit => return Ok(()),
            Command::Help => {
                writeln!(terminal.output, "{HELP_TEXT}")?;
                continue;
            }
            Command::List => {
                write!(terminal.output, "{}", controller.view())?;
                continue;
            }
            Command::Form => {
                writeln!(terminal.output, "{}", describe_form(controller.form()))?;
                continue;
            }
            Command::Title(value) => UiEvent::TitleInput(value),
            Command::Type(kind) => UiEvent::TypeSelected(kind),
            Command::Body(value) => UiEvent::BodyInput(value),
            Command::Save => UiEvent::Submit,
            Command::Cancel => UiEvent::CancelClick,
            Command::Edit(item) => match list_click(controller, ListAction::Edit, &item) {
                Some(event) => event,
                None => {
                    writeln!(terminal.output, "! no item {}", describe_ref(&item))?;
                    continue;
                }
            },
            Command::Delete(item) => match list_click(controller, ListAction::Delete, &item) {
                Some(event) => event,
                None => {
                    writeln!(terminal.output, "! no item {}", describe_ref(&item))?;
                    continue;
                }
            },
        };

        match controller.handle(event, terminal) {
            Ok(outcome) => report(controller, terminal, &outcome)?,
            Err(err) => {
                error!("event=ui_dispatch module=cli status=error error={err}");
                writeln!(terminal.output, "! could not save: {err}")?;
                write!(terminal.output, "{}", controller.view())?;
            }
        }
    }
}

fn report<R, I, O>(
    controller: &Controller<R>,
    terminal: &mut Terminal<I, O>,
    outcome: &EventOutcome,
) -> io::Result<()>
where
    R: SlotRepository,
    I: BufRead,
    O: Write,
{
    let out = &mut terminal.output;
    match outcome {
        EventOutcome::FormChanged | EventOutcome::Rejected(_) | EventOutcome::DeleteDeclined => {
            Ok(())
        }
        EventOutcome::EditStarted(_) | EventOutcome::EditCancelled => {
            writeln!(out, "{}", describe_form(controller.form()))
        }
        EventOutcome::Created(_)
        | EventOutcome::Updated(_)
        | EventOutcome::Deleted(_)
        | EventOutcome::Ignored => write!(out, "{}", controller.view()),
    }
}

/// Builds the click for `item`, mapping `#n` through the current view.
///
/// Ids pass through untouched; an out-of-range position yields `None`.
fn list_click<R: SlotRepository>(
    controller: &Controller<R>,
    action: ListAction,
    item: &ItemRef,
) -> Option<UiEvent> {
    let target = match item {
        ItemRef::Position(position) => controller
            .view()
            .items()
            .get(position.checked_sub(1)?)?
            .id
            .clone(),
        ItemRef::Id(id) => id.clone(),
    };
    Some(UiEvent::ListClick(ActionControl { action, target }))
}

fn describe_ref(item: &ItemRef) -> String {
    match item {
        ItemRef::Position(position) => format!("#{position}"),
        ItemRef::Id(id) => id.to_string(),
    }
}

fn describe_form(form: &FormState) -> String {
    let kind = form.kind.map_or("-", |kind| kind.as_str());
    let mut text = format!(
        "[{}] title={:?} type={} body={:?}",
        form.submit_label, form.title, kind, form.body
    );
    if let Some(id) = &form.content_id {
        text.push_str(&format!(" id={id}"));
    }
    if form.cancel_visible {
        text.push_str(" (cancel available)");
    }
    text
}
