//! Terminal command grammar.
//!
//! One line maps to at most one command; most commands map 1:1 to a
//! `UiEvent` on the controller.

use contentdesk_core::{ContentId, ContentType, ContentValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reference to a rendered item: `#n` (1-based position) or a raw id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Position(usize),
    Id(ContentId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Type(Option<ContentType>),
    Body(String),
    Save,
    Edit(ItemRef),
    Delete(ItemRef),
    Cancel,
    List,
    Form,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
    InvalidType(ContentValidationError),
    InvalidPosition(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command `{word}`; try `help`"),
            Self::MissingArgument(command) => write!(f, "`{command}` needs an argument"),
            Self::InvalidType(err) => write!(f, "{err}"),
            Self::InvalidPosition(value) => write!(f, "invalid item number `{value}`"),
        }
    }
}

impl Error for CommandError {}

pub const HELP_TEXT: &str = "\
commands:
  title <text>        set the title field
  type [label]        select article|blog|note|page (empty clears)
  body <text>         set the body field (\\n for line breaks)
  save                submit the form
  edit <#n|id>        load an item into the form
  delete <#n|id>      delete an item (asks for confirmation)
  cancel              leave edit mode
  list | form         show the list or the form
  help | quit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "title" => Command::Title(rest.to_string()),
        "type" if rest.is_empty() => Command::Type(None),
        "type" => Command::Type(Some(rest.parse().map_err(CommandError::InvalidType)?)),
        "body" => Command::Body(rest.replace("\\n", "\n")),
        "save" => Command::Save,
        "edit" => Command::Edit(parse_item_ref("edit", rest)?),
        "delete" | "rm" => Command::Delete(parse_item_ref("delete", rest)?),
        "cancel" => Command::Cancel,
        "list" | "ls" => Command::List,
        "form" => Command::Form,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_item_ref(command: &'static str, value: &str) -> Result<ItemRef, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    match value.strip_prefix('#') {
        Some(number) => match number.parse::<usize>() {
            Ok(position) if position > 0 => Ok(ItemRef::Position(position)),
            _ => Err(CommandError::InvalidPosition(value.to_string())),
        },
        None => Ok(ItemRef::Id(ContentId::from(value))),
    }
}
