use crate::core::sorter::SortKey;
use crate::core::view::{ResultsView, ViewState};
use crate::core::visibility::Column;
use crate::utils::error::{FlightError, Result};
use std::str::FromStr;

/// A user interaction in an interactive listing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Sort(SortKey),
    Toggle(Column),
    Show,
    Quit,
}

/// What a session does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Render this state.
    Render(ViewState),
    /// Keep the current page and show the notice.
    Stay(&'static str),
    Quit,
}

impl Command {
    /// Applies the command to `state`, whose rendering is `current`.
    ///
    /// Paging is refused when `current` reports no page in that direction.
    pub fn apply(self, state: ViewState, current: &ResultsView) -> Step {
        match self {
            Command::Next if !current.has_next => Step::Stay("Already on the last page."),
            Command::Next => Step::Render(state.next_page()),
            Command::Previous if !current.has_previous => {
                Step::Stay("Already on the first page.")
            }
            Command::Previous => Step::Render(state.previous_page()),
            Command::Sort(key) => Step::Render(state.with_sort_key(key)),
            Command::Toggle(column) => Step::Render(state.toggle_column(column)),
            Command::Show => Step::Render(state),
            Command::Quit => Step::Quit,
        }
    }

    pub fn help() -> &'static str {
        "commands: n|next, p|prev, sort <price|departure|arrival|duration|none>, \
         toggle <airline|departure|arrival|duration|stops>, show, q|quit"
    }
}

impl FromStr for Command {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or("").to_ascii_lowercase();
        let argument = parts.next();

        match (verb.as_str(), argument) {
            ("n" | "next", None) => Ok(Command::Next),
            ("p" | "prev" | "previous", None) => Ok(Command::Previous),
            ("sort", Some(key)) => Ok(Command::Sort(SortKey::parse_lenient(key))),
            ("toggle", Some(column)) => Ok(Command::Toggle(column.parse()?)),
            ("" | "show", None) => Ok(Command::Show),
            ("q" | "quit" | "exit", None) => Ok(Command::Quit),
            _ => Err(FlightError::invalid_argument("command", s.trim(), Command::help())),
        }
    }
}
