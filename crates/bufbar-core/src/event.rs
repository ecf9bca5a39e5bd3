//! Host events and user commands.

use crate::error::CoreError;
use crate::host::DocumentId;
use crate::sorter::SortKind;
use crossterm::event::MouseButton;
use std::str::FromStr;

/// Editor notifications that require the bar to be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A document was created or opened
    DocumentAdded(DocumentId),
    /// A document's contents were loaded from disk
    DocumentRead(DocumentId),
    /// Focus moved to a document
    DocumentEntered(DocumentId),
    /// Focus moved to another tab page
    TabEntered,
    ColorSchemeChanged,
    /// A saved session was restored; persisted order and pins are reloaded
    SessionLoaded,
    /// The bar width changed
    Resized,
}

/// Direction along the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Index offset of one step in this direction.
    #[must_use]
    pub fn step(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Names accepted by [`Command::from_str`], for help output.
pub const COMMAND_NAMES: &[&str] = &[
    "pick-buffer",
    "pick-and-close",
    "cycle-next",
    "cycle-prev",
    "close-left",
    "close-right",
    "close-others",
    "move-next",
    "move-prev",
    "move-to N",
    "sort-by-id",
    "sort-by-path",
    "sort-by-extension",
    "sort-by-directory",
    "sort-by-relative-directory",
    "sort-by-tabs",
    "go-to-buffer N",
    "go-to-absolute N",
    "group-close NAME",
    "group-toggle NAME",
    "toggle-pin",
    "clear-order",
];

/// A user-facing bar operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PickBuffer,
    PickAndClose,
    Cycle(Direction),
    CloseInDirection(Direction),
    CloseOthers,
    Move(Direction),
    /// Move the current element to a 1-based position; `-1` is last
    MoveTo(i64),
    SortBy(SortKind),
    /// Focus the element at a 1-based position; `-1` is last
    GoTo { index: i64, absolute: bool },
    GroupClose(String),
    GroupToggle(String),
    TogglePin,
    /// Drop the custom order and go back to the configured sort
    ClearOrder,
    /// Mouse click on an element
    Click { id: u64, button: MouseButton },
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| CoreError::InvalidCommand(s.to_string()))?;
        let argument = words.next();
        if words.next().is_some() {
            return Err(CoreError::InvalidCommand(s.to_string()));
        }

        let index = || -> Result<i64, CoreError> {
            argument
                .and_then(|arg| arg.parse().ok())
                .ok_or_else(|| CoreError::InvalidCommand(s.to_string()))
        };
        let group = || -> Result<String, CoreError> {
            argument
                .map(str::to_string)
                .ok_or_else(|| CoreError::InvalidCommand(s.to_string()))
        };
        let no_argument = |command: Command| -> Result<Command, CoreError> {
            match argument {
                None => Ok(command),
                Some(_) => Err(CoreError::InvalidCommand(s.to_string())),
            }
        };

        match name {
            "pick-buffer" => no_argument(Command::PickBuffer),
            "pick-and-close" => no_argument(Command::PickAndClose),
            "cycle-next" => no_argument(Command::Cycle(Direction::Right)),
            "cycle-prev" => no_argument(Command::Cycle(Direction::Left)),
            "close-left" => no_argument(Command::CloseInDirection(Direction::Left)),
            "close-right" => no_argument(Command::CloseInDirection(Direction::Right)),
            "close-others" => no_argument(Command::CloseOthers),
            "move-next" => no_argument(Command::Move(Direction::Right)),
            "move-prev" => no_argument(Command::Move(Direction::Left)),
            "move-to" => Ok(Command::MoveTo(index()?)),
            "sort-by-id" => no_argument(Command::SortBy(SortKind::Id)),
            "sort-by-path" => no_argument(Command::SortBy(SortKind::Path)),
            "sort-by-extension" => no_argument(Command::SortBy(SortKind::Extension)),
            "sort-by-directory" => no_argument(Command::SortBy(SortKind::Directory)),
            "sort-by-relative-directory" => {
                no_argument(Command::SortBy(SortKind::RelativeDirectory))
            }
            "sort-by-tabs" => no_argument(Command::SortBy(SortKind::Tabs)),
            "go-to-buffer" => Ok(Command::GoTo {
                index: index()?,
                absolute: false,
            }),
            "go-to-absolute" => Ok(Command::GoTo {
                index: index()?,
                absolute: true,
            }),
            "group-close" => Ok(Command::GroupClose(group()?)),
            "group-toggle" => Ok(Command::GroupToggle(group()?)),
            "toggle-pin" => no_argument(Command::TogglePin),
            "clear-order" => no_argument(Command::ClearOrder),
            _ => Err(CoreError::InvalidCommand(s.to_string())),
        }
    }
}
