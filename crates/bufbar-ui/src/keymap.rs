//! Default key bindings for the terminal front end
//!
//! | Key                | Action                    |
//! |--------------------|---------------------------|
//! | `l` / `Tab`        | Next buffer               |
//! | `h` / `Shift+Tab`  | Previous buffer           |
//! | `L` / `H`          | Move buffer right / left  |
//! | `p`                | Pick a buffer             |
//! | `P`                | Pick a buffer to close    |
//! | `[` / `]`          | Close buffers left / right|
//! | `o`                | Close other buffers       |
//! | `1`..`9`           | Go to visible buffer N    |
//! | `0`                | Go to last buffer         |
//! | `t`                | Toggle pin                |
//! | `c`                | Clear the custom order    |
//! | `i` `f` `e` `d` `r`| Sort by id, path, extension, directory, relative directory |
//! | `q` / `Esc` / `Ctrl+C` | Quit                  |

use bufbar_core::{Command, Direction, SortKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Run a bar command
    Command(Command),
    /// Leave the application
    Quit,
}

/// Maps a key press to an action. Unbound keys and key releases map to
/// `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let command = match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc | KeyCode::Char('q')) => {
            return Some(KeyAction::Quit)
        }
        (_, KeyCode::Char('l') | KeyCode::Tab) => Command::Cycle(Direction::Right),
        (_, KeyCode::Char('h') | KeyCode::BackTab) => Command::Cycle(Direction::Left),
        (_, KeyCode::Char('L')) => Command::Move(Direction::Right),
        (_, KeyCode::Char('H')) => Command::Move(Direction::Left),
        (_, KeyCode::Char('p')) => Command::PickBuffer,
        (_, KeyCode::Char('P')) => Command::PickAndClose,
        (_, KeyCode::Char('[')) => Command::CloseInDirection(Direction::Left),
        (_, KeyCode::Char(']')) => Command::CloseInDirection(Direction::Right),
        (_, KeyCode::Char('o')) => Command::CloseOthers,
        (_, KeyCode::Char('t')) => Command::TogglePin,
        (_, KeyCode::Char('c')) => Command::ClearOrder,
        (_, KeyCode::Char('i')) => Command::SortBy(SortKind::Id),
        (_, KeyCode::Char('f')) => Command::SortBy(SortKind::Path),
        (_, KeyCode::Char('e')) => Command::SortBy(SortKind::Extension),
        (_, KeyCode::Char('d')) => Command::SortBy(SortKind::Directory),
        (_, KeyCode::Char('r')) => Command::SortBy(SortKind::RelativeDirectory),
        (_, KeyCode::Char('0')) => Command::GoTo {
            index: -1,
            absolute: false,
        },
        (_, KeyCode::Char(digit @ '1'..='9')) => Command::GoTo {
            index: i64::from(digit.to_digit(10)?),
            absolute: false,
        },
        _ => return None,
    };
    Some(KeyAction::Command(command))
}

/// Short hint text for the status line.
pub const KEY_HINTS: &str = "h/l:cycle  H/L:move  p:pick  P:close  1-9:go  q:quit";
