use std::path::PathBuf;

use sweeper_core::{CellIndex, Coord, position_to_index};
use thiserror::Error;

/// Row labels, which also caps the playable grid at 26 rows.
pub const ROW_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest grid that can be addressed with [`ROW_LABELS`].
pub const MAX_GRID_SIZE: Coord = ROW_LABELS.len() as Coord;

pub const HELP_TEXT: &str = "\
h                - Help.
<letter><num>    - Select a cell (e.g. 'A1')
f <letter><num>  - Place or remove a flag (e.g. 'f A1')
save <file>      - Save the current game
load <file>      - Load a saved game
r                - Restart with the same layout
:)               - Start a new game with a new layout
q                - Quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Select(CellIndex),
    Flag(CellIndex),
    Restart,
    NewGame,
    Help,
    Quit,
    Save(PathBuf),
    Load(PathBuf),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("That is not a valid action, type 'h' for help.")]
    Unrecognized,
    #[error("'{0}' is not a cell on this grid.")]
    InvalidPosition(String),
    #[error("A file name is required.")]
    MissingPath,
}

impl Command {
    pub fn parse(input: &str, grid_size: Coord) -> Result<Self, CommandError> {
        let input = input.trim();
        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((input, ""));

        match (word, rest) {
            ("h", "") => Ok(Self::Help),
            ("q", "") => Ok(Self::Quit),
            ("r", "") => Ok(Self::Restart),
            (":)", "") => Ok(Self::NewGame),
            ("f", position) if !position.is_empty() => {
                parse_position(position, grid_size).map(Self::Flag)
            }
            ("save", path) => parse_path(path).map(Self::Save),
            ("load", path) => parse_path(path).map(Self::Load),
            (position, "") if looks_like_position(position) => {
                parse_position(position, grid_size).map(Self::Select)
            }
            _ => Err(CommandError::Unrecognized),
        }
    }
}

/// Converts `"B3"` style labels into a linear index, rows by letter and columns from 1.
pub fn parse_position(text: &str, grid_size: Coord) -> Result<CellIndex, CommandError> {
    let invalid = || CommandError::InvalidPosition(text.to_owned());

    let mut chars = text.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let row = ROW_LABELS.find(letter).ok_or_else(invalid)?;
    let column: usize = chars.as_str().parse().map_err(|_| invalid())?;
    let column = column.checked_sub(1).ok_or_else(invalid)?;

    let row = Coord::try_from(row).map_err(|_| invalid())?;
    let column = Coord::try_from(column).map_err(|_| invalid())?;
    position_to_index((row, column), grid_size).map_err(|_| invalid())
}

fn looks_like_position(text: &str) -> bool {
    let mut chars = text.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let digits = chars.as_str();
    starts_with_letter && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn parse_path(text: &str) -> Result<PathBuf, CommandError> {
    if text.is_empty() {
        Err(CommandError::MissingPath)
    } else {
        Ok(PathBuf::from(text))
    }
}
