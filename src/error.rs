use thiserror::Error;

use crate::model::Pos;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The mine count does not leave at least one safe cell, or the board has no cells.
    #[error("cannot place {mines} mines on a {rows}x{cols} board")]
    InvalidConfiguration {
        rows: usize,
        cols: usize,
        mines: usize,
    },
    #[error("{pos} is outside the {rows}x{cols} board")]
    InvalidCoordinate { pos: Pos, rows: usize, cols: usize },
    #[error("mine at {pos} was given more than once")]
    DuplicateMine { pos: Pos },
}

/// Returned when an action word is not one of `reveal`, `flag` or `unflag`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action `{0}`")]
pub struct UnknownAction(pub String);

/// Returned when an output format name is not `text` or `json`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format `{0}`")]
pub struct UnknownOutputFormat(pub String);

/// Problems with a single line of player input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("missing {0} coordinate")]
    MissingArgument(&'static str),
    #[error("{name} must be a non-negative integer, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },
    #[error("invalid JSON command: {0}")]
    Json(String),
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::Json(err.to_string())
    }
}
