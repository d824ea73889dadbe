use serde::{Deserialize, Serialize};

use super::{Action, Pos};
use crate::error::CommandError;

/// One line of player input, either typed (`reveal 2 3`) or sent as JSON
/// (`{"action":"reveal","pos":{"row":2,"col":3}}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action")]
pub enum ClientMessage {
    #[serde(rename = "reveal")]
    Reveal { pos: Pos },
    #[serde(rename = "flag")]
    Flag { pos: Pos },
    #[serde(rename = "unflag")]
    Unflag { pos: Pos },
    #[serde(rename = "show")]
    Show,
    #[serde(rename = "quit")]
    Quit,
    /// Any action the engine does not know. Ignored by the session.
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    pub fn from_move(pos: Pos, action: Action) -> Self {
        match action {
            Action::Reveal => ClientMessage::Reveal { pos },
            Action::Flag => ClientMessage::Flag { pos },
            Action::Unflag => ClientMessage::Unflag { pos },
        }
    }

    /// The board move carried by this message, if any.
    pub fn as_move(&self) -> Option<(Pos, Action)> {
        match *self {
            ClientMessage::Reveal { pos } => Some((pos, Action::Reveal)),
            ClientMessage::Flag { pos } => Some((pos, Action::Flag)),
            ClientMessage::Unflag { pos } => Some((pos, Action::Unflag)),
            _ => None,
        }
    }

    /// Parses a single input line.
    ///
    /// Lines starting with `{` are decoded as JSON, everything else as
    /// whitespace separated words. Unknown action words map to
    /// [`ClientMessage::Unknown`] rather than an error.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        if line.starts_with('{') {
            return Ok(serde_json::from_str(line)?);
        }

        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };
        match word.to_ascii_lowercase().as_str() {
            "show" => return Ok(ClientMessage::Show),
            "quit" | "exit" | "q" => return Ok(ClientMessage::Quit),
            _ => {}
        }
        let Ok(action) = word.parse::<Action>() else {
            return Ok(ClientMessage::Unknown);
        };

        let row = parse_coordinate(words.next(), "row")?;
        let col = parse_coordinate(words.next(), "col")?;
        Ok(ClientMessage::from_move(Pos::new(row, col), action))
    }
}

fn parse_coordinate(word: Option<&str>, name: &'static str) -> Result<usize, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument(name))?;
    word.parse().map_err(|_| CommandError::InvalidNumber {
        name,
        value: word.to_string(),
    })
}
