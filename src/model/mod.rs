use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownAction;

pub mod client;
pub mod server;

/// Public view of a single cell.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "state")]
pub enum Cell {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "flagged")]
    Flagged,
    #[serde(rename = "revealed")]
    Revealed { adjacent: u8 },
    #[serde(rename = "mine")]
    Mine,
}

impl Cell {
    pub const HIDDEN_GLYPH: char = '-';
    pub const FLAG_GLYPH: char = 'F';
    pub const MINE_GLYPH: char = '*';

    /// Single character used by the text rendering.
    pub fn glyph(self) -> char {
        match self {
            Cell::Hidden => Self::HIDDEN_GLYPH,
            Cell::Flagged => Self::FLAG_GLYPH,
            Cell::Revealed { adjacent } => char::from(b'0' + adjacent.min(8)),
            Cell::Mine => Self::MINE_GLYPH,
        }
    }
}

/// Zero-based board coordinate.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameParams {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            mines: 10,
        }
    }
}

/// A move the player can make on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Reveal,
    Flag,
    Unflag,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Reveal => "reveal",
            Action::Flag => "flag",
            Action::Unflag => "unflag",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reveal" | "r" => Ok(Action::Reveal),
            "flag" | "f" => Ok(Action::Flag),
            "unflag" | "u" => Ok(Action::Unflag),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs() {
        assert_eq!(Cell::Hidden.glyph(), '-');
        assert_eq!(Cell::Flagged.glyph(), 'F');
        assert_eq!(Cell::Mine.glyph(), '*');
        assert_eq!(Cell::Revealed { adjacent: 0 }.glyph(), '0');
        assert_eq!(Cell::Revealed { adjacent: 8 }.glyph(), '8');
    }

    #[test]
    fn action_words() {
        assert_eq!("reveal".parse::<Action>(), Ok(Action::Reveal));
        assert_eq!("FLAG".parse::<Action>(), Ok(Action::Flag));
        assert_eq!("u".parse::<Action>(), Ok(Action::Unflag));
        assert_eq!(
            "dig".parse::<Action>(),
            Err(UnknownAction("dig".to_string()))
        );
        assert_eq!(
            UnknownAction("dig".to_string()).to_string(),
            "unknown action `dig`"
        );
    }

    #[test]
    fn params_fill_missing_fields_with_defaults() {
        let params: GameParams = serde_json::from_str(r#"{"rows": 4}"#).unwrap();
        assert_eq!(
            params,
            GameParams {
                rows: 4,
                cols: 9,
                mines: 10
            }
        );
    }

    #[test]
    fn cell_is_tagged_by_state() {
        let json = serde_json::to_string(&Cell::Revealed { adjacent: 3 }).unwrap();
        assert_eq!(json, r#"{"state":"revealed","adjacent":3}"#);
    }
}
