use std::{env, str::FromStr};

use tracing::warn;

use crate::{error::UnknownOutputFormat, model::GameParams};

pub const ROWS_VAR: &str = "MINESWEEPER_ROWS";
pub const COLS_VAR: &str = "MINESWEEPER_COLS";
pub const MINES_VAR: &str = "MINESWEEPER_MINES";
pub const SEED_VAR: &str = "MINESWEEPER_SEED";
pub const OUTPUT_VAR: &str = "MINESWEEPER_OUTPUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = UnknownOutputFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownOutputFormat(s.to_string())),
        }
    }
}

/// Game settings resolved from the environment, with defaults for anything unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    pub seed: Option<u64>,
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        let params = GameParams::default();
        Self {
            rows: params.rows,
            cols: params.cols,
            mines: params.mines,
            seed: None,
            output: OutputFormat::Text,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves settings through `lookup`. Values that fail to parse fall back
    /// to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            rows: read(&lookup, ROWS_VAR).unwrap_or(defaults.rows),
            cols: read(&lookup, COLS_VAR).unwrap_or(defaults.cols),
            mines: read(&lookup, MINES_VAR).unwrap_or(defaults.mines),
            seed: read(&lookup, SEED_VAR),
            output: read(&lookup, OUTPUT_VAR).unwrap_or(defaults.output),
        }
    }

    pub fn params(&self) -> GameParams {
        GameParams {
            rows: self.rows,
            cols: self.cols,
            mines: self.mines,
        }
    }
}

fn read<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
