//! Turn-by-turn command loop around a [`Board`].
//!
//! The session is the piece that turns the board's queries into a game: after
//! every reveal it asks [`Board::check_loss`] and [`Board::check_win`] and
//! records the result with [`Board::set_game_over`].

use std::io::{self, BufRead, Write};

use tracing::{debug, info, instrument, warn};

use crate::{
    config::OutputFormat,
    logic::Board,
    model::{
        self, Action, Pos,
        client::ClientMessage,
        server::{CellUpdate, ServerMessage},
    },
};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    /// The player asked to stop.
    Quit,
    /// Input ran out before the game finished.
    Abandoned,
}

pub struct Session<W: Write> {
    board: Board,
    out: W,
    format: OutputFormat,
}

impl<W: Write> Session<W> {
    pub fn new(board: Board, out: W, format: OutputFormat) -> Self {
        Self { board, out, format }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_inner(self) -> (Board, W) {
        (self.board, self.out)
    }

    /// Prints the initial board, then handles `input` line by line until the
    /// game ends, the player quits or the input is exhausted.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<Outcome> {
        self.announce()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(outcome) = self.handle_line(&line)? {
                info!("Session finished: {:?}", outcome);
                return Ok(outcome);
            }
        }

        info!("Input closed before the game finished");
        Ok(Outcome::Abandoned)
    }

    /// Handles one input line. Returns the outcome once the game is over.
    #[instrument(level = "trace", skip(self))]
    pub fn handle_line(&mut self, line: &str) -> io::Result<Option<Outcome>> {
        if let Some(outcome) = self.finished() {
            return Ok(Some(outcome));
        }

        let message = match ClientMessage::parse(line) {
            Ok(message) => message,
            Err(err) => {
                warn!("Rejected command {:?}: {}", line, err);
                self.report(&err.to_string())?;
                return Ok(None);
            }
        };

        match message {
            ClientMessage::Show => self.show()?,
            ClientMessage::Quit => return Ok(Some(Outcome::Quit)),
            ClientMessage::Unknown => debug!("Ignoring unknown action in {:?}", line),
            ref other => {
                if let Some((pos, action)) = other.as_move() {
                    return self.play(pos, action);
                }
            }
        }

        Ok(None)
    }

    fn finished(&self) -> Option<Outcome> {
        if !self.board.game_over() {
            return None;
        }
        if self.board.check_win() {
            Some(Outcome::Won)
        } else {
            Some(Outcome::Lost)
        }
    }

    fn play(&mut self, pos: Pos, action: Action) -> io::Result<Option<Outcome>> {
        let updates = match self.board.apply_move(pos, action) {
            Ok(updates) => updates,
            Err(err) => {
                warn!("Rejected {} at {}: {}", action, pos, err);
                self.report(&err.to_string())?;
                return Ok(None);
            }
        };

        let lost = action == Action::Reveal && matches!(self.board.check_loss(pos), Ok(true));
        let won = action == Action::Reveal && !lost && self.board.check_win();
        if lost || won {
            self.board.set_game_over(true);
        }

        if lost {
            info!("Mine hit at {}", pos);
            self.emit_loss(pos)?;
            Ok(Some(Outcome::Lost))
        } else if won {
            info!("All safe cells revealed");
            self.emit_update(updates, true)?;
            Ok(Some(Outcome::Won))
        } else {
            self.emit_update(updates, false)?;
            Ok(None)
        }
    }

    fn announce(&mut self) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(
                    self.out,
                    "{}x{} board, {} mines",
                    self.board.rows(),
                    self.board.cols(),
                    self.board.mines()
                )?;
                write!(self.out, "{}", self.board)
            }
            OutputFormat::Json => self.write_json(&ServerMessage::Init {
                rows: self.board.rows(),
                cols: self.board.cols(),
                mines: self.board.mines(),
                field: self.board.snapshot(),
            }),
        }
    }

    fn show(&mut self) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => write!(self.out, "{}", self.board),
            OutputFormat::Json => self.write_json(&ServerMessage::Board {
                field: self.board.snapshot(),
            }),
        }
    }

    fn emit_update(&mut self, updates: Vec<CellUpdate>, won: bool) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                write!(self.out, "{}", self.board)?;
                if won {
                    writeln!(self.out, "All safe cells revealed. You win!")?;
                }
                Ok(())
            }
            OutputFormat::Json => self.write_json(&ServerMessage::Update {
                updates,
                won,
                lost: false,
            }),
        }
    }

    fn emit_loss(&mut self, pos: Pos) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                write!(self.out, "{}", self.board.exposed_board())?;
                writeln!(self.out, "You hit a mine at {pos}. Game over.")
            }
            OutputFormat::Json => {
                let updates = self
                    .board
                    .exposed_snapshot()
                    .into_iter()
                    .enumerate()
                    .flat_map(|(row, cells)| {
                        cells.into_iter().enumerate().filter_map(move |(col, value)| {
                            (value == model::Cell::Mine).then_some(CellUpdate {
                                pos: Pos::new(row, col),
                                value,
                            })
                        })
                    })
                    .collect();
                self.write_json(&ServerMessage::Update {
                    updates,
                    won: false,
                    lost: true,
                })
            }
        }
    }

    fn report(&mut self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "error: {message}"),
            OutputFormat::Json => self.write_json(&ServerMessage::Error {
                message: message.to_string(),
            }),
        }
    }

    fn write_json(&mut self, message: &ServerMessage) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, message)?;
        writeln!(self.out)
    }
}
