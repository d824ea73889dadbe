use std::fmt;

use rand::Rng;
use tracing::{debug, info, instrument, trace};

use crate::{
    data::{Cell, Field, RevealedState},
    error::BoardError,
    model::{self, Action, GameParams, Pos, server::CellUpdate},
};

/// A minesweeper board: hidden mine layout, adjacency digits, revealed and
/// flagged cells, and an externally driven game-over flag.
///
/// The board never decides on its own that the game has ended. Callers
/// consult [`check_loss`](Board::check_loss) and [`check_win`](Board::check_win)
/// after a move and record the result with [`set_game_over`](Board::set_game_over).
#[derive(Debug, Clone)]
pub struct Board {
    field: Field,
}

fn validate_params(params: &GameParams) -> Result<(), BoardError> {
    let fits = params
        .rows
        .checked_mul(params.cols)
        .is_some_and(|area| params.mines < area);
    if fits {
        Ok(())
    } else {
        Err(BoardError::InvalidConfiguration {
            rows: params.rows,
            cols: params.cols,
            mines: params.mines,
        })
    }
}

fn place_mines<R: Rng>(params: &GameParams, rng: &mut R) -> Vec<bool> {
    let mut mines = vec![false; params.rows * params.cols];

    let mut placed = 0;
    while placed < params.mines {
        let row = rng.random_range(0..params.rows);
        let col = rng.random_range(0..params.cols);
        let slot = &mut mines[row * params.cols + col];
        if !*slot {
            *slot = true;
            placed += 1;
        }
    }

    mines
}

/// Offsets of the in-bounds 8-neighbourhood of `index`, excluding `index` itself.
fn neighbours(index: usize, rows: usize, cols: usize) -> impl Iterator<Item = usize> {
    let (row, col) = (index / cols, index % cols);
    let col_range = col.saturating_sub(1)..=(col + 1).min(cols - 1);

    (row.saturating_sub(1)..=(row + 1).min(rows - 1))
        .flat_map(move |r| col_range.clone().map(move |c| r * cols + c))
        .filter(move |&i| i != index)
}

fn count_adjacent_mines(mines: &[bool], index: usize, rows: usize, cols: usize) -> u8 {
    neighbours(index, rows, cols).filter(|&i| mines[i]).count() as u8
}

fn generate_cells(mines: &[bool], rows: usize, cols: usize) -> Vec<Cell> {
    mines
        .iter()
        .enumerate()
        .map(|(i, &mine)| Cell {
            mine,
            adjacent: if mine {
                0
            } else {
                count_adjacent_mines(mines, i, rows, cols)
            },
            state: RevealedState::Hidden,
        })
        .collect()
}

impl Field {
    fn new(params: &GameParams, mines: &[bool]) -> Self {
        Self {
            rows: params.rows,
            cols: params.cols,
            mines: params.mines,
            revealed: 0,
            game_over: false,
            cells: generate_cells(mines, params.rows, params.cols),
        }
    }

    fn index(&self, pos: Pos) -> Result<usize, BoardError> {
        if pos.row < self.rows && pos.col < self.cols {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(BoardError::InvalidCoordinate {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn pos_of(&self, index: usize) -> Pos {
        Pos::new(index / self.cols, index % self.cols)
    }

    fn view(&self, index: usize) -> model::Cell {
        let cell = &self.cells[index];
        match cell.state {
            RevealedState::Hidden => model::Cell::Hidden,
            RevealedState::Flagged => model::Cell::Flagged,
            RevealedState::Revealed => model::Cell::Revealed {
                adjacent: cell.adjacent,
            },
        }
    }

    fn exposed_view(&self, index: usize) -> model::Cell {
        if self.cells[index].mine {
            model::Cell::Mine
        } else {
            self.view(index)
        }
    }

    fn update(&self, index: usize) -> CellUpdate {
        CellUpdate {
            pos: self.pos_of(index),
            value: self.view(index),
        }
    }

    fn has_won(&self) -> bool {
        self.revealed + self.mines == self.rows * self.cols
    }

    /// Reveals `start` and, through zero-digit cells, everything connected to it.
    ///
    /// Mines and already revealed cells stop the walk. Cells holding a
    /// non-zero digit are revealed but not expanded.
    fn reveal_from(&mut self, start: usize, updates: &mut Vec<CellUpdate>) {
        let mut pending = vec![start];

        while let Some(index) = pending.pop() {
            let cell = &mut self.cells[index];
            if cell.mine || cell.state == RevealedState::Revealed {
                continue;
            }

            cell.state = RevealedState::Revealed;
            let adjacent = cell.adjacent;
            self.revealed += 1;
            updates.push(self.update(index));

            if adjacent != 0 {
                continue;
            }

            pending.extend(
                neighbours(index, self.rows, self.cols)
                    .filter(|&i| self.cells[i].state != RevealedState::Revealed),
            );
        }
    }

    fn snapshot(&self, exposed: bool) -> Vec<Vec<model::Cell>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| {
                        let index = row * self.cols + col;
                        if exposed {
                            self.exposed_view(index)
                        } else {
                            self.view(index)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn render(&self, exposed: bool) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols * 2));
        for row in self.snapshot(exposed) {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    out.push(' ');
                }
                out.push(cell.glyph());
            }
            out.push('\n');
        }
        out
    }
}

impl Board {
    /// Creates a board with mines placed by the thread-local generator.
    pub fn new(params: GameParams) -> Result<Self, BoardError> {
        Self::with_rng(params, &mut rand::rng())
    }

    /// Creates a board with mines placed by `rng`.
    ///
    /// Mines are drawn uniformly over all cells without replacement, so a
    /// seeded generator always yields the same layout.
    #[instrument(level = "trace", skip(rng))]
    pub fn with_rng<R: Rng>(params: GameParams, rng: &mut R) -> Result<Self, BoardError> {
        validate_params(&params)?;
        let mines = place_mines(&params, rng);
        info!(
            "Created {}x{} board with {} mines",
            params.rows, params.cols, params.mines
        );
        Ok(Self {
            field: Field::new(&params, &mines),
        })
    }

    /// Creates a board with mines at exactly the given positions.
    pub fn with_mines(rows: usize, cols: usize, mines: &[Pos]) -> Result<Self, BoardError> {
        let params = GameParams {
            rows,
            cols,
            mines: mines.len(),
        };
        validate_params(&params)?;

        let mut layout = vec![false; rows * cols];
        for &pos in mines {
            if pos.row >= rows || pos.col >= cols {
                return Err(BoardError::InvalidCoordinate { pos, rows, cols });
            }
            let slot = &mut layout[pos.row * cols + pos.col];
            if *slot {
                return Err(BoardError::DuplicateMine { pos });
            }
            *slot = true;
        }

        debug!("Created {}x{} board from {} fixed mines", rows, cols, mines.len());
        Ok(Self {
            field: Field::new(&params, &layout),
        })
    }

    pub fn rows(&self) -> usize {
        self.field.rows
    }

    pub fn cols(&self) -> usize {
        self.field.cols
    }

    /// Number of mines on the board.
    pub fn mines(&self) -> usize {
        self.field.mines
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.field.revealed
    }

    pub fn game_over(&self) -> bool {
        self.field.game_over
    }

    pub fn set_game_over(&mut self, status: bool) {
        self.field.game_over = status;
    }

    /// The player-visible state of a cell. Mines look like any other hidden cell.
    pub fn cell(&self, pos: Pos) -> Result<model::Cell, BoardError> {
        let index = self.field.index(pos)?;
        Ok(self.field.view(index))
    }

    pub fn is_mine(&self, pos: Pos) -> Result<bool, BoardError> {
        let index = self.field.index(pos)?;
        Ok(self.field.cells[index].mine)
    }

    /// Adjacency digit of a cell, or `None` for mines.
    pub fn adjacent_mines(&self, pos: Pos) -> Result<Option<u8>, BoardError> {
        let index = self.field.index(pos)?;
        let cell = &self.field.cells[index];
        Ok((!cell.mine).then_some(cell.adjacent))
    }

    /// Applies a move and returns the cells it changed.
    ///
    /// Revealing a mine changes nothing; use [`check_loss`](Board::check_loss)
    /// to find out whether the move hit one.
    #[instrument(level = "trace", skip(self))]
    pub fn apply_move(&mut self, pos: Pos, action: Action) -> Result<Vec<CellUpdate>, BoardError> {
        let index = self.field.index(pos)?;
        let mut updates = Vec::new();

        match action {
            Action::Reveal => {
                self.field.reveal_from(index, &mut updates);
                debug!("Reveal at {} uncovered {} cells", pos, updates.len());
            }
            Action::Flag => {
                let cell = &mut self.field.cells[index];
                if cell.state == RevealedState::Hidden {
                    cell.state = RevealedState::Flagged;
                    updates.push(self.field.update(index));
                } else {
                    trace!("Flag at {} ignored, cell is {:?}", pos, cell.state);
                }
            }
            Action::Unflag => {
                let cell = &mut self.field.cells[index];
                if cell.state == RevealedState::Flagged {
                    cell.state = RevealedState::Hidden;
                    updates.push(self.field.update(index));
                } else {
                    trace!("Unflag at {} ignored, cell is {:?}", pos, cell.state);
                }
            }
        }

        Ok(updates)
    }

    /// String form of [`apply_move`](Board::apply_move). Unknown actions are
    /// ignored and produce no updates.
    pub fn player_move(&mut self, pos: Pos, action: &str) -> Result<Vec<CellUpdate>, BoardError> {
        match action.parse::<Action>() {
            Ok(action) => self.apply_move(pos, action),
            Err(err) => {
                debug!("Ignoring move at {}: {}", pos, err);
                Ok(Vec::new())
            }
        }
    }

    /// `true` once every cell without a mine has been revealed. Flags are irrelevant.
    pub fn check_win(&self) -> bool {
        self.field.has_won()
    }

    /// `true` if `pos` holds a mine, whatever its revealed or flagged state.
    pub fn check_loss(&self, pos: Pos) -> Result<bool, BoardError> {
        self.is_mine(pos)
    }

    /// Text rendering: one line per row, glyphs separated by spaces.
    pub fn display_board(&self) -> String {
        self.field.render(false)
    }

    /// Like [`display_board`](Board::display_board) but with every mine shown as `*`.
    pub fn exposed_board(&self) -> String {
        self.field.render(true)
    }

    pub fn snapshot(&self) -> Vec<Vec<model::Cell>> {
        self.field.snapshot(false)
    }

    pub fn exposed_snapshot(&self) -> Vec<Vec<model::Cell>> {
        self.field.snapshot(true)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_board())
    }
}
