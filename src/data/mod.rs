#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealedState {
    Hidden,
    Flagged,
    Revealed,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub mine: bool,
    /// Mines in the 8-neighbourhood. Only meaningful when `mine` is false.
    pub adjacent: u8,
    pub state: RevealedState,
}

/// Row-major grid storage. Offset of `(row, col)` is `row * cols + col`.
#[derive(Debug, Clone)]
pub struct Field {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    pub revealed: usize,
    pub game_over: bool,
    pub cells: Vec<Cell>,
}
