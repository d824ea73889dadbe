//! Minesweeper board engine.
//!
//! [`Board`] owns the minefield: mine placement, adjacency digits, flood reveal,
//! flags and the win/loss queries. [`session`] drives a board from line-based
//! input, which is what the `minesweeper` binary runs.
//!
//! ```
//! use minesweeper_engine::{Action, Board, Pos};
//!
//! let mut board = Board::with_mines(3, 3, &[Pos::new(1, 1)])?;
//! board.apply_move(Pos::new(0, 0), Action::Reveal)?;
//! assert!(!board.check_loss(Pos::new(0, 0))?);
//! assert_eq!(board.display_board(), "1 - -\n- - -\n- - -\n");
//! # Ok::<(), minesweeper_engine::BoardError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod logic;
pub mod model;
pub mod session;

pub use error::{BoardError, CommandError, UnknownAction, UnknownOutputFormat};
pub use logic::Board;
pub use model::{Action, Cell, GameParams, Pos};
