use minesweeper_engine::{Action, Board, BoardError, Cell, GameParams, Pos};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn all_positions(board: &Board) -> Vec<Pos> {
    (0..board.rows())
        .flat_map(|r| (0..board.cols()).map(move |c| Pos::new(r, c)))
        .collect()
}

#[test]
fn test_single_cell_board() {
    let mut board = Board::new(GameParams {
        rows: 1,
        cols: 1,
        mines: 0,
    })
    .unwrap();
    assert!(!board.check_win());

    board.apply_move(Pos::new(0, 0), Action::Reveal).unwrap();
    assert_eq!(board.cell(Pos::new(0, 0)).unwrap(), Cell::Revealed { adjacent: 0 });
    assert_eq!(board.display_board(), "0\n");
    assert!(board.check_win());
}

#[test]
fn test_centre_mine_makes_every_cell_a_one() {
    let mut board = Board::with_mines(3, 3, &[Pos::new(1, 1)]).unwrap();
    for pos in all_positions(&board) {
        if pos == Pos::new(1, 1) {
            assert_eq!(board.adjacent_mines(pos).unwrap(), None);
        } else {
            assert_eq!(board.adjacent_mines(pos).unwrap(), Some(1));
        }
    }

    let updates = board.apply_move(Pos::new(0, 2), Action::Reveal).unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].pos, Pos::new(0, 2));
    assert_eq!(board.display_board(), "- - 1\n- - -\n- - -\n");
    assert_eq!(board.revealed_count(), 1);
}

#[test]
fn test_empty_board_cascades_everywhere() {
    let mut board = Board::with_mines(5, 5, &[]).unwrap();
    let updates = board.apply_move(Pos::new(2, 2), Action::Reveal).unwrap();
    assert_eq!(updates.len(), 25);
    assert_eq!(board.revealed_count(), 25);
    assert!(board.check_win());
    assert_eq!(board.display_board(), "0 0 0 0 0\n".repeat(5));
}

#[test]
fn test_flag_then_unflag_restores_hidden() {
    let mut board = Board::with_mines(3, 3, &[Pos::new(2, 2)]).unwrap();
    let fresh = board.display_board();

    board.apply_move(Pos::new(0, 0), Action::Flag).unwrap();
    assert_eq!(board.cell(Pos::new(0, 0)).unwrap(), Cell::Flagged);
    board.apply_move(Pos::new(0, 0), Action::Unflag).unwrap();
    assert_eq!(board.cell(Pos::new(0, 0)).unwrap(), Cell::Hidden);
    assert_eq!(board.display_board(), fresh);

    let mut untouched = Board::with_mines(3, 3, &[Pos::new(2, 2)]).unwrap();
    board.apply_move(Pos::new(0, 0), Action::Reveal).unwrap();
    untouched.apply_move(Pos::new(0, 0), Action::Reveal).unwrap();
    assert_eq!(board.display_board(), untouched.display_board());
    assert_eq!(board.display_board(), "0 0 0\n0 1 1\n0 1 -\n");
}

#[test]
fn test_cascade_reveals_flagged_cells() {
    let mut board = Board::with_mines(3, 3, &[]).unwrap();
    board.apply_move(Pos::new(1, 1), Action::Flag).unwrap();
    assert_eq!(board.cell(Pos::new(1, 1)).unwrap(), Cell::Flagged);

    let updates = board.apply_move(Pos::new(0, 0), Action::Reveal).unwrap();
    assert_eq!(updates.len(), 9);
    assert_eq!(board.cell(Pos::new(1, 1)).unwrap(), Cell::Revealed { adjacent: 0 });
    assert_eq!(board.display_board(), "0 0 0\n".repeat(3));
    assert!(board.check_win());
}

#[test]
fn test_flag_and_unflag_no_ops() {
    let mut board = Board::with_mines(2, 3, &[Pos::new(0, 2)]).unwrap();
    board.apply_move(Pos::new(1, 0), Action::Reveal).unwrap();
    let before = board.display_board();

    // revealed cells cannot be flagged
    assert!(board.apply_move(Pos::new(1, 0), Action::Flag).unwrap().is_empty());
    // hidden cells cannot be unflagged
    assert!(board.apply_move(Pos::new(0, 2), Action::Unflag).unwrap().is_empty());
    // flagging twice changes nothing the second time
    assert_eq!(board.apply_move(Pos::new(0, 2), Action::Flag).unwrap().len(), 1);
    assert!(board.apply_move(Pos::new(0, 2), Action::Flag).unwrap().is_empty());

    assert_eq!(board.cell(Pos::new(1, 0)).unwrap(), Cell::Revealed { adjacent: 0 });
    assert_ne!(board.display_board(), before);
}

#[test]
fn test_mines_never_revealed() {
    let mines = [Pos::new(0, 0), Pos::new(3, 3)];
    let mut board = Board::with_mines(4, 4, &mines).unwrap();
    for pos in all_positions(&board) {
        board.apply_move(pos, Action::Reveal).unwrap();
    }
    for mine in mines {
        assert_eq!(board.cell(mine).unwrap(), Cell::Hidden);
        assert!(board.check_loss(mine).unwrap());
    }
    assert_eq!(board.revealed_count(), 14);
    assert!(board.check_win());
}

#[test]
fn test_win_ignores_flags_on_mines() {
    let mut board = Board::with_mines(2, 2, &[Pos::new(1, 1)]).unwrap();
    board.apply_move(Pos::new(1, 1), Action::Flag).unwrap();
    assert!(!board.check_win());
    for pos in [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0)] {
        board.apply_move(pos, Action::Reveal).unwrap();
    }
    assert!(board.check_win());

    let mut unflagged = Board::with_mines(2, 2, &[Pos::new(1, 1)]).unwrap();
    for pos in [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0)] {
        unflagged.apply_move(pos, Action::Reveal).unwrap();
    }
    assert!(unflagged.check_win());
}

#[test]
fn test_check_loss_independent_of_state() {
    let mut board = Board::with_mines(2, 2, &[Pos::new(0, 1)]).unwrap();
    assert!(board.check_loss(Pos::new(0, 1)).unwrap());
    assert!(!board.check_loss(Pos::new(1, 1)).unwrap());

    board.apply_move(Pos::new(0, 1), Action::Flag).unwrap();
    board.apply_move(Pos::new(1, 1), Action::Reveal).unwrap();
    assert!(board.check_loss(Pos::new(0, 1)).unwrap());
    assert!(!board.check_loss(Pos::new(1, 1)).unwrap());
}

#[test]
fn test_out_of_range_moves_rejected() {
    let mut board = Board::with_mines(2, 3, &[]).unwrap();
    let expected = BoardError::InvalidCoordinate {
        pos: Pos::new(0, 3),
        rows: 2,
        cols: 3,
    };
    assert_eq!(
        board.apply_move(Pos::new(0, 3), Action::Reveal).unwrap_err(),
        expected
    );
    assert_eq!(board.check_loss(Pos::new(0, 3)).unwrap_err(), expected);
    assert!(board.cell(Pos::new(2, 0)).is_err());
    assert_eq!(board.revealed_count(), 0);
}

#[test]
fn test_game_over_is_caller_driven() {
    let mut board = Board::with_mines(2, 2, &[Pos::new(0, 0)]).unwrap();
    assert!(!board.game_over());
    board.apply_move(Pos::new(0, 0), Action::Reveal).unwrap();
    assert!(!board.game_over());

    board.set_game_over(true);
    assert!(board.game_over());
    board.set_game_over(false);
    assert!(!board.game_over());
}

#[test]
fn test_seeded_board_has_requested_mines() {
    let mut rng = StdRng::seed_from_u64(2024);
    let board = Board::with_rng(
        GameParams {
            rows: 16,
            cols: 30,
            mines: 99,
        },
        &mut rng,
    )
    .unwrap();
    let mines = all_positions(&board)
        .into_iter()
        .filter(|&p| board.is_mine(p).unwrap())
        .count();
    assert_eq!(mines, 99);
    assert_eq!(
        board.exposed_board().chars().filter(|&c| c == '*').count(),
        99
    );
}

#[test]
fn test_nearly_full_board() {
    let board = Board::with_rng(
        GameParams {
            rows: 3,
            cols: 3,
            mines: 8,
        },
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();
    let safe: Vec<_> = all_positions(&board)
        .into_iter()
        .filter(|&p| !board.is_mine(p).unwrap())
        .collect();
    assert_eq!(safe.len(), 1);
}
