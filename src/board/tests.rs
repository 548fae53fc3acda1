use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_new_board_is_empty() {
    for size in BOARD_PRESETS {
        let board = Board::new(size);
        assert_eq!(board.size(), size);
        assert!(board.is_board_empty());
        assert_eq!(board.stone_count(), 0);
        assert!(board.last_move().is_none());
    }
}

#[test]
fn test_center() {
    assert_eq!(Board::new(15).center(), Pos::new(7, 7));
    assert_eq!(Board::new(19).center(), Pos::new(9, 9));
}

#[test]
fn test_place_and_get() {
    let mut board = Board::new(15);
    assert!(board.place(Pos::new(7, 7), Stone::Black));
    assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
    assert_eq!(board.last_move(), Some(Pos::new(7, 7)));
    assert_eq!(board.stone_count(), 1);
}

#[test]
fn test_place_occupied_fails_without_mutation() {
    let mut board = Board::new(15);
    assert!(board.place(Pos::new(7, 7), Stone::Black));
    assert!(!board.place(Pos::new(7, 7), Stone::White));
    // The occupant and the last-move record are untouched
    assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
    assert_eq!(board.last_move(), Some(Pos::new(7, 7)));
    assert_eq!(board.stone_count(), 1);
}

#[test]
fn test_place_out_of_bounds_fails() {
    let mut board = Board::new(15);
    assert!(!board.place(Pos::new(15, 0), Stone::Black));
    assert!(!board.place(Pos::new(0, 15), Stone::Black));
    assert!(!board.place(Pos::new(200, 200), Stone::Black));
    assert!(board.is_board_empty());
    assert!(board.last_move().is_none());
}

#[test]
fn test_place_empty_rejected() {
    let mut board = Board::new(15);
    assert!(!board.place(Pos::new(7, 7), Stone::Empty));
    assert!(board.is_board_empty());
}

#[test]
fn test_remove_keeps_last_move_record() {
    let mut board = Board::new(15);
    board.place(Pos::new(7, 7), Stone::Black);
    board.place(Pos::new(8, 8), Stone::White);
    board.remove(Pos::new(8, 8));
    assert_eq!(board.get(Pos::new(8, 8)), Stone::Empty);
    // remove() is the search undo; it leaves the record alone
    assert_eq!(board.last_move(), Some(Pos::new(8, 8)));
    // ...and a cleared cell never reports a win
    assert!(!board.last_move_wins());
}

#[test]
fn test_last_move_wins_false_on_fresh_board() {
    assert!(!Board::new(15).last_move_wins());
    assert!(!Board::new(19).last_move_wins());
}

#[test]
fn test_last_move_wins_horizontal_five() {
    let mut board = Board::new(15);
    for col in 3..=7 {
        board.place(Pos::new(7, col), Stone::Black);
    }
    // Last placement was (7, 7), completing cols 3-7
    assert_eq!(board.last_move(), Some(Pos::new(7, 7)));
    assert!(board.last_move_wins());
}

#[test]
fn test_four_in_a_row_does_not_win() {
    let mut board = Board::new(15);
    for col in 3..=6 {
        board.place(Pos::new(7, col), Stone::Black);
    }
    assert!(!board.last_move_wins());
    assert!(!board.wins_at(Pos::new(7, 6), Stone::Black));
}

#[test]
fn test_is_full() {
    let mut board = Board::new(3);
    for r in 0..3u8 {
        for c in 0..3u8 {
            let stone = if (r + c) % 2 == 0 { Stone::Black } else { Stone::White };
            assert!(board.place(Pos::new(r, c), stone));
        }
    }
    assert!(board.is_full());
}
