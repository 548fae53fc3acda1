//! Line-scanning board evaluation
//!
//! Every row, column and diagonal is walked cell by cell while a small
//! accumulator tracks the current run of the evaluated side's stones and
//! how many of its ends are blocked. Runs are scored the moment they
//! close (an empty cell, an opponent stone, or the end of the line) and
//! the points add up into a per-side total. The two totals combine into
//! the white/black advantage ratio the search maximizes.

use crate::board::{Board, Pos, Stone};

use super::patterns::run_score;

/// Per-line scoring state: current run length, blocked ends carried into
/// the next run, and the points accumulated so far.
///
/// Reset at the start of every scanned line; a fresh line starts with
/// `blocks = 2` because the border behind the first cell counts as a
/// blocked end.
struct RunAccum {
    count: u32,
    blocks: u32,
    score: i32,
}

impl RunAccum {
    fn new() -> Self {
        Self {
            count: 0,
            blocks: 2,
            score: 0,
        }
    }

    /// Feed the next cell of the current line
    fn step(&mut self, cell: Stone, side: Stone, own_turn: bool) {
        if cell == side {
            self.count += 1;
        } else if cell == Stone::Empty {
            if self.count > 0 {
                // The run ends on an open cell: one fewer blocked side
                self.blocks -= 1;
                self.score += run_score(self.count, self.blocks, own_turn);
                self.count = 0;
            }
            // Whatever follows starts with at most one blocked side
            self.blocks = 1;
        } else {
            if self.count > 0 {
                self.score += run_score(self.count, self.blocks, own_turn);
                self.count = 0;
            }
            self.blocks = 2;
        }
    }

    /// Close the line: flush an open run against the border, reset for the
    /// next independent line.
    fn end_line(&mut self, own_turn: bool) {
        if self.count > 0 {
            self.score += run_score(self.count, self.blocks, own_turn);
        }
        self.count = 0;
        self.blocks = 2;
    }
}

/// Sum of all closed-run scores for `side` across rows, columns and both
/// diagonal families.
///
/// `turn` names the side to move next; runs belonging to that side score
/// with `own_turn` set.
#[must_use]
pub fn side_score(board: &Board, side: Stone, turn: Stone) -> i32 {
    let own_turn = side == turn;
    scan_rows(board, side, own_turn)
        + scan_columns(board, side, own_turn)
        + scan_diagonals(board, side, own_turn)
}

/// White/black advantage ratio for the given side to move.
///
/// Higher values favor White. A zero black total is treated as 1 to keep
/// the division defined; the asymmetric ratio (rather than a difference)
/// is the contract the search and its move ordering are tuned against.
#[must_use]
pub fn advantage(board: &Board, black_to_move: bool) -> f64 {
    let turn = if black_to_move { Stone::Black } else { Stone::White };
    let black = side_score(board, Stone::Black, turn);
    let white = side_score(board, Stone::White, turn);
    let black = if black == 0 { 1 } else { black };
    f64::from(white) / f64::from(black)
}

fn scan_rows(board: &Board, side: Stone, own_turn: bool) -> i32 {
    let n = board.size();
    let mut acc = RunAccum::new();
    for row in 0..n {
        for col in 0..n {
            acc.step(board.get(Pos::new(row as u8, col as u8)), side, own_turn);
        }
        acc.end_line(own_turn);
    }
    acc.score
}

fn scan_columns(board: &Board, side: Stone, own_turn: bool) -> i32 {
    let n = board.size();
    let mut acc = RunAccum::new();
    for col in 0..n {
        for row in 0..n {
            acc.step(board.get(Pos::new(row as u8, col as u8)), side, own_turn);
        }
        acc.end_line(own_turn);
    }
    acc.score
}

/// Scan both diagonal families.
///
/// Anti-diagonals run bottom-left to top-right (cells `(i, k - i)`), main
/// diagonals top-left to bottom-right (cells `(i, i - k)`). Lines shorter
/// than five are still walked; their runs simply never reach a winning
/// length.
fn scan_diagonals(board: &Board, side: Stone, own_turn: bool) -> i32 {
    let n = board.size() as i32;
    let mut acc = RunAccum::new();

    for k in 0..=2 * (n - 1) {
        let start = 0.max(k - n + 1);
        let end = (n - 1).min(k);
        for i in start..=end {
            acc.step(board.get(Pos::new(i as u8, (k - i) as u8)), side, own_turn);
        }
        acc.end_line(own_turn);
    }

    for k in (1 - n)..n {
        let start = 0.max(k);
        let end = (n - 1).min(n + k - 1);
        for i in start..=end {
            acc.step(board.get(Pos::new(i as u8, (i - k) as u8)), side, own_turn);
        }
        acc.end_line(own_turn);
    }

    acc.score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::patterns::RunScore;

    #[test]
    fn test_empty_board_scores_zero() {
        let board = Board::new(15);
        assert_eq!(side_score(&board, Stone::Black, Stone::Black), 0);
        assert_eq!(side_score(&board, Stone::White, Stone::Black), 0);
        assert_eq!(advantage(&board, true), 0.0);
    }

    #[test]
    fn test_single_stone_scores_once_per_axis() {
        let mut board = Board::new(15);
        board.place(Pos::new(7, 7), Stone::Black);
        // One isolated run of length 1 on its row, column and both diagonals
        assert_eq!(side_score(&board, Stone::Black, Stone::Black), 4);
        assert_eq!(side_score(&board, Stone::White, Stone::Black), 0);
    }

    #[test]
    fn test_advantage_guards_division_by_zero() {
        let mut board = Board::new(15);
        board.place(Pos::new(7, 7), Stone::White);
        // Black total is zero and coerced to 1; White scores 1 per axis
        assert_eq!(advantage(&board, true), 4.0);
    }

    #[test]
    fn test_border_counts_as_blocked_end() {
        let mut board = Board::new(15);
        board.place(Pos::new(7, 0), Stone::Black);
        board.place(Pos::new(7, 1), Stone::Black);
        // Row: pair against the border scores as a half-blocked two (3).
        // Column and diagonal lines each see two isolated singles (1 each).
        assert_eq!(side_score(&board, Stone::Black, Stone::White), 3 + 6);
    }

    #[test]
    fn test_open_three_turn_dependence() {
        let mut board = Board::new(15);
        for col in 3..6 {
            board.place(Pos::new(7, col), Stone::Black);
        }
        // Row: open three (50_000 on own turn, 200 otherwise).
        // Off-row lines contribute nine isolated singles.
        assert_eq!(side_score(&board, Stone::Black, Stone::Black), 50_000 + 9);
        assert_eq!(side_score(&board, Stone::Black, Stone::White), 200 + 9);
    }

    #[test]
    fn test_fully_blocked_run_is_dead() {
        let mut board = Board::new(15);
        for col in 3..7 {
            board.place(Pos::new(7, col), Stone::Black);
        }
        board.place(Pos::new(7, 2), Stone::White);
        board.place(Pos::new(7, 7), Stone::White);
        // The walled-in four contributes nothing on the row
        let score = side_score(&board, Stone::Black, Stone::Black);
        let row_only = score
            - scan_columns(&board, Stone::Black, true)
            - scan_diagonals(&board, Stone::Black, true);
        assert_eq!(row_only, 0);
    }

    #[test]
    fn test_five_in_a_row_scores_win() {
        let mut board = Board::new(15);
        for col in 3..8 {
            board.place(Pos::new(7, col), Stone::Black);
        }
        assert!(side_score(&board, Stone::Black, Stone::White) >= RunScore::WIN);
    }

    #[test]
    fn test_diagonal_run_detected() {
        let mut board = Board::new(15);
        for i in 0..3 {
            board.place(Pos::new(5 + i, 5 + i), Stone::Black);
        }
        // Main-diagonal open three dominates the total on the mover's turn
        assert!(side_score(&board, Stone::Black, Stone::Black) >= 50_000);
    }

    #[test]
    fn test_advantage_reflects_white_gains() {
        let mut board = Board::new(15);
        board.place(Pos::new(7, 7), Stone::Black);
        board.place(Pos::new(5, 5), Stone::White);
        let before = advantage(&board, true);
        board.place(Pos::new(5, 6), Stone::White);
        let after = advantage(&board, true);
        assert!(after > before, "white pair should raise the ratio: {before} -> {after}");
    }
}
