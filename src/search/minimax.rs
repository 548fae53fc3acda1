//! Fixed-depth minimax search with alpha-beta pruning
//!
//! The searcher owns a single mutable board copy for the whole
//! invocation: a candidate is placed, the recursion descends, and the
//! stone is removed again on the way back up. No board is cloned per
//! node; the one clone happens where the engine hands the copy in.
//!
//! The advantage ratio favors White, so White-to-move nodes maximize it
//! and Black-to-move nodes minimize it, while win terminals are signed
//! relative to the searching side. Candidates are ordered by a one-ply
//! speculative evaluation before the recursion visits them.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::new(15);
//! board.place(Pos::new(7, 7), Stone::Black);
//!
//! let mut work = board.clone();
//! let mut searcher = Searcher::new(Stone::White);
//! let result = searcher.search(&mut work, board.last_move(), 2);
//! assert!(result.best_move.is_some());
//! ```

use std::cmp::Ordering;

use crate::board::{Board, Pos, Stone};
use crate::eval::advantage;

use super::movegen::candidates;

/// Result of a search: the chosen move (`None` only when the board is
/// already full), the score backed up to the root, and the node count.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Pos>,
    pub score: f64,
    pub nodes: u64,
}

/// Score plus the move that produced it, backed up through one node
#[derive(Debug, Clone, Copy)]
struct NodeValue {
    score: f64,
    mov: Option<Pos>,
}

/// Minimax searcher for one fixed side
pub struct Searcher {
    side: Stone,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(side: Stone) -> Self {
        debug_assert!(side != Stone::Empty);
        Self { side, nodes: 0 }
    }

    /// Nodes visited so far across all phases
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Scan the candidate set for a placement that wins on the spot.
    ///
    /// Uses the same place/probe/remove primitive as the main search: the
    /// candidate is placed on the working copy, win-checked, and removed
    /// again. Returns the first winner in candidate order, which
    /// short-circuits the deep search entirely.
    pub fn find_immediate_win(&mut self, board: &mut Board) -> Option<Pos> {
        for mv in candidates(board) {
            if !board.place(mv, self.side) {
                continue;
            }
            self.nodes += 1;
            let wins = board.wins_at(mv, self.side);
            board.remove(mv);
            if wins {
                return Some(mv);
            }
        }
        None
    }

    /// Run the bounded minimax from the current position.
    ///
    /// `board` is the working copy this call owns and mutates in place.
    /// `last` is the most recent placement on the live game board; it
    /// feeds the root terminal check (the working copy's own last-move
    /// record is churned by the speculative placements).
    pub fn search(&mut self, board: &mut Board, last: Option<Pos>, depth: u32) -> SearchResult {
        let value = self.minimax(board, last, depth, self.side, f64::NEG_INFINITY, f64::INFINITY);
        SearchResult {
            best_move: value.mov,
            score: value.score,
            nodes: self.nodes,
        }
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        last: Option<Pos>,
        depth: u32,
        to_move: Stone,
        mut alpha: f64,
        mut beta: f64,
    ) -> NodeValue {
        self.nodes += 1;

        // Terminal: the side that just moved completed five-in-a-row.
        // Checked before the depth cutoff so a win on the horizon still
        // returns the sentinel, not a heuristic score.
        let just_moved = to_move.opponent();
        if let Some(pos) = last {
            if board.get(pos) == just_moved && board.wins_at(pos, just_moved) {
                let score = if just_moved == self.side {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                };
                return NodeValue { score, mov: None };
            }
        }

        if depth == 0 {
            return NodeValue {
                score: advantage(board, to_move == Stone::Black),
                mov: None,
            };
        }

        let moves = self.ordered_moves(board, to_move);

        // The ratio favors White: White picks the largest child value,
        // Black the smallest. Strictly-greater updates keep the earliest
        // candidate on ties.
        let maximizing = to_move == Stone::White;
        let mut best: Option<NodeValue> = None;

        for mv in moves {
            if !board.place(mv, to_move) {
                continue;
            }
            let child = self.minimax(board, Some(mv), depth - 1, just_moved, alpha, beta);
            board.remove(mv);

            match best {
                None => {
                    best = Some(NodeValue {
                        score: child.score,
                        mov: Some(mv),
                    });
                }
                Some(ref mut current) => {
                    let improves = if maximizing {
                        child.score > current.score
                    } else {
                        child.score < current.score
                    };
                    if improves {
                        *current = NodeValue {
                            score: child.score,
                            mov: Some(mv),
                        };
                    }
                }
            }

            if maximizing {
                alpha = alpha.max(child.score);
            } else {
                beta = beta.min(child.score);
            }
            if alpha >= beta {
                break;
            }
        }

        // Nothing could be placed: the board is full. Fall back to the
        // static evaluation with no move, which surfaces as the draw
        // outcome at the root.
        best.unwrap_or_else(|| NodeValue {
            score: advantage(board, to_move == Stone::Black),
            mov: None,
        })
    }

    /// Candidates sorted for exploration.
    ///
    /// Each candidate is valued by speculatively placing the mover's stone
    /// and reading the advantage ratio with the pre-move turn flag, then
    /// sorting descending. The sort is stable, so equal values keep their
    /// discovery order and downstream tie-breaking stays deterministic.
    fn ordered_moves(&mut self, board: &mut Board, to_move: Stone) -> Vec<Pos> {
        let mut scored: Vec<(Pos, f64)> = candidates(board)
            .into_iter()
            .map(|mv| {
                let value = if board.place(mv, to_move) {
                    let v = advantage(board, to_move == Stone::Black);
                    board.remove(mv);
                    v
                } else {
                    f64::NEG_INFINITY
                };
                (mv, value)
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(mv, _)| mv).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_all(board: &mut Board, stones: &[(u8, u8)], stone: Stone) {
        for &(row, col) in stones {
            assert!(board.place(Pos::new(row, col), stone));
        }
    }

    /// Reference minimax without pruning, sharing move ordering and
    /// tie-breaking with the real search.
    fn plain_minimax(
        s: &mut Searcher,
        board: &mut Board,
        last: Option<Pos>,
        depth: u32,
        to_move: Stone,
    ) -> NodeValue {
        let just_moved = to_move.opponent();
        if let Some(pos) = last {
            if board.get(pos) == just_moved && board.wins_at(pos, just_moved) {
                let score = if just_moved == s.side {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                };
                return NodeValue { score, mov: None };
            }
        }
        if depth == 0 {
            return NodeValue {
                score: advantage(board, to_move == Stone::Black),
                mov: None,
            };
        }
        let maximizing = to_move == Stone::White;
        let mut best: Option<NodeValue> = None;
        for mv in s.ordered_moves(board, to_move) {
            if !board.place(mv, to_move) {
                continue;
            }
            let child = plain_minimax(s, board, Some(mv), depth - 1, just_moved);
            board.remove(mv);
            match best {
                None => {
                    best = Some(NodeValue {
                        score: child.score,
                        mov: Some(mv),
                    });
                }
                Some(ref mut current) => {
                    let improves = if maximizing {
                        child.score > current.score
                    } else {
                        child.score < current.score
                    };
                    if improves {
                        *current = NodeValue {
                            score: child.score,
                            mov: Some(mv),
                        };
                    }
                }
            }
        }
        best.unwrap_or(NodeValue {
            score: advantage(board, to_move == Stone::Black),
            mov: None,
        })
    }

    #[test]
    fn test_finds_immediate_win() {
        let mut board = Board::new(15);
        place_all(&mut board, &[(9, 0), (9, 1), (9, 2), (9, 3)], Stone::Black);

        let mut searcher = Searcher::new(Stone::Black);
        let mut work = board.clone();
        assert_eq!(searcher.find_immediate_win(&mut work), Some(Pos::new(9, 4)));
        // The probe left no stone behind
        assert_eq!(work.get(Pos::new(9, 4)), Stone::Empty);
    }

    #[test]
    fn test_no_immediate_win_without_four() {
        let mut board = Board::new(15);
        place_all(&mut board, &[(9, 0), (9, 1), (9, 2)], Stone::Black);

        let mut searcher = Searcher::new(Stone::Black);
        assert_eq!(searcher.find_immediate_win(&mut board.clone()), None);
    }

    #[test]
    fn test_blocks_open_four_at_either_end() {
        // Black four open on both ends: White cannot save the game, but
        // must still pick one of the two blocking cells.
        let mut board = Board::new(15);
        place_all(&mut board, &[(7, 3), (7, 4), (7, 5), (7, 6)], Stone::Black);

        let mut searcher = Searcher::new(Stone::White);
        let mut work = board.clone();
        assert!(searcher.find_immediate_win(&mut work).is_none());
        let result = searcher.search(&mut work, board.last_move(), 3);
        let chosen = result.best_move.expect("a move must be chosen");
        assert!(
            chosen == Pos::new(7, 2) || chosen == Pos::new(7, 7),
            "expected a blocking cell, got ({}, {})",
            chosen.row,
            chosen.col
        );
    }

    #[test]
    fn test_blocks_half_open_four() {
        // Black four with one end already walled off: the single open end
        // is the only move that avoids immediate loss.
        let mut board = Board::new(15);
        place_all(&mut board, &[(7, 3), (7, 4), (7, 5), (7, 6)], Stone::Black);
        place_all(&mut board, &[(7, 2)], Stone::White);

        let mut searcher = Searcher::new(Stone::White);
        let mut work = board.clone();
        let result = searcher.search(&mut work, board.last_move(), 3);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        // Tactical position: Black holds an open three, White to move.
        let mut board = Board::new(15);
        place_all(&mut board, &[(7, 6), (7, 7), (7, 8)], Stone::Black);

        let mut pruned = Searcher::new(Stone::White);
        let mut work = board.clone();
        let with_pruning = pruned.search(&mut work, board.last_move(), 3);

        let mut reference = Searcher::new(Stone::White);
        let mut work = board.clone();
        let plain = plain_minimax(&mut reference, &mut work, board.last_move(), 3, Stone::White);

        assert_eq!(with_pruning.best_move, plain.mov);
        assert_eq!(with_pruning.score, plain.score);
    }

    #[test]
    fn test_extends_own_open_three_to_win() {
        // White's open three at depth 4 is a forced win: extend to an open
        // four, the opponent blocks one end, complete on the other.
        let mut board = Board::new(15);
        place_all(&mut board, &[(7, 6), (7, 7), (7, 8)], Stone::White);
        place_all(&mut board, &[(4, 4), (10, 10)], Stone::Black);

        let mut searcher = Searcher::new(Stone::White);
        let mut work = board.clone();
        let result = searcher.search(&mut work, board.last_move(), 4);
        let chosen = result.best_move.expect("a move must be chosen");
        assert!(
            chosen == Pos::new(7, 5) || chosen == Pos::new(7, 9),
            "expected the open-four extension, got ({}, {})",
            chosen.row,
            chosen.col
        );
        assert_eq!(result.score, f64::INFINITY);
    }

    #[test]
    fn test_full_board_yields_no_move() {
        // A full 3x3 board has no legal placement left
        let mut board = Board::new(3);
        for row in 0..3u8 {
            for col in 0..3u8 {
                let stone = if (row + col) % 2 == 0 { Stone::Black } else { Stone::White };
                assert!(board.place(Pos::new(row, col), stone));
            }
        }

        let mut searcher = Searcher::new(Stone::White);
        let mut work = board.clone();
        assert!(searcher.find_immediate_win(&mut work).is_none());
        let result = searcher.search(&mut work, board.last_move(), 3);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn test_empty_board_plays_center() {
        let board = Board::new(15);
        let mut searcher = Searcher::new(Stone::Black);
        let mut work = board.clone();
        let result = searcher.search(&mut work, board.last_move(), 2);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut board = Board::new(15);
        place_all(&mut board, &[(7, 7), (8, 8), (6, 6)], Stone::Black);
        place_all(&mut board, &[(7, 8), (8, 7)], Stone::White);

        let mut first = Searcher::new(Stone::White);
        let a = first.search(&mut board.clone(), board.last_move(), 3);
        let mut second = Searcher::new(Stone::White);
        let b = second.search(&mut board.clone(), board.last_move(), 3);

        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_working_copy_is_restored() {
        let mut board = Board::new(15);
        place_all(&mut board, &[(7, 7)], Stone::Black);

        let mut work = board.clone();
        let mut searcher = Searcher::new(Stone::White);
        let _ = searcher.search(&mut work, board.last_move(), 2);

        // Every speculative placement was undone
        assert_eq!(work.stone_count(), 1);
        assert_eq!(work.get(Pos::new(7, 7)), Stone::Black);
    }
}
