//! Board structure with last-move tracking

use super::{Pos, Stone};

/// Game board: a size x size grid of cells plus the most recently
/// placed stone, which is all the win check needs.
///
/// The board never resizes; a new game gets a new board.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Stone>,
    last_move: Option<Pos>,
}

impl Board {
    /// Create an empty board of the given side length.
    ///
    /// 15 and 19 are the supported presets, but any positive size works.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Stone::Empty; size * size],
            last_move: None,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Center cell, used as the opening move and the fallback candidate
    #[inline]
    pub fn center(&self) -> Pos {
        Pos::new((self.size / 2) as u8, (self.size / 2) as u8)
    }

    /// Check signed coordinates against the board bounds
    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.row as usize * self.size + pos.col as usize]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone and record it as the last move.
    ///
    /// Returns `false` without mutating anything when the target is out of
    /// bounds or occupied. This is the only validation the core performs;
    /// there is no panicking variant.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> bool {
        if stone == Stone::Empty || !self.in_bounds(i32::from(pos.row), i32::from(pos.col)) {
            return false;
        }
        let idx = pos.row as usize * self.size + pos.col as usize;
        if self.cells[idx] != Stone::Empty {
            return false;
        }
        self.cells[idx] = stone;
        self.last_move = Some(pos);
        true
    }

    /// Clear a cell unconditionally.
    ///
    /// Used by the search to undo exploratory placements. Deliberately does
    /// not touch the last-move record; the search tracks its own trail.
    #[inline]
    pub fn remove(&mut self, pos: Pos) {
        self.cells[pos.row as usize * self.size + pos.col as usize] = Stone::Empty;
    }

    /// The most recently placed stone, if any
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// True if five-in-a-row runs through `pos` for `stone`.
    ///
    /// Counts the cell itself plus contiguous same-side neighbors along
    /// each of the four axes.
    #[must_use]
    pub fn wins_at(&self, pos: Pos, stone: Stone) -> bool {
        crate::rules::wins_at(self, pos, stone)
    }

    /// True if the last placed stone completed five-in-a-row
    #[must_use]
    pub fn last_move_wins(&self) -> bool {
        crate::rules::last_move_wins(self)
    }

    /// Total stones on board
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Stone::Empty).count()
    }

    /// Check if every cell is occupied (a finished drawn game)
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Stone::Empty)
    }

    /// Check if board is empty
    #[must_use]
    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == Stone::Empty)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(15)
    }
}
