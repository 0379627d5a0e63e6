//! Board structure with dynamic size

use super::{Pos, Stone};

/// Game board, row-major cell storage
///
/// # Example
/// ```
/// use gomoku::board::{Board, Pos, Stone};
///
/// let mut board = Board::new(15);
/// board.place_stone(Pos::new(7, 7), Stone::Black);
/// assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Stone>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        debug_assert!(super::SUPPORTED_SIZES.contains(&size));
        Self {
            size,
            cells: vec![Stone::Empty; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Center position, used as the opening move
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    /// Check if signed coordinates fall on the board
    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        Pos::is_valid(row, col, self.size)
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone; legality is the caller's concern
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        let idx = pos.to_index(self.size);
        self.cells[idx] = stone;
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        let idx = pos.to_index(self.size);
        self.cells[idx] = Stone::Empty;
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s != Stone::Empty).count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(|&s| s == Stone::Empty)
    }

    /// Check if every cell is occupied (draw condition)
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&s| s != Stone::Empty)
    }

    /// Iterate positions that hold a stone
    pub fn occupied(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &s)| s != Stone::Empty)
            .map(move |(idx, _)| Pos::from_index(idx, self.size))
    }

    /// Row-by-row copy of the grid, the shape snapshots serialize
    pub fn rows(&self) -> Vec<Vec<Stone>> {
        (0..self.size)
            .map(|r| self.cells[r * self.size..(r + 1) * self.size].to_vec())
            .collect()
    }
}
