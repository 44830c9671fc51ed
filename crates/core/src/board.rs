//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (10x20 by default) where every cell is
//! `Empty`, `Transient` or `Locked` and carries a color tag.
//! Cells are stored in a flat row-major vector; dimensions never change after
//! construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! During play the board changes only through [`Board::lock_piece`] (merge +
//! line clear). [`Board::set_locked`] exists for staging positions in tests,
//! benches and puzzle setups before a game starts.

use thiserror::Error;

use crate::pieces::Shape;
use crate::types::{Cell, CellState, ColorTag, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Board access failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate outside `[0, width) x [0, height)`; always a caller bug
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u8,
        height: u8,
    },
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    empty_color: ColorTag,
    /// Flat vector of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with every cell `(empty_color, Empty)`
    pub fn new(width: u8, height: u8, empty_color: ColorTag) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::empty(empty_color.clone()); size],
            empty_color,
        }
    }

    /// Standard 10x20 board
    pub fn standard(empty_color: ColorTag) -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT, empty_color)
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Color tag carried by empty cells
    pub fn empty_color(&self) -> &ColorTag {
        &self.empty_color
    }

    /// Get cell at position (x, y), failing with `OutOfBounds` outside the grid
    pub fn cell_at(&self, x: i32, y: i32) -> Result<&Cell, GridError> {
        self.index(x, y)
            .map(|idx| &self.cells[idx])
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// Check if position is inside the board and holds a settled block
    pub fn is_locked(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Cell::is_locked)
    }

    /// A row is full when every cell is `Locked`
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(Cell::is_locked)
    }

    fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of `Locked` cells on the board
    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_locked()).count()
    }

    /// Settle a single block directly, bypassing piece placement.
    ///
    /// Used to stage board positions (tests, benches, puzzle setups).
    pub fn set_locked(&mut self, x: i32, y: i32, color: ColorTag) -> Result<(), GridError> {
        let idx = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[idx] = Cell::locked(color);
        Ok(())
    }

    /// Lock a piece onto the board and clear completed rows
    ///
    /// Every filled shape cell at `position` becomes `(color, Locked)`; then all
    /// full rows are removed and the same number of empty rows is inserted at
    /// the top. Returns the number of rows cleared.
    ///
    /// Fails without touching the board if any filled cell is out of bounds.
    pub fn lock_piece(
        &mut self,
        shape: &Shape,
        position: Position,
        color: &ColorTag,
    ) -> Result<usize, GridError> {
        let cells = shape.filled_cells();

        // First check that every cell lands on the board
        let mut targets = arrayvec::ArrayVec::<usize, 16>::new();
        for &(cx, cy) in &cells {
            let (x, y) = (position.x + cx, position.y + cy);
            let idx = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
            targets.push(idx);
        }

        // Then merge
        for idx in targets {
            self.cells[idx] = Cell::locked(color.clone());
        }

        Ok(self.clear_full_rows())
    }

    /// Remove every full row, compacting the rest downwards
    /// Uses a two-pointer pass from the bottom; returns the number of rows removed
    fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut write_y = height;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    for i in 0..width {
                        self.cells.swap(src_start + i, dst_start + i);
                    }
                }
            }
        }

        // Fresh empty rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = Cell::empty(self.empty_color.clone());
        }

        cleared
    }

    /// Count of cells in a given state, for invariant checks
    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::tetromino;
    use crate::types::PieceKind;
    use std::sync::Arc;

    fn color(tag: &str) -> ColorTag {
        Arc::from(tag)
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::standard(color("gray"));
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_new_board_is_empty_with_color() {
        let board = Board::new(4, 3, color("navy"));
        assert_eq!(board.cells().len(), 12);
        assert!(board
            .cells()
            .iter()
            .all(|c| c.state == CellState::Empty && &*c.color == "navy"));
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let board = Board::standard(color("gray"));
        assert!(board.cell_at(0, 0).is_ok());
        assert_eq!(
            board.cell_at(10, 3),
            Err(GridError::OutOfBounds {
                x: 10,
                y: 3,
                width: 10,
                height: 20
            })
        );
        assert!(board.cell_at(0, -1).is_err());
        assert!(board.cell_at(0, 20).is_err());
    }

    #[test]
    fn test_lock_piece_out_of_bounds_leaves_board_untouched() {
        let mut board = Board::standard(color("gray"));
        let o = tetromino(PieceKind::O);
        let before = board.clone();

        let err = board.lock_piece(&o.shape, Position::new(9, 5), &o.color);
        assert!(matches!(err, Err(GridError::OutOfBounds { x: 10, .. })));
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_full_rows_keeps_relative_order() {
        let mut board = Board::new(3, 4, color("gray"));
        // Row 1 marker, row 2 full, row 3 marker
        board.set_locked(0, 1, color("a")).unwrap();
        for x in 0..3 {
            board.set_locked(x, 2, color("full")).unwrap();
        }
        board.set_locked(2, 3, color("b")).unwrap();

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(&*board.get(0, 2).unwrap().color, "a");
        assert_eq!(&*board.get(2, 3).unwrap().color, "b");
        assert!(board.row(0).iter().all(Cell::is_empty));
        assert!(board.row(1).iter().all(Cell::is_empty));
        assert_eq!(board.locked_count(), 2);
    }
}
