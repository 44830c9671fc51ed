//! Pieces module - tetromino shapes and the piece catalog
//!
//! Shapes are small bit matrices (`rows x cols`, each at most 4) stored inline,
//! so they are `Copy` and rotating one never allocates. The catalog holds one
//! immutable template per kind; [`tetromino`] hands out independent copies.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::types::{ColorTag, PieceKind};

/// Largest supported side of a shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// Filled-cell offsets `(x, y)` relative to the shape's top-left corner
pub type FilledCells = ArrayVec<(i32, i32), 16>;

/// Binary shape matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4x4; catalog
    /// shapes are constants so this only fires on a malformed literal.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(
            (1..=MAX_SHAPE_SIDE).contains(&height) && (1..=MAX_SHAPE_SIDE).contains(&width),
            "shape must be between 1x1 and 4x4, got {}x{}",
            height,
            width
        );

        let mut bits = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "ragged shape row {}", y);
            for (x, &v) in row.iter().enumerate() {
                bits[y][x] = v != 0;
            }
        }

        Self {
            rows: height as u8,
            cols: width as u8,
            bits,
        }
    }

    pub(crate) fn empty(rows: u8, cols: u8) -> Self {
        Self {
            rows,
            cols,
            bits: [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
        }
    }

    /// Number of rows (R)
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Number of columns (C); this is the shape width used for spawning and kicks
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.cols() && y < self.rows() && self.bits[y][x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, filled: bool) {
        self.bits[y][x] = filled;
    }

    /// Filled cells in row-major order
    pub fn filled_cells(&self) -> FilledCells {
        let mut out = FilledCells::new();
        for y in 0..self.rows() {
            for x in 0..self.cols() {
                if self.bits[y][x] {
                    out.push((x as i32, y as i32));
                }
            }
        }
        out
    }

    /// Rows as 0/1 vectors (for snapshots and display)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|y| (0..self.cols()).map(|x| self.bits[y][x] as u8).collect())
            .collect()
    }
}

/// A tetromino: kind, shape and color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: ColorTag,
}

/// Catalog shape for a kind
pub fn catalog_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]]),
        PieceKind::J => Shape::from_rows(&[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]]),
        PieceKind::L => Shape::from_rows(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        PieceKind::T => Shape::from_rows(&[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
    }
}

/// Catalog color tag for a kind
pub fn catalog_color(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "cyan",
        PieceKind::J => "blue",
        PieceKind::L => "orange",
        PieceKind::O => "yellow",
        PieceKind::S => "green",
        PieceKind::T => "purple",
        PieceKind::Z => "red",
    }
}

/// Fresh, independently rotatable copy of a catalog piece
pub fn tetromino(kind: PieceKind) -> Piece {
    Piece {
        kind,
        shape: catalog_shape(kind),
        color: Arc::from(catalog_color(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalog_piece_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(catalog_shape(kind).filled_cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_catalog_dimensions() {
        assert_eq!((catalog_shape(PieceKind::I).rows(), catalog_shape(PieceKind::I).cols()), (4, 4));
        assert_eq!((catalog_shape(PieceKind::O).rows(), catalog_shape(PieceKind::O).cols()), (2, 2));
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(catalog_shape(kind).rows(), 3);
            assert_eq!(catalog_shape(kind).cols(), 3);
        }
    }

    #[test]
    fn test_tetromino_copies_are_independent() {
        let mut a = tetromino(PieceKind::T);
        a.shape.set(0, 0, true);
        let b = tetromino(PieceKind::T);
        assert!(!b.shape.is_filled(0, 0));
        assert_eq!(b.shape, catalog_shape(PieceKind::T));
    }

    #[test]
    fn test_filled_cells_row_major() {
        let t = catalog_shape(PieceKind::T);
        assert_eq!(t.filled_cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_to_rows() {
        let o = catalog_shape(PieceKind::O);
        assert_eq!(o.to_rows(), vec![vec![1, 1], vec![1, 1]]);
    }

    #[test]
    #[should_panic(expected = "ragged")]
    fn test_ragged_shape_panics() {
        Shape::from_rows(&[&[1, 1], &[1]]);
    }
}
