//! Rotation module - matrix rotation and the wall-kick search
//!
//! Rotation is transpose + reversal:
//! - clockwise: transpose, then reverse each row
//! - counterclockwise: transpose, then reverse the row order
//!
//! Wall kicks are a simplified horizontal search, not the SRS kick tables.
//! After rotating, while the piece collides the x position is shifted by the
//! current step and the step advances `+1, -2, +3, -4, ...`. Steps apply
//! cumulatively, so the offsets tried from the starting x are `+1, -1, +2, ...`.
//! The search gives up as soon as the next step exceeds the rotated shape's
//! column count.

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::Shape;
use crate::types::{Position, RotateDirection};

/// Rotate a shape 90 degrees; an `R x C` shape becomes `C x R`
pub fn rotate(shape: &Shape, direction: RotateDirection) -> Shape {
    let rows = shape.rows();
    let cols = shape.cols();
    let mut out = Shape::empty(cols as u8, rows as u8);

    // transposed[i][j] = shape[j][i]
    for i in 0..cols {
        for j in 0..rows {
            let filled = shape.is_filled(i, j);
            let (x, y) = match direction {
                // Reverse each transposed row
                RotateDirection::Clockwise => (rows - 1 - j, i),
                // Reverse the order of transposed rows
                RotateDirection::CounterClockwise => (j, cols - 1 - i),
            };
            out.set(x, y, filled);
        }
    }

    out
}

/// Rotate with wall kicks
///
/// Returns the rotated shape and the (possibly shifted) position, or `None`
/// when no legal placement is found; the caller then keeps its piece as is.
pub fn kick_rotate(
    shape: &Shape,
    position: Position,
    board: &Board,
    direction: RotateDirection,
) -> Option<(Shape, Position)> {
    let rotated = rotate(shape, direction);
    let bound = rotated.cols() as i32;

    let mut x = position.x;
    let mut step: i32 = 1;
    while collides(&rotated, Position::new(x, position.y), board, Position::ZERO) {
        x += step;
        step = -(step + step.signum());
        if step > bound {
            return None;
        }
    }

    Some((rotated, Position::new(x, position.y)))
}
