//! Collision module - the single legality check for piece placement
//!
//! Movement, falling, rotation and the hard-drop scan all go through
//! [`collides`]. Rows above the board (`y < 0`) are legal so a piece can spawn
//! partially above the visible top; the sides and the floor are walls, and
//! `Locked` cells block. `Transient` cells never block.

use crate::board::Board;
use crate::pieces::Shape;
use crate::types::Position;

/// Would `shape` placed at `position + displacement` hit a wall, the floor, or
/// a settled block?
pub fn collides(shape: &Shape, position: Position, board: &Board, displacement: Position) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;

    shape.filled_cells().iter().any(|&(cx, cy)| {
        let x = cx + position.x + displacement.x;
        let y = cy + position.y + displacement.y;

        if x < 0 || x >= width || y >= height {
            return true;
        }
        // Spawn region above the top is open
        if y < 0 {
            return false;
        }
        board.is_locked(x, y)
    })
}
