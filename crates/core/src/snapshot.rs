use serde::Serialize;

use crate::game_state::{ActivePiece, GameState};
use crate::pieces::Piece;
use crate::types::{Cell, CellState, ColorTag, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Vec<Vec<u8>>,
    pub color: ColorTag,
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape.to_rows(),
            color: value.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    #[serde(flatten)]
    pub piece: PieceSnapshot,
    pub x: i32,
    pub y: i32,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            piece: PieceSnapshot::from(&value.piece),
            x: value.position.x,
            y: value.position.y,
        }
    }
}

/// Fully consistent, owned copy of everything a shell needs to draw a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Settled board, rows top to bottom
    pub board: Vec<Vec<Cell>>,
    pub active: ActiveSnapshot,
    pub next: PieceSnapshot,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub lives: u32,
    pub game_over: bool,
    pub paused: bool,
    pub fall_interval_ms: Option<u32>,
}

impl GameSnapshot {
    pub fn capture(game: &GameState) -> Self {
        Self {
            board: game.board().rows().map(<[Cell]>::to_vec).collect(),
            active: ActiveSnapshot::from(game.active()),
            next: PieceSnapshot::from(game.next_piece()),
            score: game.score(),
            level: game.level(),
            lines: game.lines(),
            lives: game.lives(),
            game_over: game.game_over(),
            paused: game.paused(),
            fall_interval_ms: game.fall_interval_ms(),
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Board with the falling piece drawn in as `Transient` cells
    ///
    /// Cells above the top of the board are skipped.
    pub fn overlay(&self) -> Vec<Vec<Cell>> {
        let mut rows = self.board.clone();
        for (dy, row) in self.active.piece.shape.iter().enumerate() {
            for (dx, &bit) in row.iter().enumerate() {
                if bit == 0 {
                    continue;
                }
                let x = self.active.x + dx as i32;
                let y = self.active.y + dy as i32;
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(cell) = rows
                    .get_mut(y as usize)
                    .and_then(|r| r.get_mut(x as usize))
                {
                    *cell = Cell {
                        color: self.active.piece.color.clone(),
                        state: CellState::Transient,
                    };
                }
            }
        }
        rows
    }
}
