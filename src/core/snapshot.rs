//! Snapshot module - read-only copy of the engine state for rendering
//!
//! The render path never sees the engine's internal storage; it gets a
//! copied grid with the active piece already composited, the same picture
//! a cell-by-cell `get(row, col)` sweep would produce.

use crate::core::game::{Game, Tetromino};
use crate::core::rng::SpawnPolicy;
use crate::types::{Cell, Phase, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// A complete, self-contained copy of the observable engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major grid with the active piece composited over locked cells
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            active: None,
            phase: Phase::Playing,
        }
    }

    /// Cell at (row, col); None out of range
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        if col < 0 || col >= self.width as i8 || row < 0 || row >= self.height as i8 {
            return None;
        }
        Some(self.cells[row as usize * self.width as usize + col as usize])
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl<P: SpawnPolicy> Game<P> {
    /// Fill an existing snapshot, reusing its grid allocation when the
    /// dimensions already match.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let size = self.width() as usize * self.height() as usize;
        out.width = self.width();
        out.height = self.height();
        out.cells.clear();
        out.cells.resize(size, None);

        out.cells.copy_from_slice(self.board().cells());
        if let Some(active) = self.active() {
            // Active cells are always in bounds while Playing
            for (x, y) in active.cells() {
                let idx = y as usize * self.width() as usize + x as usize;
                out.cells[idx] = Some(active.kind);
            }
            out.active = Some(ActiveSnapshot::from(active));
        } else {
            out.active = None;
        }
        out.phase = self.phase();
    }

    /// Allocate a fresh snapshot of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::new(self.width(), self.height());
        self.snapshot_into(&mut s);
        s
    }
}
