//! Game module - the board engine state machine
//!
//! Ties together the board, the shape tables, and the spawn policy. All
//! mutation of the grid and the active piece goes through the operations
//! here; the render path reads through [`Game::get`] or a
//! [`GameSnapshot`](crate::core::snapshot::GameSnapshot) copy.
//!
//! Every operation runs to completion synchronously: a movement either
//! commits whole or leaves the state untouched, so a read between any two
//! calls always observes a consistent board.

use std::error::Error;
use std::fmt;

use crate::core::pieces::{get_shape, spawn_position, try_rotate, PieceShape};
use crate::core::rng::{SevenBag, SpawnPolicy};
use crate::core::Board;
use crate::types::{Cell, GameAction, Phase, PieceKind, Rotation, MAX_BOARD_DIM};

/// Construction error: board dimensions outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDimensions {
    pub width: u8,
    pub height: u8,
}

impl fmt::Display for InvalidDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid board dimensions {}x{}: both sides must be in 1..={}",
            self.width, self.height, MAX_BOARD_DIM
        )
    }
}

impl Error for InvalidDimensions {}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor for the given board width
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let (x, y) = spawn_position(board_width);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (cell offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four occupied cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if all cells are at valid positions on the board
    pub fn is_valid(&self, board: &Board) -> bool {
        self.shape()
            .iter()
            .all(|&(dx, dy)| board.is_valid(self.x + dx, self.y + dy))
    }

    /// Check if the piece covers the given board coordinate
    pub fn covers(&self, x: i8, y: i8) -> bool {
        self.shape()
            .iter()
            .any(|&(dx, dy)| self.x + dx == x && self.y + dy == y)
    }
}

/// The board engine.
///
/// Owns the grid and the active piece; generic over the spawn selection
/// policy so callers (and tests) can swap the randomizer.
#[derive(Debug, Clone)]
pub struct Game<P: SpawnPolicy = SevenBag> {
    board: Board,
    active: Option<Tetromino>,
    phase: Phase,
    policy: P,
}

impl Game<SevenBag> {
    /// Create a new engine with the default bag randomizer.
    /// Spawns the first piece immediately.
    pub fn new(width: u8, height: u8) -> Result<Self, InvalidDimensions> {
        Self::with_policy(width, height, SevenBag::default())
    }

    /// Create a new engine with a bag randomizer seeded explicitly
    pub fn with_seed(width: u8, height: u8, seed: u32) -> Result<Self, InvalidDimensions> {
        Self::with_policy(width, height, SevenBag::new(seed))
    }
}

impl<P: SpawnPolicy> Game<P> {
    /// Create a new engine with the given spawn policy
    pub fn with_policy(width: u8, height: u8, policy: P) -> Result<Self, InvalidDimensions> {
        if width == 0 || height == 0 || width > MAX_BOARD_DIM || height > MAX_BOARD_DIM {
            return Err(InvalidDimensions { width, height });
        }

        let mut game = Self {
            board: Board::new(width, height),
            active: None,
            phase: Phase::Playing,
            policy,
        };
        game.spawn_piece();
        Ok(game)
    }

    pub fn width(&self) -> u8 {
        self.board.width()
    }

    pub fn height(&self) -> u8 {
        self.board.height()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read the cell at (row, col): the active piece's kind if it covers
    /// the cell, else the locked occupancy. Returns None out of range.
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        let locked = self.board.get(col, row)?;
        if let Some(active) = self.active {
            if active.covers(col, row) {
                return Some(Some(active.kind));
            }
        }
        Some(locked)
    }

    /// Advance game time by one gravity step.
    ///
    /// A piece that can no longer descend locks in place; full rows are
    /// cleared and the next piece spawns, or the game ends if it cannot.
    pub fn tick(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        if !self.try_move(0, 1) {
            self.lock_active();
        }
    }

    /// Attempt to translate the active piece one column left
    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    /// Attempt to translate the active piece one column right
    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Attempt to rotate the active piece clockwise
    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(true)
    }

    /// Attempt to rotate the active piece counter-clockwise
    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Drop the active piece until it lands, then lock it.
    /// Equivalent to calling `tick` until the piece locks.
    pub fn hard_drop(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        while self.try_move(0, 1) {}
        self.lock_active();
    }

    /// Re-initialize: empty board, Playing phase, spawn policy rewound,
    /// fresh piece. Equivalent to reconstruction with the same seed.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.phase = Phase::Playing;
        self.policy.reset();
        self.spawn_piece();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Try to move the active piece by (dx, dy). The move commits only if
    /// every resulting cell is in bounds and unoccupied.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let shape = active.shape();
        let valid = shape
            .iter()
            .all(|&(mx, my)| self.board.is_valid(active.x + mx + dx, active.y + my + dy));

        if valid {
            self.active = Some(Tetromino {
                x: active.x + dx,
                y: active.y + dy,
                ..active
            });
            return true;
        }

        false
    }

    /// Try to rotate the active piece at its current anchor. A colliding
    /// rotation is rejected and the prior rotation state is kept.
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |x, y| self.board.is_valid(x, y),
        );

        if let Some((_new_shape, new_rotation)) = result {
            self.active = Some(Tetromino {
                rotation: new_rotation,
                ..active
            });
            return true;
        }

        false
    }

    /// Landing sequence: lock the active piece into the board, clear full
    /// rows, then spawn the next piece or end the game.
    fn lock_active(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        let shape = active.shape();
        let locked = self
            .board
            .lock_piece(&shape, active.x, active.y, active.kind);
        debug_assert!(locked, "active piece must occupy free cells");

        self.active = None;
        self.board.clear_full_rows();
        self.spawn_piece();
    }

    /// Spawn the next piece at the top-center anchor. A spawn whose cells
    /// are blocked ends the game.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.policy.next_kind();
        let piece = Tetromino::spawn(kind, self.board.width());

        if !piece.is_valid(&self.board) {
            self.phase = Phase::GameOver;
            self.active = None;
            return false;
        }

        self.active = Some(piece);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic policy that cycles a fixed script of kinds.
    #[derive(Debug, Clone)]
    struct Scripted {
        kinds: Vec<PieceKind>,
        next: usize,
    }

    impl Scripted {
        fn new(kinds: &[PieceKind]) -> Self {
            Self {
                kinds: kinds.to_vec(),
                next: 0,
            }
        }
    }

    impl SpawnPolicy for Scripted {
        fn next_kind(&mut self) -> PieceKind {
            let kind = self.kinds[self.next % self.kinds.len()];
            self.next += 1;
            kind
        }

        fn reset(&mut self) {
            self.next = 0;
        }
    }

    #[test]
    fn test_new_game_spawns_first_piece() {
        let game = Game::with_seed(10, 24, 12345).unwrap();

        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.active().is_some());
        assert_eq!(game.width(), 10);
        assert_eq!(game.height(), 24);
    }

    #[test]
    fn test_new_game_rejects_bad_dimensions() {
        assert_eq!(
            Game::new(0, 24).unwrap_err(),
            InvalidDimensions {
                width: 0,
                height: 24
            }
        );
        assert!(Game::new(10, 0).is_err());
        assert!(Game::new(MAX_BOARD_DIM + 1, 24).is_err());
        assert!(Game::new(10, MAX_BOARD_DIM + 1).is_err());
    }

    #[test]
    fn test_invalid_dimensions_message() {
        let err = Game::new(0, 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid board dimensions 0x5: both sides must be in 1..=120"
        );
    }

    #[test]
    fn test_spawn_anchor_is_top_center() {
        let game =
            Game::with_policy(10, 24, Scripted::new(&[PieceKind::O])).unwrap();

        let active = game.active().unwrap();
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(active.rotation, Rotation::North);
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut game =
            Game::with_policy(10, 24, Scripted::new(&[PieceKind::T])).unwrap();

        let y0 = game.active().unwrap().y;
        game.tick();
        assert_eq!(game.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn test_tick_locks_landed_piece_and_spawns_next() {
        let mut game =
            Game::with_policy(10, 24, Scripted::new(&[PieceKind::O, PieceKind::T])).unwrap();

        // O occupies rows y..y+2; it lands when its bottom row is 23
        for _ in 0..22 {
            game.tick();
        }
        assert_eq!(game.active().unwrap().kind, PieceKind::O);

        // Landing tick: lock, then the scripted T spawns
        game.tick();
        assert_eq!(game.active().unwrap().kind, PieceKind::T);
        assert_eq!(game.get(23, 4), Some(Some(PieceKind::O)));
        assert_eq!(game.get(22, 5), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_get_composites_active_piece() {
        let game =
            Game::with_policy(10, 24, Scripted::new(&[PieceKind::O])).unwrap();

        // O at anchor (3, 0) covers columns 4-5, rows 0-1
        assert_eq!(game.get(0, 4), Some(Some(PieceKind::O)));
        assert_eq!(game.get(1, 5), Some(Some(PieceKind::O)));
        assert_eq!(game.get(0, 3), Some(None));

        // Out of range
        assert_eq!(game.get(-1, 0), None);
        assert_eq!(game.get(24, 0), None);
        assert_eq!(game.get(0, 10), None);
    }

    #[test]
    fn test_rotation_rejected_against_wall() {
        let mut game =
            Game::with_policy(10, 24, Scripted::new(&[PieceKind::I])).unwrap();

        // Stand the I piece up, push it to the left wall, then try to lay
        // it back down: the horizontal shape would cross the wall.
        assert!(game.rotate_cw());
        while game.move_left() {}
        let before = game.active().unwrap();

        assert!(!game.rotate_cw());
        assert_eq!(game.active().unwrap(), before);
    }

    #[test]
    fn test_hard_drop_locks_at_floor() {
        let mut game =
            Game::with_policy(10, 24, Scripted::new(&[PieceKind::I, PieceKind::O])).unwrap();

        game.hard_drop();

        // I locks flat on the bottom row, columns 3-6
        for col in 3..7 {
            assert_eq!(game.get(23, col), Some(Some(PieceKind::I)));
        }
        assert_eq!(game.active().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_stack_reaches_top_ends_game() {
        let mut game =
            Game::with_policy(10, 24, Scripted::new(&[PieceKind::O])).unwrap();

        // O pieces stack 2 rows each in the same columns; 12 fills the well
        for _ in 0..12 {
            game.hard_drop();
        }

        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.active().is_none());
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut game =
            Game::with_policy(10, 24, Scripted::new(&[PieceKind::O])).unwrap();

        for _ in 0..12 {
            game.hard_drop();
        }
        assert!(game.is_game_over());

        game.reset();
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.active().is_some());
        // Only the fresh spawn occupies cells
        let active = game.active().unwrap();
        for row in 0..24 {
            for col in 0..10 {
                let expected = active.covers(col, row);
                assert_eq!(game.get(row, col).unwrap().is_some(), expected);
            }
        }
    }
}
