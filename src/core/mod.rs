//! Core module - pure game logic with no external I/O
//!
//! Everything here is deterministic and synchronous: the board, the shape
//! tables, the spawn policies, and the engine state machine that ties them
//! together. Rendering and input live outside this module and talk to it
//! only through the engine's operations and snapshots.

pub mod board;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use game::{Game, InvalidDimensions, Tetromino};
pub use pieces::{get_shape, spawn_position, try_rotate};
pub use rng::{SevenBag, SimpleRng, SpawnPolicy, UniformRandom};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
