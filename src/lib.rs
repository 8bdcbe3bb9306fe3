//! Blockfall: a falling-block puzzle board engine.
//!
//! The engine is [`core::Game`]: a grid plus an active tetromino, advanced
//! by an external logic clock ([`core::Game::tick`]) and steered by input
//! events (`move_left`, `move_right`, `rotate_cw`, `rotate_ccw`,
//! `hard_drop`, `reset`). A render loop on its own cadence reads cells with
//! [`core::Game::get`] or copies the whole state via
//! [`core::Game::snapshot`].
//!
//! Everything in [`core`] is pure and deterministic; the crate's binary
//! (`src/main.rs`) is a small crossterm front-end that supplies the two
//! cadences.
//!
//! # Example
//!
//! ```
//! use blockfall::core::Game;
//! use blockfall::types::Phase;
//!
//! let mut game = Game::with_seed(10, 24, 12345)?;
//!
//! game.move_left();
//! game.rotate_cw();
//! game.tick();
//!
//! assert_eq!(game.phase(), Phase::Playing);
//! # Ok::<(), blockfall::core::InvalidDimensions>(())
//! ```

pub mod core;
pub mod types;
pub mod view;
