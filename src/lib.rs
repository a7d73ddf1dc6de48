//! Rules engine for a minesweeper game server.
//!
//! A game is created on the first click: mines are placed anywhere except
//! the clicked cell, every safe cell gets its adjacent mine count, and the
//! click is uncovered, flooding across cells with no adjacent mines. Later
//! clicks go through [`GameSession::uncover`] until the game is won or lost.
//!
//! ```
//! use minefield_engine::{Coordinate, GameParams, GameSession, GameStatus};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let (session, cells) =
//!     GameSession::start(GameParams::new(9, 9, 10), Coordinate::new(4, 4), &mut rng)?;
//!
//! assert!(!cells[0].has_mine());
//! assert_ne!(session.status(), GameStatus::Defeat);
//! # Ok::<(), minefield_engine::GameError>(())
//! ```
//!
//! Servers hosting many games use [`GameService`] over a [`SessionStore`],
//! which serializes moves per session and addresses games by id.

pub mod cleanup;
pub mod config;
pub mod data;
pub mod error;
pub mod logic;
pub mod model;
pub mod service;
pub mod store;

pub use config::CleanupConfig;
pub use data::{Board, Cell, CellState, Coordinate};
pub use error::{GameError, Result};
pub use logic::GameSession;
pub use model::{GameParams, GameStatus, Outcome, Started, Uncovered};
pub use service::GameService;
pub use store::{InMemorySessionStore, SessionHandle, SessionId, SessionStore};
