use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::{
    data::{Board, Cell, Coordinate},
    error::{GameError, Result},
    model::{GameParams, GameStatus, Outcome, Uncovered},
};

pub use counter::{annotate, count_adjacent_mines};
pub use generator::generate;
pub use reveal::uncover;

mod counter;
mod generator;
mod reveal;

/// One game: the board plus the counters and status the moves update.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    mines: usize,
    uncovered: usize,
    status: GameStatus,
    elapsed: Duration,
    last_activity: Instant,
}

impl GameSession {
    /// Generates a board that keeps `first` free of mines and uncovers it.
    #[instrument(level = "trace", skip(rng), fields(x = first.x, y = first.y))]
    pub fn start<R: Rng + ?Sized>(
        params: GameParams,
        first: Coordinate,
        rng: &mut R,
    ) -> Result<(Self, Vec<Cell>)> {
        info!(
            "Creating new game: {}x{} with {} mines",
            params.rows, params.columns, params.mines
        );
        let board = generate(&params, first, rng)?;
        Self::from_board(board, first)
    }

    /// Starts a game on a prepared layout. The board is annotated here.
    pub fn from_board(mut board: Board, first: Coordinate) -> Result<(Self, Vec<Cell>)> {
        board.validate(first)?;
        if board[first].has_mine() {
            return Err(GameError::InvalidConfiguration(format!(
                "first cell ({}, {}) holds a mine",
                first.x, first.y
            )));
        }
        annotate(&mut board);

        let mut session = Self {
            mines: board.mine_count(),
            board,
            uncovered: 0,
            status: GameStatus::Active,
            elapsed: Duration::ZERO,
            last_activity: Instant::now(),
        };
        let cells = session.reveal_safe(first);
        Ok((session, cells))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn columns(&self) -> usize {
        self.board.columns()
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    pub fn uncovered(&self) -> usize {
        self.uncovered
    }

    pub fn remaining_safe_cells(&self) -> usize {
        self.board.total_cells() - self.mines - self.uncovered
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn cell(&self, coordinate: Coordinate) -> Option<&Cell> {
        self.board.get(coordinate)
    }

    #[instrument(level = "trace", skip(self), fields(x = coordinate.x, y = coordinate.y))]
    pub fn uncover(&mut self, coordinate: Coordinate) -> Result<Uncovered> {
        self.check_not_finished()?;
        if self.status == GameStatus::Paused {
            warn!("Ignoring uncover on paused game");
            return Err(GameError::GamePaused);
        }
        let coordinate = self.board.validate(coordinate)?;

        self.last_activity = Instant::now();

        if self.board[coordinate].has_mine() {
            warn!(
                "Player hit mine at ({}, {}) - game over!",
                coordinate.x, coordinate.y
            );
            let cells = uncover(&mut self.board, coordinate);
            self.status = GameStatus::Defeat;
            return Ok(Uncovered {
                cells,
                status: self.status,
            });
        }

        let cells = self.reveal_safe(coordinate);
        Ok(Uncovered {
            cells,
            status: self.status,
        })
    }

    /// Stores the play time so far and stops accepting moves until resumed.
    pub fn pause(&mut self, elapsed: Duration) -> Result<()> {
        self.check_not_finished()?;
        self.elapsed = elapsed;
        self.status = GameStatus::Paused;
        self.last_activity = Instant::now();
        debug!("Game paused after {:?}", elapsed);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.check_not_finished()?;
        self.status = GameStatus::Active;
        self.last_activity = Instant::now();
        debug!("Game resumed");
        Ok(())
    }

    /// Ends a running game with an outcome decided outside the board, such
    /// as a forfeit or an expired clock.
    pub fn record_result(&mut self, outcome: Outcome) -> Result<()> {
        self.check_not_finished()?;
        self.status = outcome.into();
        self.last_activity = Instant::now();
        info!("Game ended with recorded {}", outcome);
        Ok(())
    }

    /// Idle sessions are evictable after `inactive_timeout`, finished ones
    /// already after `finished_retention`.
    pub fn should_cleanup(&self, inactive_timeout: Duration, finished_retention: Duration) -> bool {
        let idle = self.last_activity.elapsed();
        if self.status.is_terminal() {
            idle >= finished_retention
        } else {
            idle >= inactive_timeout
        }
    }

    fn reveal_safe(&mut self, coordinate: Coordinate) -> Vec<Cell> {
        let cells = uncover(&mut self.board, coordinate);
        self.uncovered += cells.len();

        if self.has_won() {
            self.status = GameStatus::Victory;
            info!("Game won! All safe cells uncovered.");
        } else {
            debug!(
                "Uncovered {} cells, {} safe cells left",
                cells.len(),
                self.remaining_safe_cells()
            );
        }

        cells
    }

    fn has_won(&self) -> bool {
        self.uncovered + self.mines == self.board.total_cells()
    }

    fn check_not_finished(&self) -> Result<()> {
        match self.status.outcome() {
            Some(outcome) => {
                debug!("Ignoring action on game that ended in {}", outcome);
                Err(GameError::GameAlreadyEnded(outcome))
            }
            None => Ok(()),
        }
    }
}
