use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    data::Cell,
    error::{GameError, Result},
};

/// Board dimensions and mine count requested for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameParams {
    pub rows: usize,
    pub columns: usize,
    pub mines: usize,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            rows: 9,
            columns: 9,
            mines: 10,
        }
    }
}

impl GameParams {
    pub fn new(rows: usize, columns: usize, mines: usize) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    /// Total number of cells, or an error when the dimensions are unusable.
    pub fn total_cells(&self) -> Result<usize> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "board must have at least one row and one column, got {}x{}",
                self.rows, self.columns
            )));
        }

        self.rows.checked_mul(self.columns).ok_or_else(|| {
            GameError::InvalidConfiguration(format!(
                "board of {}x{} cells is too large",
                self.rows, self.columns
            ))
        })
    }

    /// Checks that the board can hold the mines and still leave the first
    /// revealed cell free.
    pub fn validate(&self) -> Result<()> {
        let total = self.total_cells()?;
        if self.mines >= total {
            return Err(GameError::InvalidConfiguration(format!(
                "{} mines do not fit on a {}x{} board with a safe first cell",
                self.mines, self.rows, self.columns
            )));
        }
        Ok(())
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Victory,
    Defeat,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Victory => f.write_str("victory"),
            Outcome::Defeat => f.write_str("defeat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Paused,
    Victory,
    Defeat,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Victory => Some(Outcome::Victory),
            Self::Defeat => Some(Outcome::Defeat),
            Self::Active | Self::Paused => None,
        }
    }
}

impl From<Outcome> for GameStatus {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Victory => Self::Victory,
            Outcome::Defeat => Self::Defeat,
        }
    }
}

/// Cells uncovered by a single move and the status it left the game in.
///
/// Each cell appears at most once; `cells` is empty when the move targeted a
/// cell that was already uncovered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Uncovered {
    pub cells: Vec<Cell>,
    pub status: GameStatus,
}

/// Result of starting a game through the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Started {
    pub id: String,
    pub cells: Vec<Cell>,
    pub status: GameStatus,
}
