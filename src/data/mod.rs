use serde::{Deserialize, Serialize};

pub use board::{Board, Neighbors};

mod board;

/// Column `x` and row `y` of a cell, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Covered,
    Uncovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    coordinate: Coordinate,
    has_mine: bool,
    mines_around: Option<u8>,
    state: CellState,
}

impl Cell {
    pub(crate) fn new(coordinate: Coordinate, has_mine: bool) -> Self {
        Self {
            coordinate,
            has_mine,
            mines_around: None,
            state: CellState::Covered,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    /// Number of mines among the neighbors. `None` for mine cells and for
    /// boards that have not been annotated yet.
    pub fn mines_around(&self) -> Option<u8> {
        self.mines_around
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_uncovered(&self) -> bool {
        self.state == CellState::Uncovered
    }

    /// Empty cells open up their neighbors when uncovered.
    pub(crate) fn opens_neighbors(&self) -> bool {
        !self.has_mine && self.mines_around == Some(0)
    }

    pub(crate) fn set_mines_around(&mut self, count: u8) {
        if !self.has_mine {
            self.mines_around = Some(count);
        }
    }

    /// Returns `false` if the cell was already uncovered.
    pub(crate) fn uncover(&mut self) -> bool {
        if self.state == CellState::Uncovered {
            return false;
        }
        self.state = CellState::Uncovered;
        true
    }
}
