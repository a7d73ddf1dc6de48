use std::ops::Index;

use serde::Serialize;

use super::{Cell, Coordinate};
use crate::error::{GameError, Result};

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Grid of cells stored row by row, so the cell at `[row][column]` lives at
/// `column + row * columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Board with no mines and no counts yet.
    pub(crate) fn empty(rows: usize, columns: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|y| (0..columns).map(move |x| Cell::new(Coordinate::new(x, y), false)))
            .collect();

        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Builds an unannotated board with mines at exactly the given sites.
    /// Repeated coordinates count once.
    pub fn from_mine_coordinates(
        rows: usize,
        columns: usize,
        mines: &[Coordinate],
    ) -> Result<Self> {
        let mut board = Self::empty(rows, columns);
        for &coordinate in mines {
            board.validate(coordinate)?;
            board.place_mine(coordinate);
        }
        Ok(board)
    }

    pub(crate) fn place_mine(&mut self, coordinate: Coordinate) {
        if let Some(cell) = self.get_mut(coordinate) {
            *cell = Cell::new(coordinate, true);
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x < self.columns && coordinate.y < self.rows
    }

    pub fn validate(&self, coordinate: Coordinate) -> Result<Coordinate> {
        if self.contains(coordinate) {
            Ok(coordinate)
        } else {
            Err(GameError::CellOutOfBounds {
                x: coordinate.x,
                y: coordinate.y,
            })
        }
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<&Cell> {
        if !self.contains(coordinate) {
            return None;
        }
        self.cells.get(coordinate.x + coordinate.y * self.columns)
    }

    pub(crate) fn get_mut(&mut self, coordinate: Coordinate) -> Option<&mut Cell> {
        if !self.contains(coordinate) {
            return None;
        }
        self.cells.get_mut(coordinate.x + coordinate.y * self.columns)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Rows of the grid, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.columns.max(1))
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.has_mine()).count()
    }

    pub fn mine_coordinates(&self) -> Vec<Coordinate> {
        self.cells
            .iter()
            .filter(|cell| cell.has_mine())
            .map(Cell::coordinate)
            .collect()
    }

    /// In-bounds neighbors of `coordinate`, without wrapping at the edges.
    pub fn neighbors(&self, coordinate: Coordinate) -> Neighbors {
        Neighbors::new(coordinate, self.columns, self.rows)
    }
}

impl Index<Coordinate> for Board {
    type Output = Cell;

    fn index(&self, coordinate: Coordinate) -> &Self::Output {
        &self.cells[coordinate.x + coordinate.y * self.columns]
    }
}

/// Applies `delta` to `center`, returning a value only when it stays on the board.
fn apply_delta(
    center: Coordinate,
    (dx, dy): (isize, isize),
    columns: usize,
    rows: usize,
) -> Option<Coordinate> {
    let x = center.x.checked_add_signed(dx)?;
    if x >= columns {
        return None;
    }

    let y = center.y.checked_add_signed(dy)?;
    if y >= rows {
        return None;
    }

    Some(Coordinate::new(x, y))
}

#[derive(Debug, Clone)]
pub struct Neighbors {
    center: Coordinate,
    columns: usize,
    rows: usize,
    index: usize,
}

impl Neighbors {
    fn new(center: Coordinate, columns: usize, rows: usize) -> Self {
        Self {
            center,
            columns,
            rows,
            index: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(self.index) {
            self.index += 1;
            if let Some(next) = apply_delta(self.center, delta, self.columns, self.rows) {
                return Some(next);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor_count(board: &Board, x: usize, y: usize) -> usize {
        board.neighbors(Coordinate::new(x, y)).count()
    }

    #[test]
    fn corners_edges_and_interior_have_expected_neighbors() {
        let board = Board::empty(4, 5);

        assert_eq!(neighbor_count(&board, 0, 0), 3);
        assert_eq!(neighbor_count(&board, 4, 3), 3);
        assert_eq!(neighbor_count(&board, 2, 0), 5);
        assert_eq!(neighbor_count(&board, 0, 2), 5);
        assert_eq!(neighbor_count(&board, 2, 2), 8);
    }

    #[test]
    fn neighbors_exclude_center_and_stay_adjacent() {
        let board = Board::empty(3, 3);
        let center = Coordinate::new(1, 1);

        for neighbor in board.neighbors(center) {
            assert_ne!(neighbor, center);
            assert!(neighbor.x.abs_diff(center.x) <= 1);
            assert!(neighbor.y.abs_diff(center.y) <= 1);
        }
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        let board = Board::empty(1, 1);

        assert_eq!(neighbor_count(&board, 0, 0), 0);
    }

    #[test]
    fn cells_are_stored_row_major() {
        let board = Board::empty(2, 3);
        let rows: Vec<&[Cell]> = board.rows_iter().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2].coordinate(), Coordinate::new(2, 1));
        assert_eq!(board[Coordinate::new(2, 1)].coordinate(), Coordinate::new(2, 1));
    }

    #[test]
    fn from_mine_coordinates_rejects_out_of_bounds() {
        let err = Board::from_mine_coordinates(2, 2, &[Coordinate::new(2, 0)]).unwrap_err();

        assert_eq!(err, GameError::CellOutOfBounds { x: 2, y: 0 });
    }

    #[test]
    fn from_mine_coordinates_places_each_site_once() {
        let mines = [Coordinate::new(1, 0), Coordinate::new(1, 0), Coordinate::new(0, 1)];
        let board = Board::from_mine_coordinates(2, 2, &mines).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(
            board.mine_coordinates(),
            vec![Coordinate::new(1, 0), Coordinate::new(0, 1)]
        );
    }

    #[test]
    fn get_outside_board_is_none() {
        let board = Board::empty(2, 2);

        assert!(board.get(Coordinate::new(0, 2)).is_none());
        assert!(board.get(Coordinate::new(1, 1)).is_some());
    }
}
