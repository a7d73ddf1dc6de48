use std::collections::VecDeque;

use crate::data::{Board, Cell, Coordinate};

/// Uncovers `origin` and floods outward across empty cells.
///
/// Returns every cell that went from covered to uncovered during this call,
/// each exactly once, starting with `origin`. An origin that is already
/// uncovered, or lies outside the board, yields nothing. Numbered cells and
/// mines are uncovered but never expanded. The caller owns the session
/// counters and the defeat check.
pub fn uncover(board: &mut Board, origin: Coordinate) -> Vec<Cell> {
    let mut uncovered = Vec::new();
    let mut pending = VecDeque::from([origin]);

    while let Some(coordinate) = pending.pop_front() {
        let Some(cell) = board.get_mut(coordinate) else {
            continue;
        };

        if !cell.uncover() {
            continue;
        }

        let cell = *cell;
        uncovered.push(cell);

        if cell.opens_neighbors() {
            pending.extend(
                board
                    .neighbors(coordinate)
                    .filter(|&neighbor| !board[neighbor].is_uncovered()),
            );
        }
    }

    uncovered
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{data::CellState, logic::counter::annotate};

    fn board_with_mines(rows: usize, columns: usize, mines: &[(usize, usize)]) -> Board {
        let mines: Vec<Coordinate> = mines.iter().map(|&pos| pos.into()).collect();
        let mut board = Board::from_mine_coordinates(rows, columns, &mines).unwrap();
        annotate(&mut board);
        board
    }

    #[test]
    fn numbered_cell_stops_propagation() {
        let mut board = board_with_mines(3, 3, &[(2, 0), (0, 2)]);

        let cells = uncover(&mut board, Coordinate::new(1, 1));

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].coordinate(), Coordinate::new(1, 1));
        assert_eq!(cells[0].mines_around(), Some(2));
        assert_eq!(cells[0].state(), CellState::Uncovered);
    }

    #[test]
    fn empty_region_floods_up_to_numbered_border() {
        let mut board = board_with_mines(3, 3, &[(2, 2)]);

        let cells = uncover(&mut board, Coordinate::new(0, 0));

        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|cell| !cell.has_mine()));
        assert!(!board[Coordinate::new(2, 2)].is_uncovered());
    }

    #[test]
    fn flood_stops_at_wall_of_numbers() {
        // Column of mines at x = 2 splits the board in two.
        let mut board = board_with_mines(4, 5, &[(2, 0), (2, 1), (2, 2), (2, 3)]);

        let cells = uncover(&mut board, Coordinate::new(0, 0));
        let revealed: HashSet<Coordinate> = cells.iter().map(Cell::coordinate).collect();

        assert_eq!(revealed.len(), 8);
        assert!(revealed.iter().all(|pos| pos.x < 2));
        assert!(!board[Coordinate::new(4, 0)].is_uncovered());
    }

    #[test]
    fn already_uncovered_origin_is_a_no_op() {
        let mut board = board_with_mines(3, 3, &[(2, 2)]);
        uncover(&mut board, Coordinate::new(0, 0));
        let before = board.clone();

        let cells = uncover(&mut board, Coordinate::new(0, 0));

        assert!(cells.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn mine_is_uncovered_without_propagation() {
        let mut board = board_with_mines(3, 3, &[(1, 1)]);

        let cells = uncover(&mut board, Coordinate::new(1, 1));

        assert_eq!(cells.len(), 1);
        assert!(cells[0].has_mine());
        assert_eq!(board.cells().filter(|cell| cell.is_uncovered()).count(), 1);
    }

    #[test]
    fn large_empty_board_visits_each_cell_once() {
        let mut board = board_with_mines(300, 300, &[]);

        let cells = uncover(&mut board, Coordinate::new(150, 150));
        let distinct: HashSet<Coordinate> = cells.iter().map(Cell::coordinate).collect();

        assert_eq!(cells.len(), 90_000);
        assert_eq!(distinct.len(), cells.len());
    }

    #[test]
    fn outside_origin_yields_nothing() {
        let mut board = board_with_mines(2, 2, &[]);

        assert!(uncover(&mut board, Coordinate::new(5, 5)).is_empty());
    }
}
