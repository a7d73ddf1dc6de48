use crate::data::{Board, Coordinate};

/// Stores the adjacent mine count on every cell without a mine.
///
/// Counts depend only on the mine layout, so running this again after cells
/// have been uncovered changes nothing.
pub fn annotate(board: &mut Board) {
    let counts: Vec<Option<u8>> = board
        .cells()
        .map(|cell| (!cell.has_mine()).then(|| count_adjacent_mines(board, cell.coordinate())))
        .collect();

    for (cell, count) in board.cells_mut().zip(counts) {
        if let Some(count) = count {
            cell.set_mines_around(count);
        }
    }
}

pub fn count_adjacent_mines(board: &Board, coordinate: Coordinate) -> u8 {
    board
        .neighbors(coordinate)
        .filter(|&neighbor| board[neighbor].has_mine())
        .fold(0, |count, _| count + 1)
}
