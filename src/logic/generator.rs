use rand::Rng;
use tracing::debug;

use crate::{
    data::{Board, Coordinate},
    error::Result,
    model::GameParams,
};

/// Places `params.mines` mines uniformly at random, never on `excluded`.
///
/// Sparse boards use rejection sampling. Once the mines would fill more than
/// half of the free cells, placement switches to selection sampling, which
/// makes a single pass over the board and always terminates.
pub fn generate<R: Rng + ?Sized>(
    params: &GameParams,
    excluded: Coordinate,
    rng: &mut R,
) -> Result<Board> {
    params.validate()?;

    let mut board = Board::empty(params.rows, params.columns);
    board.validate(excluded)?;

    let free_cells = board.total_cells() - 1;
    if params.mines * 2 <= free_cells {
        debug!("Placing {} mines by rejection sampling", params.mines);
        place_by_rejection(&mut board, params.mines, excluded, rng);
    } else {
        debug!("Placing {} mines by selection sampling", params.mines);
        place_by_selection(&mut board, params.mines, excluded, rng);
    }

    Ok(board)
}

fn place_by_rejection<R: Rng + ?Sized>(
    board: &mut Board,
    mines: usize,
    excluded: Coordinate,
    rng: &mut R,
) {
    let mut placed = 0;
    while placed < mines {
        let candidate = Coordinate::new(
            rng.random_range(0..board.columns()),
            rng.random_range(0..board.rows()),
        );

        if candidate == excluded || board[candidate].has_mine() {
            continue;
        }

        board.place_mine(candidate);
        placed += 1;
    }
}

fn place_by_selection<R: Rng + ?Sized>(
    board: &mut Board,
    mines: usize,
    excluded: Coordinate,
    rng: &mut R,
) {
    let candidates: Vec<Coordinate> = board
        .cells()
        .map(|cell| cell.coordinate())
        .filter(|&coordinate| coordinate != excluded)
        .collect();

    let mut mines_left = mines;
    let mut cells_left = candidates.len();
    for coordinate in candidates {
        if mines_left == 0 {
            break;
        }
        if rng.random_range(0..cells_left) < mines_left {
            board.place_mine(coordinate);
            mines_left -= 1;
        }
        cells_left -= 1;
    }
}
