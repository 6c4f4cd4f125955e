use super::board::Board;
use super::types::{Player, WIN_LENGTH, WinningLine};

pub fn check_win(board: &Board) -> Option<Player> {
    check_win_with_line(board).map(|line| line.player)
}

/// Scans rows, then columns, then down-right diagonals, then down-left
/// diagonals, each in row-major start order, and returns the first run.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    check_horizontal(board)
        .or_else(|| check_vertical(board))
        .or_else(|| check_diagonal_down_right(board))
        .or_else(|| check_diagonal_down_left(board))
}

fn check_horizontal(board: &Board) -> Option<WinningLine> {
    let size = board.size();
    for row in 0..size {
        for col in 0..=size - WIN_LENGTH {
            if let Some(line) = check_run(board, row * size + col, 1) {
                return Some(line);
            }
        }
    }
    None
}

fn check_vertical(board: &Board) -> Option<WinningLine> {
    let size = board.size();
    for col in 0..size {
        for row in 0..=size - WIN_LENGTH {
            if let Some(line) = check_run(board, row * size + col, size) {
                return Some(line);
            }
        }
    }
    None
}

fn check_diagonal_down_right(board: &Board) -> Option<WinningLine> {
    let size = board.size();
    for row in 0..=size - WIN_LENGTH {
        for col in 0..=size - WIN_LENGTH {
            if let Some(line) = check_run(board, row * size + col, size + 1) {
                return Some(line);
            }
        }
    }
    None
}

fn check_diagonal_down_left(board: &Board) -> Option<WinningLine> {
    let size = board.size();
    for row in 0..=size - WIN_LENGTH {
        for col in WIN_LENGTH - 1..size {
            if let Some(line) = check_run(board, row * size + col, size - 1) {
                return Some(line);
            }
        }
    }
    None
}

// Callers only pass starts whose whole run stays on the board.
fn check_run(board: &Board, start: usize, step: usize) -> Option<WinningLine> {
    let cells = board.cells();
    let player = cells[start].player()?;

    let mut run = [start; WIN_LENGTH];
    for (i, slot) in run.iter_mut().enumerate().skip(1) {
        let index = start + i * step;
        if cells[index] != cells[start] {
            return None;
        }
        *slot = index;
    }

    Some(WinningLine::new(player, run, board.size()))
}
