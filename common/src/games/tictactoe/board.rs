use std::fmt;

use super::types::{Mark, Player, Position, WIN_LENGTH};

pub const MIN_BOARD_SIZE: usize = WIN_LENGTH;
pub const MAX_BOARD_SIZE: usize = 20;

/// Square board stored row-major: `index = row * size + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Mark>,
    size: usize,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, String> {
        validate_size(size)?;
        Ok(Self {
            cells: vec![Mark::Empty; size * size],
            size,
        })
    }

    pub fn from_cells(cells: Vec<Mark>, size: usize) -> Result<Self, String> {
        validate_size(size)?;
        if cells.len() != size * size {
            return Err(format!(
                "Board of size {} needs {} cells, got {}",
                size,
                size * size,
                cells.len()
            ));
        }
        Ok(Self { cells, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn has_no_marks(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn at(&self, position: Position) -> Option<Mark> {
        if position.row >= self.size || position.col >= self.size {
            return None;
        }
        self.get(position.to_index(self.size))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    pub(crate) fn place(&mut self, index: usize, player: Player) {
        self.cells[index] = player.mark();
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Mark::Empty;
    }

    pub(crate) fn reset(&mut self) {
        self.cells.fill(Mark::Empty);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Mark::X => 'X',
                    Mark::O => 'O',
                    Mark::Empty => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn validate_size(size: usize) -> Result<(), String> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(format!(
            "Board size must be between {} and {}, got {}",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE, size
        ));
    }
    Ok(())
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(index, _)| index)
        .collect()
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    board.get(index) == Some(Mark::Empty)
}

#[cfg(test)]
pub(crate) fn board_from_str(size: usize, layout: &str) -> Board {
    let cells: Vec<Mark> = layout
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'X' => Mark::X,
            'O' => Mark::O,
            _ => Mark::Empty,
        })
        .collect();
    Board::from_cells(cells, size).unwrap()
}
