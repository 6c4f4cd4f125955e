use std::fmt::Write;

use common::games::tictactoe::{GameObserver, GameSnapshot, Mark, Position};
use common::leaderboard::LeaderboardEntry;

/// Prints every frame to stdout.
pub struct TextRenderer;

impl GameObserver for TextRenderer {
    fn on_state_changed(&mut self, snapshot: &GameSnapshot) {
        print!("{}", render_frame(snapshot));
    }
}

/// Board with row and column labels; the winning run is bracketed.
pub fn render_frame(snapshot: &GameSnapshot) -> String {
    let board = &snapshot.board;
    let size = board.size();
    let mut frame = String::new();

    frame.push_str("\n   ");
    for col in 0..size {
        let _ = write!(frame, "{:^3}", col);
    }
    frame.push('\n');

    for row in 0..size {
        let _ = write!(frame, "{:>2} ", row);
        for col in 0..size {
            let index = Position::new(row, col).to_index(size);
            let symbol = match board.get(index) {
                Some(Mark::X) => 'X',
                Some(Mark::O) => 'O',
                _ => '.',
            };
            let highlighted = snapshot
                .winning_line
                .is_some_and(|line| line.contains(index));
            if highlighted {
                let _ = write!(frame, "[{}]", symbol);
            } else {
                let _ = write!(frame, " {} ", symbol);
            }
        }
        frame.push('\n');
    }

    if let Some(index) = snapshot.last_move {
        let position = Position::from_index(index, size);
        let _ = writeln!(frame, "Last move: {} {}", position.row, position.col);
    }
    frame.push_str(&snapshot.message);
    frame.push('\n');
    frame
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "Leaderboard is empty\n".to_string();
    }

    let mut text = String::from("Leaderboard:\n");
    for (rank, entry) in entries.iter().enumerate() {
        let _ = writeln!(text, "{:>2}. {:<3} {}", rank + 1, entry.initials, entry.wins);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::SessionRng;
    use common::games::tictactoe::{TicTacToeGameState, TicTacToeSettings};

    fn play(moves: &[usize]) -> TicTacToeGameState {
        let mut state =
            TicTacToeGameState::new(TicTacToeSettings::default(), SessionRng::new(1)).unwrap();
        for &index in moves {
            state.apply_move(index);
        }
        state
    }

    #[test]
    fn test_empty_board_frame() {
        let frame = render_frame(&play(&[]).snapshot());
        assert_eq!(
            frame,
            "\n    0  1  2 \n 0  .  .  . \n 1  .  .  . \n 2  .  .  . \nPlayer X's turn\n"
        );
    }

    #[test]
    fn test_winning_line_is_highlighted() {
        let frame = render_frame(&play(&[0, 3, 1, 4, 2]).snapshot());
        assert!(frame.contains(" 0 [X][X][X]\n"));
        assert!(frame.contains(" 1  O  O  . \n"));
        assert!(frame.contains("Last move: 0 2\n"));
        assert!(frame.ends_with("Player X wins!\n"));
    }

    #[test]
    fn test_leaderboard_text() {
        let entries = vec![
            LeaderboardEntry { initials: "AMY".to_string(), wins: 3 },
            LeaderboardEntry { initials: "BO".to_string(), wins: 1 },
        ];
        assert_eq!(
            render_leaderboard(&entries),
            "Leaderboard:\n 1. AMY 3\n 2. BO  1\n"
        );
        assert_eq!(render_leaderboard(&[]), "Leaderboard is empty\n");
    }
}
