use std::io::{self, BufRead, Write};

use common::games::tictactoe::{MoveOutcome, Position, TicTacToeGameState};
use common::leaderboard::{KeyValueStore, Leaderboard, LeaderboardError};
use common::log;

use crate::renderer::render_leaderboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Restart,
    Quit,
}

/// Accepts `q`, `r`, a cell index, or `row col` (both zero-based).
pub fn parse_command(line: &str, size: usize) -> Result<Command, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" => return Ok(Command::Quit),
        "r" | "restart" => return Ok(Command::Restart),
        _ => {}
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [index] => index
            .parse::<usize>()
            .map(Command::Place)
            .map_err(|_| format!("'{}' is not a cell index", index)),
        [row, col] => {
            let row = row
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a row", row))?;
            let col = col
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a column", col))?;
            if row >= size || col >= size {
                return Err(format!("Row and column must be below {}", size));
            }
            Ok(Command::Place(Position::new(row, col).to_index(size)))
        }
        _ => Err("Enter a cell index, 'row col', 'r' to restart or 'q' to quit".to_string()),
    }
}

/// Reads commands until `q` or end of input. Board frames come from the
/// observers attached to `state`; prompts and errors go to `output`.
pub fn run_tictactoe_game<S, R, W>(
    state: &mut TicTacToeGameState,
    leaderboard: &Leaderboard<S>,
    mut input: R,
    mut output: W,
) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    log!("Starting game: {}", state.settings().to_query());

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line, state.board().size()) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{}", message)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Restart => state.restart(),
            Command::Place(index) => {
                let result = state.apply_move(index);
                if let MoveOutcome::Rejected(rejection) = result.outcome {
                    writeln!(output, "{}", rejection)?;
                    continue;
                }
                if result.status.is_over() {
                    finish_game(state, leaderboard, &mut input, &mut output)?;
                }
            }
        }
    }

    log!("Leaving game");
    Ok(())
}

fn finish_game<S, R, W>(
    state: &TicTacToeGameState,
    leaderboard: &Leaderboard<S>,
    input: &mut R,
    output: &mut W,
) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let human_winner = state
        .get_winner()
        .filter(|winner| state.settings().computer_player() != Some(*winner));

    if let Some(winner) = human_winner {
        write!(output, "Player {}, enter your initials: ", winner)?;
        output.flush()?;

        let mut initials = String::new();
        input.read_line(&mut initials)?;

        match leaderboard.record(&initials) {
            Ok(()) => {}
            Err(LeaderboardError::InvalidInitials(_)) => {
                writeln!(output, "No initials given, win not recorded")?;
            }
            Err(e) => {
                log!("Failed to record win: {}", e);
                writeln!(output, "Could not save the win: {}", e)?;
            }
        }
        write!(output, "{}", render_leaderboard(&leaderboard.read()))?;
    }

    writeln!(output, "Enter 'r' to play again or 'q' to quit")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::SessionRng;
    use common::games::tictactoe::{
        Difficulty, GameMode, GameStatus, HeadlessRenderer, TicTacToeSettings,
    };
    use common::leaderboard::{LeaderboardEntry, MemoryKeyValueStore};
    use std::io::Cursor;

    fn new_state(settings: TicTacToeSettings) -> (TicTacToeGameState, HeadlessRenderer) {
        let mut state = TicTacToeGameState::new(settings, SessionRng::new(3)).unwrap();
        let renderer = HeadlessRenderer::new();
        state.add_observer(Box::new(renderer.clone()));
        (state, renderer)
    }

    fn run(
        state: &mut TicTacToeGameState,
        leaderboard: &Leaderboard<MemoryKeyValueStore>,
        input: &str,
    ) -> String {
        let mut output = Vec::new();
        run_tictactoe_game(state, leaderboard, Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("q\n", 3), Ok(Command::Quit));
        assert_eq!(parse_command(" R ", 3), Ok(Command::Restart));
        assert_eq!(parse_command("4", 3), Ok(Command::Place(4)));
        assert_eq!(parse_command("1 2", 3), Ok(Command::Place(5)));
        assert_eq!(parse_command("2 0", 5), Ok(Command::Place(10)));
        assert!(parse_command("3 0", 3).is_err());
        assert!(parse_command("x", 3).is_err());
        assert!(parse_command("", 3).is_err());
        assert!(parse_command("1 2 3", 3).is_err());
    }

    #[test]
    fn test_win_records_initials() {
        let (mut state, renderer) = new_state(TicTacToeSettings::default());
        let leaderboard = Leaderboard::new(MemoryKeyValueStore::new());

        let output = run(&mut state, &leaderboard, "0\n3\n0 1\n4\n2\nabc\nq\n");

        assert_eq!(state.status(), GameStatus::XWon);
        assert_eq!(
            leaderboard.read(),
            vec![LeaderboardEntry { initials: "ABC".to_string(), wins: 1 }]
        );
        assert!(output.contains("Player X, enter your initials: "));
        assert!(output.contains(" 1. ABC 1\n"));
        assert_eq!(renderer.frames().len(), 6);
    }

    #[test]
    fn test_blank_initials_skip_recording() {
        let (mut state, _renderer) = new_state(TicTacToeSettings::default());
        let leaderboard = Leaderboard::new(MemoryKeyValueStore::new());

        let output = run(&mut state, &leaderboard, "0\n3\n1\n4\n2\n\n");

        assert!(leaderboard.read().is_empty());
        assert!(output.contains("Leaderboard is empty\n"));
    }

    #[test]
    fn test_rejected_moves_are_reported() {
        let (mut state, _renderer) = new_state(TicTacToeSettings::default());
        let leaderboard = Leaderboard::new(MemoryKeyValueStore::new());

        let output = run(&mut state, &leaderboard, "4\n4\n9\nhello\n");

        assert!(output.contains("Cell is already marked\n"));
        assert!(output.contains("Position out of bounds\n"));
        assert!(output.contains("'hello' is not a cell index\n"));
        assert_eq!(state.board().empty_count(), 8);
    }

    #[test]
    fn test_restart_clears_board() {
        let (mut state, renderer) = new_state(TicTacToeSettings::default());
        let leaderboard = Leaderboard::new(MemoryKeyValueStore::new());

        run(&mut state, &leaderboard, "4\n0\nr\n");

        assert!(state.board().has_no_marks());
        let last = renderer.last_frame().unwrap();
        assert!(last.board.has_no_marks());
        assert_eq!(last.message, "Player X's turn");
    }

    #[test]
    fn test_computer_replies_in_ai_mode() {
        let settings = TicTacToeSettings {
            mode: GameMode::Ai,
            difficulty: Difficulty::Hard,
            size: 3,
        };
        let (mut state, _renderer) = new_state(settings);
        let leaderboard = Leaderboard::new(MemoryKeyValueStore::new());

        run(&mut state, &leaderboard, "0\n");

        assert_eq!(state.board().empty_count(), 7);
        assert_eq!(state.last_move(), Some(4));
    }
}
