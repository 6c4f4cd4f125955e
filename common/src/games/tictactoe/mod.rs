mod board;
mod bot_controller;
mod game_state;
mod observer;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, MAX_BOARD_SIZE, MIN_BOARD_SIZE, get_available_moves, is_valid_move};
pub use bot_controller::{BotInput, NODE_BUDGET, calculate_minimax_move, calculate_move};
pub use game_state::{MoveOutcome, MoveRejection, MoveResult, TicTacToeGameState};
pub use observer::{GameObserver, GameSnapshot, HeadlessRenderer};
pub use settings::{DEFAULT_BOARD_SIZE, TicTacToeSettings};
pub use types::{Difficulty, GameMode, GameStatus, Mark, Player, Position, WIN_LENGTH, WinningLine};
pub use win_detector::{check_win, check_win_with_line};
