use crate::config::Validate;
use crate::games::SessionRng;
use super::board::{Board, is_valid_move};
use super::bot_controller::{BotInput, calculate_move};
use super::observer::{GameObserver, GameSnapshot};
use super::settings::TicTacToeSettings;
use super::types::{GameStatus, Player, WinningLine};
use super::win_detector::check_win_with_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfBounds,
    CellOccupied,
    GameOver,
    NotYourTurn,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRejection::OutOfBounds => write!(f, "Position out of bounds"),
            MoveRejection::CellOccupied => write!(f, "Cell is already marked"),
            MoveRejection::GameOver => write!(f, "Game is already over"),
            MoveRejection::NotYourTurn => write!(f, "Not your turn"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied { computer_move: Option<usize> },
    Rejected(MoveRejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub status: GameStatus,
    pub outcome: MoveOutcome,
}

/// Authoritative state of one session. Only `apply_move` and `restart`
/// change it.
pub struct TicTacToeGameState {
    board: Board,
    settings: TicTacToeSettings,
    current_player: Player,
    status: GameStatus,
    winning_line: Option<WinningLine>,
    last_move: Option<usize>,
    rng: SessionRng,
    observers: Vec<Box<dyn GameObserver>>,
}

impl TicTacToeGameState {
    pub fn new(settings: TicTacToeSettings, rng: SessionRng) -> Result<Self, String> {
        settings.validate()?;
        let board = Board::new(settings.size)?;

        crate::log!(
            "Starting {}x{} game, mode {}, difficulty {}, seed {}",
            settings.size,
            settings.size,
            settings.mode,
            settings.difficulty,
            rng.seed()
        );

        Ok(Self {
            board,
            settings,
            current_player: Player::X,
            status: GameStatus::InProgress,
            winning_line: None,
            last_move: None,
            rng,
            observers: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &TicTacToeSettings {
        &self.settings
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn get_winner(&self) -> Option<Player> {
        self.status.winner()
    }

    pub fn is_computer_turn(&self) -> bool {
        self.settings.computer_player() == Some(self.current_player)
    }

    pub fn status_message(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!("Player {}'s turn", self.current_player),
            GameStatus::XWon | GameStatus::OWon => match self.status.winner() {
                Some(winner) => format!("Player {} wins!", winner),
                None => String::new(),
            },
            GameStatus::Draw => "It's a draw!".to_string(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            settings: self.settings,
            current_player: self.current_player,
            status: self.status,
            winning_line: self.winning_line,
            last_move: self.last_move,
            message: self.status_message(),
        }
    }

    /// Attaches a renderer and immediately pushes the current state to it.
    pub fn add_observer(&mut self, mut observer: Box<dyn GameObserver>) {
        observer.on_state_changed(&self.snapshot());
        self.observers.push(observer);
    }

    /// Places the current player's mark at `index`. In vs-computer mode the
    /// computer's reply is played before returning. Rejected moves leave the
    /// state untouched.
    pub fn apply_move(&mut self, index: usize) -> MoveResult {
        if let Err(rejection) = self.validate_human_move(index) {
            crate::log!("Rejected move at {}: {}", index, rejection);
            return self.result(MoveOutcome::Rejected(rejection));
        }

        self.place_mark(index);
        let computer_move = self.play_computer_turn();

        self.result(MoveOutcome::Applied { computer_move })
    }

    pub fn restart(&mut self) {
        self.board.reset();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        self.last_move = None;

        crate::log!("Game restarted");
        self.notify_observers();
    }

    fn validate_human_move(&self, index: usize) -> Result<(), MoveRejection> {
        if self.status.is_over() {
            return Err(MoveRejection::GameOver);
        }
        if self.is_computer_turn() {
            return Err(MoveRejection::NotYourTurn);
        }
        if index >= self.board.len() {
            return Err(MoveRejection::OutOfBounds);
        }
        if !is_valid_move(&self.board, index) {
            return Err(MoveRejection::CellOccupied);
        }
        Ok(())
    }

    fn play_computer_turn(&mut self) -> Option<usize> {
        if self.status.is_over() || !self.is_computer_turn() {
            return None;
        }

        let input = BotInput::from_game_state(self);
        let index = calculate_move(self.settings.difficulty, &input, &mut self.rng)?;

        crate::log!(
            "Computer ({}) plays {} on {} difficulty",
            self.current_player,
            index,
            self.settings.difficulty
        );
        self.place_mark(index);
        Some(index)
    }

    fn place_mark(&mut self, index: usize) {
        self.board.place(index, self.current_player);
        self.last_move = Some(index);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        self.notify_observers();
    }

    fn switch_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    fn check_game_over(&mut self) {
        if let Some(line) = check_win_with_line(&self.board) {
            self.status = GameStatus::won_by(line.player);
            self.winning_line = Some(line);
            crate::log!("Player {} wins with {:?}", line.player, line.cells);
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
            crate::log!("Game ended in a draw");
        }
    }

    fn notify_observers(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_state_changed(&snapshot);
        }
    }

    fn result(&self, outcome: MoveOutcome) -> MoveResult {
        MoveResult {
            board: self.board.clone(),
            status: self.status,
            outcome,
        }
    }
}

impl std::fmt::Debug for TicTacToeGameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicTacToeGameState")
            .field("board", &self.board)
            .field("settings", &self.settings)
            .field("current_player", &self.current_player)
            .field("status", &self.status)
            .field("winning_line", &self.winning_line)
            .field("last_move", &self.last_move)
            .field("observers", &self.observers.len())
            .finish()
    }
}
