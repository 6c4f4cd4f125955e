use std::sync::{Arc, Mutex};

use super::board::Board;
use super::settings::TicTacToeSettings;
use super::types::{GameStatus, Player, WinningLine};

/// Immutable copy of everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub settings: TicTacToeSettings,
    pub current_player: Player,
    pub status: GameStatus,
    pub winning_line: Option<WinningLine>,
    pub last_move: Option<usize>,
    pub message: String,
}

/// Renderers attach to a session and are pushed a snapshot after every state
/// change. They never mutate the game.
pub trait GameObserver {
    fn on_state_changed(&mut self, snapshot: &GameSnapshot);
}

/// Renderer without output; keeps every frame for later inspection.
#[derive(Clone, Default)]
pub struct HeadlessRenderer {
    frames: Arc<Mutex<Vec<GameSnapshot>>>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<GameSnapshot> {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last_frame(&self) -> Option<GameSnapshot> {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }
}

impl GameObserver for HeadlessRenderer {
    fn on_state_changed(&mut self, snapshot: &GameSnapshot) {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(snapshot.clone());
    }
}
