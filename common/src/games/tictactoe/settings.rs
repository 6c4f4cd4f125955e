use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use super::types::{Difficulty, GameMode, Player};

pub const DEFAULT_BOARD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub size: usize,
}

impl Default for TicTacToeSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::Friend,
            difficulty: Difficulty::Easy,
            size: DEFAULT_BOARD_SIZE,
        }
    }
}

impl TicTacToeSettings {
    /// Parses `mode=ai&difficulty=hard&size=4`. Unknown keys are ignored and
    /// unrecognised values fall back to the defaults.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.trim().trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key.trim() {
                "mode" => match GameMode::parse(value) {
                    Some(mode) => settings.mode = mode,
                    None => crate::log!("Unknown mode '{}', using {}", value, settings.mode),
                },
                "difficulty" => match Difficulty::parse(value) {
                    Some(difficulty) => settings.difficulty = difficulty,
                    None => crate::log!(
                        "Unknown difficulty '{}', using {}",
                        value,
                        settings.difficulty
                    ),
                },
                "size" => match parse_size(value) {
                    Some(size) => settings.size = size,
                    None => crate::log!("Invalid size '{}', using {}", value, settings.size),
                },
                _ => {}
            }
        }

        settings
    }

    pub fn to_query(&self) -> String {
        format!(
            "mode={}&difficulty={}&size={}",
            self.mode, self.difficulty, self.size
        )
    }

    /// The computer always takes the second seat.
    pub fn computer_player(&self) -> Option<Player> {
        match self.mode {
            GameMode::Ai => Some(Player::O),
            GameMode::Friend => None,
        }
    }
}

fn parse_size(value: &str) -> Option<usize> {
    let size = value.trim().parse::<usize>().ok()?;
    (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size).then_some(size)
}

impl Validate for TicTacToeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.size < MIN_BOARD_SIZE {
            return Err(format!(
                "Board size must be at least {}, got {}",
                MIN_BOARD_SIZE, self.size
            ));
        }
        if self.size > MAX_BOARD_SIZE {
            return Err(format!(
                "Board size must not exceed {}, got {}",
                MAX_BOARD_SIZE, self.size
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_query() {
        let settings = TicTacToeSettings::from_query("?mode=ai&difficulty=hard&size=5");
        assert_eq!(settings.mode, GameMode::Ai);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.size, 5);
        assert_eq!(settings.computer_player(), Some(Player::O));
    }

    #[test]
    fn test_missing_values_use_defaults() {
        assert_eq!(TicTacToeSettings::from_query(""), TicTacToeSettings::default());
        assert_eq!(
            TicTacToeSettings::from_query("mode=friend"),
            TicTacToeSettings::default()
        );
    }

    #[test]
    fn test_unrecognised_values_use_defaults() {
        let settings = TicTacToeSettings::from_query("mode=online&difficulty=insane&size=two");
        assert_eq!(settings, TicTacToeSettings::default());

        let settings = TicTacToeSettings::from_query("size=2");
        assert_eq!(settings.size, DEFAULT_BOARD_SIZE);

        let settings = TicTacToeSettings::from_query("size=-4&theme=dark&mode");
        assert_eq!(settings, TicTacToeSettings::default());
    }

    #[test]
    fn test_query_round_trip() {
        let settings = TicTacToeSettings {
            mode: GameMode::Ai,
            difficulty: Difficulty::Medium,
            size: 4,
        };
        assert_eq!(TicTacToeSettings::from_query(&settings.to_query()), settings);
    }

    #[test]
    fn test_validate_size_bounds() {
        let mut settings = TicTacToeSettings::default();
        assert!(settings.validate().is_ok());
        settings.size = 2;
        assert!(settings.validate().is_err());
        settings.size = MAX_BOARD_SIZE + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_friend_mode_has_no_computer() {
        assert_eq!(TicTacToeSettings::default().computer_player(), None);
    }
}
