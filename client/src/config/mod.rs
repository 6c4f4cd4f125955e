mod config;
mod leaderboard_config;

pub use config::{get_config_manager, Config};
pub use leaderboard_config::LeaderboardConfig;
