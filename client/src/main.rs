mod config;
mod renderer;
mod tictactoe_runner;

use clap::Parser;
use common::config::Validate;
use common::games::SessionRng;
use common::games::tictactoe::{Difficulty, GameMode, TicTacToeGameState, TicTacToeSettings};
use common::leaderboard::{FileKeyValueStore, Leaderboard};
use common::{log, logger};

use config::get_config_manager;
use renderer::{TextRenderer, render_leaderboard};
use tictactoe_runner::run_tictactoe_game;

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    /// friend or ai
    #[arg(long)]
    mode: Option<String>,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<String>,

    #[arg(long)]
    size: Option<usize>,

    /// Settings as a query string, e.g. `mode=ai&difficulty=hard&size=4`
    #[arg(long)]
    query: Option<String>,

    /// Print the leaderboard and exit
    #[arg(long)]
    leaderboard: bool,

    /// Path to the YAML config file
    #[arg(long)]
    config: Option<String>,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn resolve_settings(base: TicTacToeSettings, args: &Args) -> Result<TicTacToeSettings, String> {
    let mut settings = match &args.query {
        Some(query) => TicTacToeSettings::from_query(query),
        None => base,
    };

    if let Some(mode) = &args.mode {
        settings.mode =
            GameMode::parse(mode).ok_or_else(|| format!("Unknown mode '{}'", mode))?;
    }
    if let Some(difficulty) = &args.difficulty {
        settings.difficulty = Difficulty::parse(difficulty)
            .ok_or_else(|| format!("Unknown difficulty '{}'", difficulty))?;
    }
    if let Some(size) = args.size {
        settings.size = size;
    }

    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(args.config.as_deref());
    let config = match config_manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config, using defaults: {}", e);
            Default::default()
        }
    };

    let store = FileKeyValueStore::new(&config.leaderboard.location);
    log!("Leaderboard directory: {}", store.directory().display());
    let leaderboard = Leaderboard::new(store);
    if args.leaderboard {
        print!("{}", render_leaderboard(&leaderboard.read()));
        return Ok(());
    }

    let settings = resolve_settings(config.game, &args)?;
    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Session seed: {}", rng.seed());

    let mut state = TicTacToeGameState::new(settings, rng)?;
    println!("Enter a cell index or 'row col'; 'r' restarts, 'q' quits");
    state.add_observer(Box::new(TextRenderer));

    let stdin = std::io::stdin();
    run_tictactoe_game(&mut state, &leaderboard, stdin.lock(), std::io::stdout())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("tictactoe_client").chain(args.iter().copied()))
    }

    #[test]
    fn test_flags_override_config() {
        let base = TicTacToeSettings {
            mode: GameMode::Ai,
            difficulty: Difficulty::Medium,
            size: 4,
        };
        let settings = resolve_settings(base, &parse(&["--difficulty", "hard"])).unwrap();
        assert_eq!(settings.mode, GameMode::Ai);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.size, 4);
    }

    #[test]
    fn test_query_replaces_config_then_flags_apply() {
        let base = TicTacToeSettings {
            mode: GameMode::Ai,
            difficulty: Difficulty::Hard,
            size: 7,
        };
        let args = parse(&["--query", "size=5", "--mode", "ai"]);
        let settings = resolve_settings(base, &args).unwrap();
        assert_eq!(settings.mode, GameMode::Ai);
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.size, 5);
    }

    #[test]
    fn test_invalid_flags_are_errors() {
        let base = TicTacToeSettings::default();
        assert!(resolve_settings(base, &parse(&["--mode", "online"])).is_err());
        assert!(resolve_settings(base, &parse(&["--difficulty", "insane"])).is_err());
        assert!(resolve_settings(base, &parse(&["--size", "2"])).is_err());
    }
}
