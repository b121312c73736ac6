use anyhow::{Context, Result};
use clap::Parser;
use hiro_snake::game::GameConfig;
use hiro_snake::logging;
use hiro_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hiro_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Start paused instead of moving right away
    #[arg(long)]
    paused: bool,

    /// Append diagnostic logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective settings as JSON to this path and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then command line flags; the
    /// merged result is validated once at the end
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.grid_width);
            let height = self.height.unwrap_or(config.grid_height);
            config = config.with_grid(width, height);
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }

    let config = cli.game_config()?;

    if let Some(path) = &cli.dump_config {
        config.save(path)?;
        return Ok(());
    }

    let mut human_mode = HumanMode::new(config);
    if cli.paused {
        human_mode = human_mode.start_paused();
    }
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("hiro_snake").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).game_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&["--width", "12", "--tick-ms", "90", "--seed", "5"])
            .game_config()
            .unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 18);
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 20, "food_score": 5 }"#).unwrap();

        let config = parse(&["--config", path.to_str().unwrap(), "--height", "9"])
            .game_config()
            .unwrap();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 9);
        assert_eq!(config.food_score, 5);
        assert_eq!((config.start_x, config.start_y), (10, 4));
    }

    #[test]
    fn test_flags_repair_invalid_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_height": 0 }"#).unwrap();
        let path = path.to_str().unwrap();

        assert!(parse(&["--config", path]).game_config().is_err());

        let config = parse(&["--config", path, "--height", "9"])
            .game_config()
            .unwrap();
        assert_eq!(config.grid_height, 9);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        assert!(parse(&["--width", "3000000000"]).game_config().is_err());
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        assert!(parse(&["--tick-ms", "0"]).game_config().is_err());
        assert!(parse(&["--width", "1", "--height", "1"]).game_config().is_err());
    }
}
