use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use snake::game::{Flow, SnakeGame};
use snake::{BoardFullPolicy, GameConfig};

/// Terminal snake on a wrap-around square field.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// YAML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side of the square field, in cells
    #[arg(long)]
    field_size: Option<u16>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// What happens when the snake fills the board
    #[arg(long, value_enum)]
    on_board_full: Option<BoardFullPolicy>,

    /// The terminal is the game screen, so logs go to a file
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Print the effective config as YAML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_yaml_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(field_size) = self.field_size {
            config.field_size = field_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(policy) = self.on_board_full {
            config.on_board_full = policy;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", cli.game_config()?.to_yaml()?);
        return Ok(());
    }

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file).context("installing logger")?;

    let config = cli.game_config()?;
    info!("starting with {:?}", config);

    let mut game = SnakeGame::new(config)?;
    game.initialize()?;

    let result = run(&mut game);
    game.restore()?;
    result
}

fn run(game: &mut SnakeGame) -> Result<()> {
    if game.show_intro()? == Flow::Quit {
        return Ok(());
    }

    // Each round builds a fresh engine; quitting is the only way out
    while game.play()? == Flow::Continue {}

    info!("bye");
    Ok(())
}
