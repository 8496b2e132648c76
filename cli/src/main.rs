use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tilelink_core::{Board, GameConfig, Path, PlayEngine, SelectOutcome};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use command::{Command, HELP};
use feedback::TerminalFeedback;
use session::GameSession;
use settings::Settings;
use view::BoardView;

mod command;
mod feedback;
mod session;
mod settings;
mod view;

#[derive(Parser, Debug)]
#[command(version, about = "Match pairs of tiles joined by a path with at most two bends", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play a fixed layout instead of a dealt board
    #[arg(short, long, conflicts_with_all = ["rows", "cols", "symbols"])]
    layout: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board rows, border included
    #[arg(long)]
    rows: Option<u8>,

    /// Board columns, border included
    #[arg(long)]
    cols: Option<u8>,

    /// Number of distinct tile faces
    #[arg(long)]
    symbols: Option<u8>,
}

impl Args {
    fn game_config(&self, base: GameConfig) -> anyhow::Result<GameConfig> {
        let config = GameConfig {
            rows: self.rows.unwrap_or(base.rows),
            cols: self.cols.unwrap_or(base.cols),
            symbols: self.symbols.unwrap_or(base.symbols),
            ..base
        };
        config.validate().context("invalid board configuration")?;
        Ok(config)
    }
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Where new games come from.
enum Source {
    Dealt(GameConfig),
    Layout(Board),
}

impl Source {
    fn start(&self, seed: u64) -> anyhow::Result<GameSession> {
        let engine = match self {
            Self::Dealt(config) => PlayEngine::new(*config, seed)?,
            Self::Layout(board) => PlayEngine::from_board(board.clone(), seed)?,
        };
        log::info!("New game with seed {}", seed);
        Ok(GameSession::new(engine, Utc::now()))
    }
}

fn render(session: &GameSession, path: Option<&Path>) {
    let elapsed = session.elapsed_secs(Utc::now());
    println!("{}", BoardView::new(&session.engine.snapshot(), path, elapsed));
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let settings = Settings::load(args.config.as_deref())?;
    let source = match &args.layout {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read layout from {}", path.display()))?;
            let board = text
                .parse()
                .with_context(|| format!("invalid layout in {}", path.display()))?;
            Source::Layout(board)
        }
        None => Source::Dealt(args.game_config(settings.game)?),
    };

    let mut session = source.start(args.seed.unwrap_or_else(rand::random))?;
    let mut feedback = TerminalFeedback::new(settings.bell);

    println!("{HELP}\n");
    render(&session, None);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };

        match command {
            Command::Select(coords) => {
                let reshuffles = session.engine.reshuffle_count();
                let outcome = session.select(coords, Utc::now());
                outcome.notify(&mut feedback);
                if session.engine.reshuffle_count() != reshuffles {
                    println!("No moves left, tiles reshuffled.");
                }
                match &outcome {
                    SelectOutcome::Ignored => println!("Nothing to select at {coords:?}."),
                    SelectOutcome::Pending | SelectOutcome::Mismatched => render(&session, None),
                    SelectOutcome::Matched(path) => render(&session, Some(path)),
                }
            }
            Command::Hint => match session.engine.hint() {
                Some((first, second)) => println!("Try {first:?} and {second:?}."),
                None => println!("No pair available."),
            },
            Command::NewGame => {
                session = source.start(rand::random())?;
                render(&session, None);
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}
