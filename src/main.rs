//! Console dots-and-boxes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use dots_boxes::core::GameRngState;
use dots_boxes::game::Game;
use dots_boxes::persist;
use dots_boxes::session::{
    Agent, RandomAgent, Seats, Session, SessionKind, SessionOutcome,
};
use dots_boxes::view::{ConsoleAgent, ConsoleView};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Humans on every seat.
    Pvp,
    /// One human against the computer.
    Pve,
}

#[derive(Parser, Debug)]
#[command(name = "dots-boxes", about = "Dots and boxes on the console")]
struct Cli {
    /// Board width in dots
    #[arg(long, default_value_t = 5)]
    width: i32,

    /// Board height in dots
    #[arg(long, default_value_t = 5)]
    height: i32,

    /// Who plays
    #[arg(long, value_enum, default_value_t = Mode::Pvp)]
    mode: Mode,

    /// Player name; repeat once per seat (PvE uses only the first)
    #[arg(long = "player", value_name = "NAME")]
    players: Vec<String>,

    /// Seed for the computer opponent (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory save files are written to
    #[arg(long, default_value = "saves")]
    save_dir: PathBuf,

    /// Resume a previously saved session
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(%message, "session failed");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut view = ConsoleView::new();
    let mut resume = match &cli.load {
        Some(path) => Some(persist::load(path).map_err(|err| err.to_string())?),
        None => None,
    };

    loop {
        let (kind, game, rng) = match resume.take() {
            Some(saved) => {
                let game = saved.restore_game().map_err(|err| err.to_string())?;
                (saved.kind, game, saved.rng)
            }
            None => {
                let kind = match cli.mode {
                    Mode::Pvp => SessionKind::PvP,
                    Mode::Pve => SessionKind::PvE,
                };
                (kind, new_game(&cli, kind)?, None)
            }
        };

        let mut seats = build_seats(kind, game.roster().len(), rng, cli.seed);
        let outcome = Session::new(kind, game)
            .save_dir(&cli.save_dir)
            .run(&mut seats, &mut view)
            .map_err(|err| err.to_string())?;

        match outcome {
            SessionOutcome::Completed { .. } if view.prompt_rematch() => continue,
            _ => return Ok(()),
        }
    }
}

fn new_game(cli: &Cli, kind: SessionKind) -> Result<Game, String> {
    let names = match kind {
        SessionKind::PvP => {
            if cli.players.len() >= 2 {
                cli.players.clone()
            } else {
                vec!["Player 1".to_string(), "Player 2".to_string()]
            }
        }
        SessionKind::PvE => {
            let human = cli
                .players
                .first()
                .cloned()
                .unwrap_or_else(|| "Player 1".to_string());
            vec![human, "CPU".to_string()]
        }
    };
    Game::new(cli.width, cli.height, names).map_err(|err| err.to_string())
}

fn build_seats(
    kind: SessionKind,
    seat_count: usize,
    rng: Option<GameRngState>,
    seed: Option<u64>,
) -> Seats {
    match kind {
        SessionKind::PvP => Seats::new(
            (0..seat_count)
                .map(|_| Box::new(ConsoleAgent::new()) as Box<dyn Agent>)
                .collect(),
        ),
        SessionKind::PvE => {
            let opponent = match rng {
                Some(state) => RandomAgent::from_state(&state),
                None => RandomAgent::new(seed.unwrap_or_else(rand::random)),
            };
            Seats::new(vec![
                Box::new(ConsoleAgent::new()) as Box<dyn Agent>,
                Box::new(opponent),
            ])
        }
    }
}
