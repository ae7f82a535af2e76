//! The session loop: one engine actor, one presentation actor.
//!
//! `Session::run` spawns the engine actor on its own thread and runs the
//! presentation loop on the calling thread, which is where blocking human
//! input belongs. All `Game` mutation happens on the engine thread; the
//! presentation side only ever sees immutable snapshots and produces one
//! candidate per handshake.

use std::path::PathBuf;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{Edge, GameRngState, MoveError, Player, SessionError};
use crate::game::{Game, GameSnapshot};
use crate::persist::{self, SavedSession};

use super::agent::Agent;
use super::handoff::{turn_channel, EnginePort, PresentationPort, TurnRequest, TurnSignal};

/// The kind of session being played. Save files carry this tag explicitly;
/// restoring never resolves a type by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    /// Every seat is human.
    PvP,
    /// One human seat, one computer seat.
    PvE,
}

/// How a session ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    /// The board filled up; the game has winners.
    Completed { winners: Vec<Player> },
    /// A player quit before the board was full.
    QuitEarly,
}

/// Presentation hooks invoked by the session loop.
///
/// Every hook defaults to a no-op so tests can observe only what they care
/// about. The console front end implements all of them.
pub trait Frontend {
    /// A stable state to draw. Called once per handshake.
    fn render(&mut self, _snapshot: &GameSnapshot) {}

    /// The previous candidate was refused; the same turn will be prompted
    /// again.
    fn move_rejected(&mut self, _attempted: &Edge, _reason: &MoveError) {}

    /// A save request finished.
    fn session_saved(&mut self, _outcome: &Result<PathBuf, String>) {}

    /// The final state and the winning players, in roster order.
    fn game_over(&mut self, _snapshot: &GameSnapshot, _winners: &[Player]) {}
}

/// The move sources for every roster seat, in roster order.
pub struct Seats {
    seats: Vec<Box<dyn Agent>>,
}

impl Seats {
    /// Assemble seats in roster order.
    #[must_use]
    pub fn new(seats: Vec<Box<dyn Agent>>) -> Self {
        Self { seats }
    }

    fn seat_mut(&mut self, position: usize) -> &mut dyn Agent {
        &mut *self.seats[position]
    }

    /// The RNG state of the first seat that has one, for save files.
    fn rng_state(&self) -> Option<GameRngState> {
        self.seats.iter().find_map(|seat| seat.rng_state())
    }
}

/// A configured game plus everything needed to run it to an outcome.
pub struct Session {
    kind: SessionKind,
    game: Game,
    save_dir: PathBuf,
}

impl Session {
    /// Wrap a game in a session of the given kind.
    #[must_use]
    pub fn new(kind: SessionKind, game: Game) -> Self {
        Self {
            kind,
            game,
            save_dir: PathBuf::from("saves"),
        }
    }

    /// Override the directory save files are written to.
    #[must_use]
    pub fn save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Run the session to its outcome.
    ///
    /// Spawns the engine actor, drives the presentation loop on the calling
    /// thread, and joins the engine before returning.
    pub fn run(
        self,
        seats: &mut Seats,
        frontend: &mut dyn Frontend,
    ) -> Result<SessionOutcome, SessionError> {
        info!(
            kind = ?self.kind,
            width = self.game.grid().width(),
            height = self.game.grid().height(),
            "session starting"
        );

        let (engine_port, presentation_port) = turn_channel();
        let kind = self.kind;
        let save_dir = self.save_dir;
        let game = self.game;
        let engine = thread::spawn(move || drive_engine(game, engine_port, kind, save_dir));

        let outcome = presentation_loop(&presentation_port, seats, frontend);

        // The loop only returns once the engine is done or unreachable, so
        // the join cannot block on a live handshake.
        drop(presentation_port);
        if engine.join().is_err() {
            warn!("engine actor panicked");
            return Err(SessionError::Disconnected);
        }
        outcome
    }
}

/// The engine actor: owns the game, applies moves, saves, and signals.
fn drive_engine(mut game: Game, port: EnginePort, kind: SessionKind, save_dir: PathBuf) -> Game {
    'game: loop {
        if game.is_ended() {
            let winners: Vec<Player> = match game.winners() {
                Ok(winners) => winners.into_iter().cloned().collect(),
                // Unreachable: guarded by is_ended right above.
                Err(_) => Vec::new(),
            };
            info!(?winners, "board full, game over");
            let _ = port.announce(TurnSignal::GameOver {
                snapshot: game.snapshot(),
                winners,
            });
            break 'game;
        }

        if port.announce(TurnSignal::Render(game.snapshot())).is_err() {
            break 'game;
        }

        // One handshake: stay on this turn until a candidate is accepted.
        loop {
            let request = match port.await_request() {
                Ok(request) => request,
                Err(SessionError::Disconnected) => break 'game,
            };
            match request {
                TurnRequest::Quit => {
                    info!("player quit before the board was full");
                    break 'game;
                }
                TurnRequest::Save { rng } => {
                    let saved = SavedSession::capture(kind, &game, rng);
                    let result = persist::save_to_dir(&save_dir, &saved)
                        .map_err(|err| err.to_string());
                    if port.announce(TurnSignal::Saved(result)).is_err() {
                        break 'game;
                    }
                    // Same turn, fresh handshake.
                    continue 'game;
                }
                TurnRequest::Play(edge) => match game.submit_move(edge) {
                    Ok(()) => {
                        let credited = game.update_scores();
                        debug!(%edge, closed = credited.len(), "move accepted");
                        continue 'game;
                    }
                    Err(reason) => {
                        debug!(%edge, %reason, "move rejected");
                        if port
                            .announce(TurnSignal::Rejected {
                                attempted: edge,
                                reason,
                            })
                            .is_err()
                        {
                            break 'game;
                        }
                    }
                },
            }
        }
    }
    game
}

/// The presentation actor: renders, prompts one seat, submits.
fn presentation_loop(
    port: &PresentationPort,
    seats: &mut Seats,
    frontend: &mut dyn Frontend,
) -> Result<SessionOutcome, SessionError> {
    let mut current: Option<GameSnapshot> = None;

    loop {
        match port.await_signal()? {
            TurnSignal::Render(snapshot) => {
                frontend.render(&snapshot);
                let quit = ask_and_submit(port, seats, &snapshot)?;
                current = Some(snapshot);
                if quit {
                    return Ok(SessionOutcome::QuitEarly);
                }
            }
            TurnSignal::Rejected { attempted, reason } => {
                frontend.move_rejected(&attempted, &reason);
                let snapshot = current
                    .as_ref()
                    .expect("rejection signal before the first render signal");
                if ask_and_submit(port, seats, snapshot)? {
                    return Ok(SessionOutcome::QuitEarly);
                }
            }
            TurnSignal::Saved(outcome) => {
                frontend.session_saved(&outcome);
            }
            TurnSignal::GameOver { snapshot, winners } => {
                frontend.game_over(&snapshot, &winners);
                return Ok(SessionOutcome::Completed { winners });
            }
        }
    }
}

/// Prompt the current seat for one request and submit it. Returns whether
/// the request was a quit.
fn ask_and_submit(
    port: &PresentationPort,
    seats: &mut Seats,
    snapshot: &GameSnapshot,
) -> Result<bool, SessionError> {
    let seat = seats.seat_mut(snapshot.current_player_position());
    let mut request = seat.propose(snapshot);
    // The seat that asked to save is not necessarily the seat whose RNG
    // state belongs in the file.
    if let TurnRequest::Save { rng: None } = request {
        request = TurnRequest::Save {
            rng: seats.rng_state(),
        };
    }
    let quit = matches!(request, TurnRequest::Quit);
    port.submit(request)?;
    Ok(quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;
    use crate::session::RandomAgent;

    struct CountingFrontend {
        renders: usize,
        rejections: usize,
        winners: Option<Vec<Player>>,
    }

    impl CountingFrontend {
        fn new() -> Self {
            Self {
                renders: 0,
                rejections: 0,
                winners: None,
            }
        }
    }

    impl Frontend for CountingFrontend {
        fn render(&mut self, _snapshot: &GameSnapshot) {
            self.renders += 1;
        }

        fn move_rejected(&mut self, _attempted: &Edge, _reason: &MoveError) {
            self.rejections += 1;
        }

        fn game_over(&mut self, _snapshot: &GameSnapshot, winners: &[Player]) {
            self.winners = Some(winners.to_vec());
        }
    }

    /// Replays a fixed request script, then quits if the script runs dry.
    struct ScriptedAgent {
        script: Vec<TurnRequest>,
    }

    impl Agent for ScriptedAgent {
        fn propose(&mut self, _snapshot: &GameSnapshot) -> TurnRequest {
            if self.script.is_empty() {
                TurnRequest::Quit
            } else {
                self.script.remove(0)
            }
        }
    }

    fn edge(x1: i32, y1: i32, x2: i32, y2: i32) -> Edge {
        Edge::new(Point::new(x1, y1), Point::new(x2, y2)).unwrap()
    }

    #[test]
    fn test_random_seats_play_to_completion() {
        let game = Game::new(3, 3, vec!["A".into(), "B".into()]).unwrap();
        let mut seats = Seats::new(vec![
            Box::new(RandomAgent::new(1)),
            Box::new(RandomAgent::new(2)),
        ]);
        let mut frontend = CountingFrontend::new();

        let outcome = Session::new(SessionKind::PvP, game)
            .run(&mut seats, &mut frontend)
            .unwrap();

        match outcome {
            SessionOutcome::Completed { winners } => assert!(!winners.is_empty()),
            other => panic!("expected completion, got {other:?}"),
        }
        // One render per prompted turn: the empty board plus the 11 states
        // before each later move. The full board arrives via game_over.
        assert_eq!(frontend.renders, 12);
        assert_eq!(frontend.rejections, 0);
        assert!(frontend.winners.is_some());
    }

    #[test]
    fn test_rejection_reprompts_without_advancing() {
        let game = Game::new(2, 2, vec!["A".into(), "B".into()]).unwrap();
        // A plays, then B duplicates A's line (rejected) and recovers; the
        // remaining script fills the board.
        let script_a = ScriptedAgent {
            script: vec![
                TurnRequest::Play(edge(0, 0, 1, 0)),
                TurnRequest::Play(edge(1, 0, 1, 1)),
            ],
        };
        let script_b = ScriptedAgent {
            script: vec![
                TurnRequest::Play(edge(0, 0, 1, 0)), // duplicate, rejected
                TurnRequest::Play(edge(0, 0, 0, 1)),
                TurnRequest::Play(edge(0, 1, 1, 1)),
            ],
        };
        let mut seats = Seats::new(vec![Box::new(script_a), Box::new(script_b)]);
        let mut frontend = CountingFrontend::new();

        let outcome = Session::new(SessionKind::PvP, game)
            .run(&mut seats, &mut frontend)
            .unwrap();

        assert_eq!(frontend.rejections, 1);
        match outcome {
            SessionOutcome::Completed { winners } => {
                // B placed the fourth line and owns the only box.
                assert_eq!(winners.len(), 1);
                assert_eq!(winners[0].name(), "B");
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_quit_ends_session_early() {
        let game = Game::new(3, 3, vec!["A".into(), "B".into()]).unwrap();
        let quitter = ScriptedAgent {
            script: vec![TurnRequest::Quit],
        };
        let idle = ScriptedAgent { script: vec![] };
        let mut seats = Seats::new(vec![Box::new(quitter), Box::new(idle)]);
        let mut frontend = CountingFrontend::new();

        let outcome = Session::new(SessionKind::PvP, game)
            .run(&mut seats, &mut frontend)
            .unwrap();

        assert_eq!(outcome, SessionOutcome::QuitEarly);
        assert!(frontend.winners.is_none());
    }
}
