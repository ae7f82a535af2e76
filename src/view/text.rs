//! Console rendering and the human move prompt.

use std::io::{self, BufRead, Write};

use crossterm::style::{Color, Stylize};

use crate::core::{Edge, MoveError, Player, PlayerColor, Point};
use crate::game::GameSnapshot;
use crate::session::{Agent, Frontend, TurnRequest};

fn term_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Red => Color::Red,
        PlayerColor::Blue => Color::Blue,
        PlayerColor::Green => Color::Green,
        PlayerColor::Yellow => Color::Yellow,
        PlayerColor::Cyan => Color::Cyan,
        PlayerColor::Magenta => Color::Magenta,
    }
}

/// Draws the board, scoreboard and announcements on stdout.
#[derive(Default)]
pub struct ConsoleView;

impl ConsoleView {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn print_players(&self, snapshot: &GameSnapshot) {
        println!("--- PLAYERS ---");
        for (i, player) in snapshot.players.iter().enumerate() {
            println!("Player {} : {}", i + 1, player);
            println!("\tScore: {}", snapshot.score_of(player.name()));
        }
        println!("---------------");
    }

    fn print_board(&self, snapshot: &GameSnapshot) {
        let width = snapshot.width;
        let height = snapshot.height;

        let mut header = String::from("   ");
        for x in 0..width {
            header.push_str(&format!(" {x}  "));
        }
        println!("{header}");
        println!("  ┏{}┓", "━".repeat((width * 4 - 1) as usize));

        for y in 0..height {
            self.print_dot_row(snapshot, y);
            if y < height - 1 {
                self.print_vertical_row(snapshot, y);
            }
        }

        println!("  ┗{}┛", "━".repeat((width * 4 - 1) as usize));
    }

    fn print_dot_row(&self, snapshot: &GameSnapshot, y: i32) {
        print!("{y} ┃");
        for x in 0..snapshot.width {
            print!(" ● ");
            if x < snapshot.width - 1 {
                match snapshot.edge_between(Point::new(x, y), Point::new(x + 1, y)) {
                    Some(color) => print!("{}", "=".with(term_color(color))),
                    None => print!(" "),
                }
            }
        }
        println!("┃");
    }

    fn print_vertical_row(&self, snapshot: &GameSnapshot, y: i32) {
        print!("  ┃");
        for x in 0..snapshot.width {
            match snapshot.edge_between(Point::new(x, y), Point::new(x, y + 1)) {
                Some(color) => print!("{}", " ‖ ".with(term_color(color))),
                None => print!("   "),
            }
            if x < snapshot.width - 1 {
                print!(" ");
            }
        }
        println!("┃");
    }

    /// Ask whether to start another game on the same configuration.
    #[must_use]
    pub fn prompt_rematch(&self) -> bool {
        print!("Do you wish to play again? [y/n] : ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => line.trim().eq_ignore_ascii_case("y"),
        }
    }
}

impl Frontend for ConsoleView {
    fn render(&mut self, snapshot: &GameSnapshot) {
        println!();
        self.print_players(snapshot);
        self.print_board(snapshot);
        println!("Current player: {}", snapshot.current_player);
    }

    fn move_rejected(&mut self, attempted: &Edge, reason: &MoveError) {
        println!("Line {attempted} is not allowed: {reason}. Try again.");
    }

    fn session_saved(&mut self, outcome: &Result<std::path::PathBuf, String>) {
        match outcome {
            Ok(path) => println!("Game saved to {}.", path.display()),
            Err(message) => println!("Could not save the game: {message}"),
        }
    }

    fn game_over(&mut self, snapshot: &GameSnapshot, winners: &[Player]) {
        println!();
        self.print_players(snapshot);
        self.print_board(snapshot);
        match winners {
            [] => {}
            [winner] => println!("Player {} won!", winner.name()),
            _ => {
                println!("Game tied between the players:");
                for winner in winners {
                    println!("{}", winner.name());
                }
            }
        }
    }
}

/// A human seat: prompts on stdout, blocks on stdin.
///
/// Accepts a move as four integers (`x1 y1 x2 y2`, commas allowed), or the
/// commands `save` and `quit`. Candidates that fail geometric validation are
/// re-prompted locally; the engine re-checks everything anyway and
/// board-dependent rejections come back through the handshake.
#[derive(Default)]
pub struct ConsoleAgent;

impl ConsoleAgent {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // EOF: treat a closed stdin as a quit, not a busy loop.
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

impl Agent for ConsoleAgent {
    fn propose(&mut self, snapshot: &GameSnapshot) -> TurnRequest {
        loop {
            print!(
                "{}, make your move [ x1 y1 x2 y2 | save | quit ] : ",
                snapshot.current_player
            );
            let _ = io::stdout().flush();

            let Some(line) = self.read_line() else {
                return TurnRequest::Quit;
            };
            match parse_request(&line) {
                Ok(request) => return request,
                Err(message) => println!("{message}"),
            }
        }
    }
}

fn parse_request(line: &str) -> Result<TurnRequest, String> {
    let trimmed = line.trim();
    match trimmed {
        "quit" | "q" => return Ok(TurnRequest::Quit),
        "save" => return Ok(TurnRequest::Save { rng: None }),
        _ => {}
    }

    let normalized = trimmed.replace(',', " ");
    let coords: Vec<i32> = normalized
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| "Enter four integers, or 'save' or 'quit'.".to_string())?;
    if coords.len() != 4 {
        return Err(format!(
            "Expected four coordinates, got {}.",
            coords.len()
        ));
    }

    let edge = Edge::new(
        Point::new(coords[0], coords[1]),
        Point::new(coords[2], coords[3]),
    )
    .map_err(|reason| format!("That line is not valid: {reason}."))?;
    Ok(TurnRequest::Play(edge))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(x1: i32, y1: i32, x2: i32, y2: i32) -> Edge {
        Edge::new(Point::new(x1, y1), Point::new(x2, y2)).unwrap()
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse_request("0 0 1 0\n").unwrap(),
            TurnRequest::Play(edge(0, 0, 1, 0))
        );
        assert_eq!(
            parse_request(" 2, 3, 2, 4 ").unwrap(),
            TurnRequest::Play(edge(2, 3, 2, 4))
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_request("quit\n").unwrap(), TurnRequest::Quit);
        assert_eq!(parse_request("q").unwrap(), TurnRequest::Quit);
        assert_eq!(
            parse_request("save\n").unwrap(),
            TurnRequest::Save { rng: None }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse_request("one two three four").is_err());
        assert!(parse_request("0 0 1").is_err());
        assert!(parse_request("").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_geometry_locally() {
        let err = parse_request("0 0 1 1").unwrap_err();
        assert!(err.contains("diagonal"));
        let err = parse_request("0 0 0 2").unwrap_err();
        assert!(err.contains("too long"));
    }
}
