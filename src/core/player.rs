//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe roster index. The roster order is fixed at construction and
//! turn order is derived from it.
//!
//! ## Roster
//!
//! The fixed, ordered list of player identities for one game, validated once
//! at construction: at least two players, pairwise-distinct names, one
//! palette color per roster position.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access, indexed by
//! `PlayerId`. Used for the scoreboard.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::color::PlayerColor;
use super::error::SetupError;

/// Player identifier: a 0-based roster position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player identity: unique name plus assigned color.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    name: String,
    color: PlayerColor,
}

impl Player {
    /// The player's name, unique within one roster.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The player's line color.
    #[must_use]
    pub fn color(&self) -> PlayerColor {
        self.color
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}

/// The fixed, ordered roster of one game.
///
/// ```
/// use dots_boxes::core::{PlayerColor, PlayerId, Roster};
///
/// let roster = Roster::new(vec!["Alice".into(), "Bob".into()]).unwrap();
/// assert_eq!(roster.len(), 2);
/// assert_eq!(roster[PlayerId::new(0)].color(), PlayerColor::Red);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster from player names, assigning colors by position.
    ///
    /// Fails if there are fewer than two names, more names than palette
    /// colors, or any duplicate name.
    pub fn new(names: Vec<String>) -> Result<Self, SetupError> {
        if names.len() < 2 {
            return Err(SetupError::NotEnoughPlayers(names.len()));
        }
        if names.len() > PlayerColor::ALL.len() {
            return Err(SetupError::TooManyPlayers {
                got: names.len(),
                max: PlayerColor::ALL.len(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(SetupError::DuplicateName(name.clone()));
            }
        }

        let players = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player {
                name,
                // Checked above: the roster fits the palette.
                color: PlayerColor::for_roster_index(i).unwrap(),
            })
            .collect();

        Ok(Self { players })
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Rosters are never empty; kept for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Get a player by roster position.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Look up a player's roster position by name.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| p.name() == name)
            .map(|i| PlayerId::new(i as u8))
    }

    /// Iterate over players in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate over all roster positions.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.players.len() as u8).map(PlayerId)
    }
}

impl Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, id: PlayerId) -> &Self::Output {
        self.get(id)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per roster position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        assert!(player_count > 0, "Must have at least 1 player");
        Self {
            data: vec![value; player_count],
        }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, id: PlayerId) -> &Self::Output {
        &self.data[id.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, id: PlayerId) -> &mut Self::Output {
        &mut self.data[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::new(1);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_roster_assigns_colors_by_position() {
        let roster = Roster::new(names(&["A", "B", "C"])).unwrap();

        assert_eq!(roster[PlayerId::new(0)].color(), PlayerColor::Red);
        assert_eq!(roster[PlayerId::new(1)].color(), PlayerColor::Blue);
        assert_eq!(roster[PlayerId::new(2)].color(), PlayerColor::Green);
    }

    #[test]
    fn test_roster_rejects_single_player() {
        let err = Roster::new(names(&["Solo"])).unwrap_err();
        assert_eq!(err, SetupError::NotEnoughPlayers(1));
    }

    #[test]
    fn test_roster_rejects_duplicate_names() {
        let err = Roster::new(names(&["A", "B", "A"])).unwrap_err();
        assert_eq!(err, SetupError::DuplicateName("A".into()));
    }

    #[test]
    fn test_roster_rejects_more_players_than_colors() {
        let err = Roster::new(names(&["A", "B", "C", "D", "E", "F", "G"])).unwrap_err();
        assert_eq!(err, SetupError::TooManyPlayers { got: 7, max: 6 });
    }

    #[test]
    fn test_position_of() {
        let roster = Roster::new(names(&["A", "B"])).unwrap();
        assert_eq!(roster.position_of("B"), Some(PlayerId::new(1)));
        assert_eq!(roster.position_of("nobody"), None);
    }

    #[test]
    fn test_player_map_scores() {
        let mut scores: PlayerMap<u32> = PlayerMap::with_value(2, 0);
        scores[PlayerId::new(1)] += 1;

        assert_eq!(scores[PlayerId::new(0)], 0);
        assert_eq!(scores[PlayerId::new(1)], 1);
        assert_eq!(scores.player_count(), 2);
    }

    #[test]
    fn test_player_map_iter() {
        let scores: PlayerMap<u32> = PlayerMap::with_value(3, 7);
        let pairs: Vec<_> = scores.iter().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2], (PlayerId::new(2), &7));
    }

    #[test]
    fn test_roster_serde_round_trip() {
        let roster = Roster::new(names(&["A", "B"])).unwrap();
        let json = serde_json::to_string(&roster).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(roster, back);
    }
}
