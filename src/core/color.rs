//! Player colors.
//!
//! Colors are assigned by roster position at game construction. The palette
//! size is the hard upper bound on the roster size.

use serde::{Deserialize, Serialize};

/// A player's line color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Cyan,
    Magenta,
}

impl PlayerColor {
    /// The full palette, in roster-assignment order.
    pub const ALL: [PlayerColor; 6] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Cyan,
        PlayerColor::Magenta,
    ];

    /// Color assigned to the roster position `index`, if the palette is
    /// large enough.
    #[must_use]
    pub fn for_roster_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerColor::Red => "red",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Cyan => "cyan",
            PlayerColor::Magenta => "magenta",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_distinct_colors() {
        for (i, a) in PlayerColor::ALL.iter().enumerate() {
            for b in &PlayerColor::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_for_roster_index() {
        assert_eq!(PlayerColor::for_roster_index(0), Some(PlayerColor::Red));
        assert_eq!(PlayerColor::for_roster_index(5), Some(PlayerColor::Magenta));
        assert_eq!(PlayerColor::for_roster_index(6), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PlayerColor::Cyan.to_string(), "cyan");
    }
}
