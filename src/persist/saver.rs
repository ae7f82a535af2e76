//! JSON save files.
//!
//! A save is one flat, versioned JSON document: the session kind tag, the
//! opponent RNG state for PvE sessions, and the full game snapshot.
//! Restoring checks the version, then rebuilds the engine through
//! `Game::from_snapshot`, which replays every recorded line through the
//! normal validation path.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{GameRngState, PersistError};
use crate::game::{Game, GameSnapshot};
use crate::session::SessionKind;

/// Current save-file format version.
pub const SAVE_VERSION: u32 = 1;

/// A serialized session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedSession {
    /// Format version; files with another version do not restore.
    pub version: u32,
    /// When the save was taken.
    pub created_at: DateTime<Utc>,
    /// Which seats were human. Restoring dispatches on this tag alone.
    pub kind: SessionKind,
    /// The computer opponent's RNG state, present for PvE sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng: Option<GameRngState>,
    /// The full game state.
    pub game: GameSnapshot,
}

impl SavedSession {
    /// Capture a session at the current instant.
    #[must_use]
    pub fn capture(kind: SessionKind, game: &Game, rng: Option<GameRngState>) -> Self {
        Self {
            version: SAVE_VERSION,
            created_at: Utc::now(),
            kind,
            rng,
            game: game.snapshot(),
        }
    }

    /// Rebuild the engine from this save.
    pub fn restore_game(&self) -> Result<Game, PersistError> {
        if self.version != SAVE_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(Game::from_snapshot(&self.game)?)
    }

    /// Serialize to the on-disk byte format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Deserialize from the on-disk byte format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Write a save into `dir` under a timestamped file name.
///
/// Returns the path written. The directory is created if missing.
pub fn save_to_dir(dir: &Path, session: &SavedSession) -> Result<PathBuf, PersistError> {
    let filename = format!(
        "gamesave_{}.json",
        session.created_at.format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(filename);
    match write_to(&path, session) {
        Ok(()) => {
            info!(path = %path.display(), "session saved");
            Ok(path)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "could not save session");
            Err(err)
        }
    }
}

/// Write a save to an exact path.
pub fn write_to(path: &Path, session: &SavedSession) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, session.to_bytes()?)?;
    Ok(())
}

/// Load a save from a path.
pub fn load(path: &Path) -> Result<SavedSession, PersistError> {
    let bytes = fs::read(path)?;
    SavedSession::from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Edge, PlayerId, Point};

    fn mid_game() -> Game {
        let mut game = Game::new(5, 5, vec!["A".into(), "B".into()]).unwrap();
        for (p1, p2) in [
            ((0, 0), (1, 0)),
            ((0, 1), (1, 1)),
            ((0, 0), (0, 1)),
            ((1, 0), (1, 1)),
        ] {
            let edge = Edge::new(Point::new(p1.0, p1.1), Point::new(p2.0, p2.1)).unwrap();
            game.submit_move(edge).unwrap();
            game.update_scores();
        }
        game
    }

    #[test]
    fn test_byte_round_trip() {
        let saved = SavedSession::capture(SessionKind::PvP, &mid_game(), None);
        let bytes = saved.to_bytes().unwrap();
        let back = SavedSession::from_bytes(&bytes).unwrap();

        assert_eq!(back.version, SAVE_VERSION);
        assert_eq!(back.kind, SessionKind::PvP);
        assert_eq!(back.game, saved.game);
    }

    #[test]
    fn test_restore_resumes_turn_and_scores() {
        let saved = SavedSession::capture(SessionKind::PvP, &mid_game(), None);
        let restored = saved.restore_game().unwrap();

        assert_eq!(restored.current_player().name(), "A");
        assert_eq!(restored.score(PlayerId::new(1)), 1);
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let mut saved = SavedSession::capture(SessionKind::PvP, &mid_game(), None);
        saved.version = 99;

        let err = saved.restore_game().unwrap_err();
        assert!(matches!(
            err,
            PersistError::UnsupportedVersion {
                found: 99,
                expected: SAVE_VERSION
            }
        ));
    }

    #[test]
    fn test_pve_save_keeps_rng_state() {
        let rng = GameRngState {
            seed: 42,
            word_pos: 16,
        };
        let saved = SavedSession::capture(SessionKind::PvE, &mid_game(), Some(rng.clone()));
        let back = SavedSession::from_bytes(&saved.to_bytes().unwrap()).unwrap();

        assert_eq!(back.rng, Some(rng));
    }
}
