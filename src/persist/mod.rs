//! Save and restore sessions as JSON files.

pub mod saver;

pub use saver::{load, save_to_dir, write_to, SavedSession, SAVE_VERSION};
