//! Utility modules

pub mod fuzzy;

pub use fuzzy::{find_in_utterance, normalize_text, FuzzyMatch};
