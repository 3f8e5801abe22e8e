//! Transcript Pre-filter
//!
//! Cheap lexical check run on every transcript before classification:
//! a transcript ending in the undo word clears the last selected topping.
//! This is a plain case-insensitive suffix match, not a negation parser.

use super::order::{OrderState, ToppingChange};
use tracing::info;

#[derive(Debug, Clone)]
pub struct UndoFilter {
    undo_word: String,
}

impl Default for UndoFilter {
    fn default() -> Self {
        Self::new("no")
    }
}

impl UndoFilter {
    pub fn new(undo_word: &str) -> Self {
        Self {
            undo_word: undo_word.to_lowercase(),
        }
    }

    /// Does this transcript end with the undo word?
    pub fn matches(&self, transcript: &str) -> bool {
        !self.undo_word.is_empty() && transcript.to_lowercase().ends_with(&self.undo_word)
    }

    /// Apply the undo to `order` if the transcript asks for it
    pub fn apply(&self, transcript: &str, order: &mut OrderState) -> Option<ToppingChange> {
        order.last_mutated()?;
        if !self.matches(transcript) {
            return None;
        }
        let change = order.undo_last();
        if let Some(ref c) = change {
            info!("↩️ Quick undo on '{}': cleared {}", transcript, c.topping);
        }
        change
    }
}
