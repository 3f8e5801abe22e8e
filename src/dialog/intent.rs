//! Intent/Slot Handler
//!
//! Applies a finished classification to the order and picks exactly one
//! next step for the conversation.

use super::events::{ClassificationResult, INTENT_ADD_TOPPING, INTENT_ORDER};
use super::order::{OrderState, ToppingChange};
use tracing::{debug, info};

/// What the orchestrator should do after a classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction {
    /// Keep gathering toppings
    Listen,
    /// Speak this text, then follow the continue flag
    Speak(String),
    /// End the conversation without speaking
    End,
}

/// Outcome of handling one classification result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub continue_conversation: bool,
    pub next: NextAction,
    pub change: Option<ToppingChange>,
}

#[derive(Debug, Clone)]
pub struct IntentHandler {
    closing_prompt: String,
}

impl IntentHandler {
    pub fn new(closing_prompt: &str) -> Self {
        Self {
            closing_prompt: closing_prompt.to_string(),
        }
    }

    pub fn handle(&self, result: &ClassificationResult, order: &mut OrderState) -> Decision {
        let change = match result.topping() {
            Some(value) if order.is_known(value) => order.select(value),
            Some(value) => {
                debug!("Ignoring unknown topping slot: '{}'", value);
                None
            }
            None => None,
        };

        let (continue_conversation, next) = match result.intent.as_str() {
            INTENT_ADD_TOPPING => (true, NextAction::Listen),
            INTENT_ORDER => (false, NextAction::Speak(self.closing_prompt.clone())),
            other => {
                info!("🤷 Out-of-domain intent '{}', wrapping up", other);
                (false, NextAction::End)
            }
        };

        Decision {
            continue_conversation,
            next,
            change,
        }
    }
}
