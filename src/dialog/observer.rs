//! Outbound notifications for the caller/UI layer.
//!
//! Called synchronously from inside the orchestrator's event handler.
//! Implementations that feed a UI thread must do their own marshaling.

use super::events::ConversationState;
use tracing::{info, warn};

pub trait DialogObserver: Send {
    /// A topping checkbox should flip
    fn on_order_state_changed(&mut self, topping: &str, selected: bool);

    /// Recoverable error the user should see (timeouts, engine errors)
    fn on_user_facing_error(&mut self, message: &str);

    /// The conversation reached its terminal state
    fn on_conversation_ended(&mut self);

    /// Live transcript display
    fn on_transcript(&mut self, _text: &str) {}

    fn on_state_changed(&mut self, _state: ConversationState) {}
}

/// Observer that only writes to the log
#[derive(Debug, Default)]
pub struct LogObserver;

impl DialogObserver for LogObserver {
    fn on_order_state_changed(&mut self, topping: &str, selected: bool) {
        info!("🍕 {} -> {}", topping, if selected { "on" } else { "off" });
    }

    fn on_user_facing_error(&mut self, message: &str) {
        warn!("⚠️ {}", message);
    }

    fn on_conversation_ended(&mut self) {
        info!("👋 Conversation ended");
    }
}
