//! Dialog Event Types
//!
//! Everything that enters the orchestrator queue, and everything it asks
//! the session driver to do in return.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Slot name the classifier uses for topping arguments
pub const TOPPING_SLOT: &str = "topping";

/// Intent that keeps the conversation gathering toppings
pub const INTENT_ADD_TOPPING: &str = "add.topping";

/// Intent that closes the order
pub const INTENT_ORDER: &str = "order";

/// Text produced by the recognizer during one listening turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub is_partial: bool,
}

impl Transcript {
    pub fn partial(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_partial: true,
        }
    }

    pub fn final_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_partial: false,
        }
    }
}

/// A named argument extracted from an utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    pub value: Option<String>,
}

/// Classifier output for one utterance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl ClassificationResult {
    /// Result with no slots
    pub fn intent(intent: &str) -> Self {
        Self {
            intent: intent.to_string(),
            slots: HashMap::new(),
        }
    }

    /// Attach a slot value
    pub fn with_slot(mut self, name: &str, value: &str) -> Self {
        self.slots.insert(
            name.to_string(),
            Slot {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
        );
        self
    }

    /// The topping slot value, if the classifier filled one
    pub fn topping(&self) -> Option<&str> {
        self.slots.get(TOPPING_SLOT)?.value.as_deref()
    }
}

/// Where the conversation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    Listening,
    AwaitingClassification,
    Speaking,
    Ended,
}

impl ConversationState {
    /// Listening or waiting on a classification dispatched while listening
    pub fn is_listening(&self) -> bool {
        matches!(
            self,
            ConversationState::Listening | ConversationState::AwaitingClassification
        )
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConversationState::Idle => "idle",
            ConversationState::Listening => "listening",
            ConversationState::AwaitingClassification => "awaiting classification",
            ConversationState::Speaking => "speaking",
            ConversationState::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Signals emitted by the speech recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Transcript(Transcript),
    Timeout,
    Error(String),
    /// The recognizer's input is gone for good
    Closed,
}

/// Classification result tagged with the dispatch it answers
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    /// Dispatch sequence number (monotonic per session)
    pub seq: u64,
    /// Listening turn the text was heard in
    pub turn: u64,
    pub result: Result<ClassificationResult, String>,
}

/// Kind of synthesizer playback signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackKind {
    Started,
    Complete,
    Error(String),
}

/// Playback signal for one synthesized utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackEvent {
    pub utterance: u64,
    pub kind: PlaybackKind,
}

impl PlaybackEvent {
    pub fn started(utterance: u64) -> Self {
        Self {
            utterance,
            kind: PlaybackKind::Started,
        }
    }

    pub fn complete(utterance: u64) -> Self {
        Self {
            utterance,
            kind: PlaybackKind::Complete,
        }
    }

    pub fn error(utterance: u64, message: &str) -> Self {
        Self {
            utterance,
            kind: PlaybackKind::Error(message.to_string()),
        }
    }
}

/// Everything the orchestrator accepts through its queue
#[derive(Debug, Clone)]
pub enum DialogEvent {
    Speech(SpeechEvent),
    Classification(ClassificationOutcome),
    Playback(PlaybackEvent),
    /// Caller asked to reopen the microphone (e.g. a UI button)
    Reactivate,
}

impl From<SpeechEvent> for DialogEvent {
    fn from(event: SpeechEvent) -> Self {
        DialogEvent::Speech(event)
    }
}

impl From<ClassificationOutcome> for DialogEvent {
    fn from(outcome: ClassificationOutcome) -> Self {
        DialogEvent::Classification(outcome)
    }
}

impl From<PlaybackEvent> for DialogEvent {
    fn from(event: PlaybackEvent) -> Self {
        DialogEvent::Playback(event)
    }
}

/// Side effects requested by the orchestrator, executed by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartListening,
    StopListening,
    Classify { seq: u64, turn: u64, text: String },
    Synthesize { utterance: u64, text: String },
    /// Stop whatever the synthesizer is still playing
    CancelSpeech,
}
