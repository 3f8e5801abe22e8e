//! Dialog core
//!
//! Order state, the quick-undo pre-filter, intent handling, playback
//! reactivation and the orchestrator that ties them together.

pub mod events;
pub mod intent;
pub mod observer;
pub mod orchestrator;
pub mod order;
pub mod playback;
pub mod prefilter;

pub use events::{
    ClassificationOutcome, ClassificationResult, Command, ConversationState, DialogEvent,
    PlaybackEvent, PlaybackKind, Slot, SpeechEvent, Transcript,
};
pub use observer::{DialogObserver, LogObserver};
pub use orchestrator::{MicAuthorization, Orchestrator};
pub use order::{OrderState, ToppingChange};
