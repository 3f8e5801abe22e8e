//! Dialog Orchestrator
//!
//! The conversation state machine. Every signal from the recognizer,
//! classifier and synthesizer arrives here through a single ordered queue
//! and is handled to completion before the next one. `handle_event` never
//! awaits: it mutates state, notifies the observer, and returns the
//! [`Command`]s the session driver must execute.

use super::events::{
    ClassificationOutcome, Command, ConversationState, DialogEvent, PlaybackEvent, PlaybackKind,
    SpeechEvent, Transcript,
};
use super::intent::{IntentHandler, NextAction};
use super::observer::DialogObserver;
use super::order::{OrderState, ToppingChange};
use super::playback::{after_playback, AfterPlayback};
use super::prefilter::UndoFilter;
use crate::config::{Config, TimeoutPolicy};
use crate::error::{DialogError, DialogResult};
use tracing::{debug, error, info, warn};

/// Whether the caller has confirmed microphone access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicAuthorization {
    Granted,
    Denied,
}

pub struct Orchestrator {
    state: ConversationState,
    order: OrderState,
    /// Reopen the microphone after the next playback completes?
    continue_conversation: bool,

    undo: UndoFilter,
    intents: IntentHandler,
    greeting: Option<String>,
    timeout_policy: TimeoutPolicy,
    classify_partials: bool,

    observer: Box<dyn DialogObserver>,

    /// Listening turn; bumps each time the mic opens from a non-listening state
    turn: u64,
    next_seq: u64,
    last_applied_seq: Option<u64>,
    next_utterance: u64,
    /// Utterance currently being spoken
    speaking: Option<u64>,
}

impl Orchestrator {
    pub fn new(config: &Config, observer: Box<dyn DialogObserver>) -> Self {
        Self {
            state: ConversationState::Idle,
            order: OrderState::new(&config.toppings),
            continue_conversation: true,
            undo: UndoFilter::new(&config.undo_word),
            intents: IntentHandler::new(&config.closing_prompt),
            greeting: config.greeting.clone(),
            timeout_policy: config.timeout_policy,
            classify_partials: config.classify_partials,
            observer,
            turn: 0,
            next_seq: 0,
            last_applied_seq: None,
            next_utterance: 0,
            speaking: None,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn order(&self) -> &OrderState {
        &self.order
    }

    pub fn continue_conversation(&self) -> bool {
        self.continue_conversation
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Start the session.
    ///
    /// Opens the microphone, or speaks the greeting first when one is
    /// configured. Without microphone authorization the orchestrator
    /// stays idle.
    pub fn begin(&mut self, authorization: MicAuthorization) -> DialogResult<Vec<Command>> {
        if self.state != ConversationState::Idle {
            warn!("begin() called while {}; ignoring", self.state);
            return Ok(Vec::new());
        }
        if authorization == MicAuthorization::Denied {
            warn!("Record permission not granted; voice control disabled!");
            return Err(DialogError::NotAuthorized);
        }

        info!("🍕 Pizza order session starting");
        self.continue_conversation = true;
        match self.greeting.clone() {
            Some(greeting) => Ok(self.speak(greeting)),
            None => Ok(self.open_listening()),
        }
    }

    /// Handle one queued event to completion
    pub fn handle_event(&mut self, event: DialogEvent) -> Vec<Command> {
        if self.state == ConversationState::Ended {
            debug!("Conversation ended; ignoring {:?}", event);
            return Vec::new();
        }

        match event {
            DialogEvent::Speech(SpeechEvent::Transcript(transcript)) => {
                self.on_transcript(transcript)
            }
            DialogEvent::Speech(SpeechEvent::Timeout) => self.on_timeout(),
            DialogEvent::Speech(SpeechEvent::Error(cause)) => {
                self.surface(DialogError::Recognition(cause));
                Vec::new()
            }
            DialogEvent::Speech(SpeechEvent::Closed) => {
                info!("🔌 Recognizer input closed");
                let mut commands = self.cancel_speech();
                commands.extend(self.end());
                commands
            }
            DialogEvent::Classification(outcome) => self.on_classification(outcome),
            DialogEvent::Playback(event) => self.on_playback(event),
            DialogEvent::Reactivate => self.on_reactivate(),
        }
    }

    fn on_transcript(&mut self, transcript: Transcript) -> Vec<Command> {
        if !self.state.is_listening() {
            debug!(
                "Ignoring transcript while {}: '{}'",
                self.state, transcript.text
            );
            return Vec::new();
        }

        debug!("📝 Heard: '{}'", transcript.text);
        self.observer.on_transcript(&transcript.text);

        let change = self.undo.apply(&transcript.text, &mut self.order);
        self.notify_change(change);

        if transcript.is_partial && !self.classify_partials {
            return Vec::new();
        }
        if transcript.text.trim().is_empty() {
            return Vec::new();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.set_state(ConversationState::AwaitingClassification);
        vec![Command::Classify {
            seq,
            turn: self.turn,
            text: transcript.text,
        }]
    }

    fn on_classification(&mut self, outcome: ClassificationOutcome) -> Vec<Command> {
        let superseded = self.last_applied_seq.is_some_and(|last| outcome.seq <= last);
        if !self.state.is_listening() || outcome.turn != self.turn || superseded {
            warn!(
                "Discarding stale classification #{} (turn {}, now {} in turn {})",
                outcome.seq, outcome.turn, self.state, self.turn
            );
            return Vec::new();
        }
        self.last_applied_seq = Some(outcome.seq);

        let result = match outcome.result {
            Ok(result) => result,
            Err(message) => {
                self.surface(DialogError::Classification(message));
                self.settle_listening();
                return Vec::new();
            }
        };

        info!(
            "🧠 Intent '{}' (topping: {:?})",
            result.intent,
            result.topping()
        );
        let decision = self.intents.handle(&result, &mut self.order);
        self.notify_change(decision.change);
        self.continue_conversation = decision.continue_conversation;

        match decision.next {
            NextAction::Listen => {
                self.settle_listening();
                vec![Command::StartListening]
            }
            NextAction::Speak(text) => self.speak(text),
            NextAction::End => self.end(),
        }
    }

    fn on_playback(&mut self, event: PlaybackEvent) -> Vec<Command> {
        if self.state != ConversationState::Speaking || self.speaking != Some(event.utterance) {
            debug!(
                "Ignoring stale playback {:?} for utterance {}",
                event.kind, event.utterance
            );
            return Vec::new();
        }

        match event.kind {
            PlaybackKind::Error(message) => {
                self.surface(DialogError::Synthesis(message));
                return Vec::new();
            }
            PlaybackKind::Started => {
                debug!("🔊 Playback started (utterance {})", event.utterance);
                return Vec::new();
            }
            PlaybackKind::Complete => {}
        }
        self.speaking = None;

        match after_playback(&PlaybackKind::Complete, self.continue_conversation) {
            AfterPlayback::Reactivate => self.open_listening(),
            AfterPlayback::End => self.end(),
            AfterPlayback::Stay => Vec::new(),
        }
    }

    fn on_timeout(&mut self) -> Vec<Command> {
        self.surface(DialogError::RecognitionTimeout);
        if !self.state.is_listening() {
            return Vec::new();
        }

        match self.timeout_policy {
            TimeoutPolicy::Stall => Vec::new(),
            TimeoutPolicy::Reactivate => {
                info!("🎙️ Reopening microphone after timeout");
                vec![Command::StartListening]
            }
            TimeoutPolicy::End => self.end(),
        }
    }

    fn on_reactivate(&mut self) -> Vec<Command> {
        match self.state {
            ConversationState::Idle => {
                warn!("Reactivate requested before begin(); ignoring");
                Vec::new()
            }
            ConversationState::Listening | ConversationState::AwaitingClassification => {
                vec![Command::StartListening]
            }
            ConversationState::Speaking => {
                info!("🎙️ Manual reactivation while speaking");
                let mut commands = self.cancel_speech();
                commands.extend(self.open_listening());
                commands
            }
            ConversationState::Ended => Vec::new(),
        }
    }

    /// Open a new listening turn
    fn open_listening(&mut self) -> Vec<Command> {
        self.turn += 1;
        self.set_state(ConversationState::Listening);
        vec![Command::StartListening]
    }

    /// Back to plain listening unless a newer classification is still out
    fn settle_listening(&mut self) {
        let newest_dispatched = self.next_seq.checked_sub(1);
        if newest_dispatched > self.last_applied_seq {
            self.set_state(ConversationState::AwaitingClassification);
        } else {
            self.set_state(ConversationState::Listening);
        }
    }

    fn speak(&mut self, text: String) -> Vec<Command> {
        let utterance = self.next_utterance;
        self.next_utterance += 1;
        self.speaking = Some(utterance);
        self.set_state(ConversationState::Speaking);
        info!("🗣️ Speaking: '{}'", text);
        vec![
            Command::StopListening,
            Command::Synthesize { utterance, text },
        ]
    }

    /// Abandon the utterance being spoken, if any
    fn cancel_speech(&mut self) -> Vec<Command> {
        match self.speaking.take() {
            Some(_) => vec![Command::CancelSpeech],
            None => Vec::new(),
        }
    }

    fn end(&mut self) -> Vec<Command> {
        self.set_state(ConversationState::Ended);
        info!(
            "✅ Final order: [{}]",
            self.order.selected_toppings().join(", ")
        );
        self.observer.on_conversation_ended();
        vec![Command::StopListening]
    }

    fn set_state(&mut self, next: ConversationState) {
        if self.state == next {
            return;
        }
        debug!("State: {} -> {}", self.state, next);
        self.state = next;
        self.observer.on_state_changed(next);
    }

    fn notify_change(&mut self, change: Option<ToppingChange>) {
        if let Some(change) = change {
            self.observer
                .on_order_state_changed(&change.topping, change.selected);
        }
    }

    fn surface(&mut self, err: DialogError) {
        match err {
            DialogError::RecognitionTimeout => warn!("⏱️ {}", err),
            _ => error!("❌ {}", err),
        }
        self.observer.on_user_facing_error(&err.to_string());
    }
}
