#![allow(dead_code)]

pub mod mock_asr;
pub mod mock_nlu;
pub mod mock_tts;

use mock_asr::{Heard, MockAsr};
use mock_tts::MockTts;
use pizzatalk::config::Config;
use pizzatalk::dialog::{ConversationState, DialogObserver};
use pizzatalk::nlu::ClassifierEngine;
use pizzatalk::provision::ModelProvisioning;
use pizzatalk::session::event_channel;
use pizzatalk::{Engines, Orchestrator, Session};
use std::sync::{Arc, Mutex};

/// What the UI layer was told
#[derive(Debug, Clone, PartialEq)]
pub enum Note {
    Topping(String, bool),
    Error(String),
    Ended,
}

/// Observer that records every notification
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub notes: Arc<Mutex<Vec<Note>>>,
    pub states: Arc<Mutex<Vec<ConversationState>>>,
}

impl RecordingObserver {
    pub fn get_notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn get_states(&self) -> Vec<ConversationState> {
        self.states.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.get_notes()
            .into_iter()
            .filter_map(|n| match n {
                Note::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }
}

impl DialogObserver for RecordingObserver {
    fn on_order_state_changed(&mut self, topping: &str, selected: bool) {
        self.notes
            .lock()
            .unwrap()
            .push(Note::Topping(topping.to_string(), selected));
    }

    fn on_user_facing_error(&mut self, message: &str) {
        self.notes
            .lock()
            .unwrap()
            .push(Note::Error(message.to_string()));
    }

    fn on_conversation_ended(&mut self) {
        self.notes.lock().unwrap().push(Note::Ended);
    }

    fn on_state_changed(&mut self, state: ConversationState) {
        self.states.lock().unwrap().push(state);
    }
}

/// Provisioning that is always satisfied
pub struct Ready;

impl ModelProvisioning for Ready {
    fn ensure_ready(&self, _files: &[String]) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A session wired to mock engines
pub struct Harness {
    pub session: Session,
    pub asr: Arc<MockAsr>,
    pub tts: Arc<MockTts>,
    pub observer: RecordingObserver,
}

impl Harness {
    pub fn new(
        config: &Config,
        script: Vec<Heard>,
        classifier: Arc<dyn ClassifierEngine>,
        tts: MockTts,
    ) -> Self {
        let (tx, rx) = event_channel(config.queue_capacity);
        let asr = Arc::new(MockAsr::new(tx.clone(), script));
        let tts = Arc::new(tts);
        let observer = RecordingObserver::default();

        let engines = Engines {
            speech: asr.clone(),
            classifier,
            synthesizer: tts.clone(),
        };
        let orchestrator = Orchestrator::new(config, Box::new(observer.clone()));

        Self {
            session: Session::new(orchestrator, engines, tx, rx),
            asr,
            tts,
            observer,
        }
    }
}

/// Default config without the opening prompt
pub fn quiet_config() -> Config {
    Config {
        greeting: None,
        ..Config::default()
    }
}

pub fn say(phrases: &[&str]) -> Vec<Heard> {
    phrases.iter().map(|p| Heard::Say(p.to_string())).collect()
}
