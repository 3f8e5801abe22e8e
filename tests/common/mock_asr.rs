//! Mock ASR Engine for Testing
//!
//! Each time the microphone opens it "hears" the next scripted utterance.

use anyhow::Result;
use pizzatalk::asr::SpeechEngine;
use pizzatalk::dialog::{SpeechEvent, Transcript};
use pizzatalk::session::EventSender;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// What the mock reports on the next microphone activation
#[derive(Debug, Clone)]
pub enum Heard {
    Say(String),
    Timeout,
    Fail(String),
}

/// Mock ASR engine that replays a script
pub struct MockAsr {
    events: EventSender,
    script: Mutex<VecDeque<Heard>>,
    active: Mutex<bool>,
    /// Record of start/stop calls (for verification)
    pub calls: Arc<Mutex<Vec<&'static str>>>,
}

impl MockAsr {
    pub fn new(events: EventSender, script: Vec<Heard>) -> Self {
        Self {
            events,
            script: Mutex::new(script.into()),
            active: Mutex::new(false),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that says each phrase in turn
    pub fn saying(events: EventSender, phrases: &[&str]) -> Self {
        Self::new(
            events,
            phrases.iter().map(|p| Heard::Say(p.to_string())).collect(),
        )
    }

    pub fn get_calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl SpeechEngine for MockAsr {
    fn start(&self) -> Result<()> {
        self.calls.lock().unwrap().push("start");
        *self.active.lock().unwrap() = true;

        let next = self.script.lock().unwrap().pop_front();
        let event = match next {
            Some(Heard::Say(text)) => SpeechEvent::Transcript(Transcript::final_text(&text)),
            Some(Heard::Timeout) => SpeechEvent::Timeout,
            Some(Heard::Fail(cause)) => SpeechEvent::Error(cause),
            None => return Ok(()),
        };
        self.events
            .try_send(event.into())
            .map_err(|e| anyhow::anyhow!("Mock ASR queue error: {}", e))
    }

    fn stop(&self) -> Result<()> {
        self.calls.lock().unwrap().push("stop");
        *self.active.lock().unwrap() = false;
        Ok(())
    }

    fn is_active(&self) -> bool {
        *self.active.lock().unwrap()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
