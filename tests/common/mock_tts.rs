//! Mock TTS Engine for Testing
//!
//! Records all spoken text for verification.

use futures::stream::{self, StreamExt};
use pizzatalk::dialog::PlaybackKind;
use pizzatalk::tts::{PlaybackStream, SynthesisEngine};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock TTS engine that records spoken text
#[derive(Debug)]
pub struct MockTts {
    /// All text that was "spoken"
    pub spoken: Arc<Mutex<Vec<String>>>,
    /// Simulate failure on next speak
    pub should_fail: Arc<Mutex<bool>>,
    /// Text whose playback ran to completion
    pub completed: Arc<Mutex<Vec<String>>>,
    /// How long "playback" takes before completing
    delay: Option<Duration>,
}

impl MockTts {
    pub fn new() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            completed: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Create a mock whose playback takes `delay` to complete
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    /// Get all spoken phrases
    pub fn get_spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn get_completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    /// Check if a phrase was spoken
    pub fn was_spoken(&self, text: &str) -> bool {
        self.spoken.lock().unwrap().iter().any(|s| s.contains(text))
    }
}

impl Default for MockTts {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthesisEngine for MockTts {
    fn synthesize(&self, text: &str) -> PlaybackStream {
        if *self.should_fail.lock().unwrap() {
            return stream::iter([PlaybackKind::Error("Mock TTS failure".to_string())]).boxed();
        }
        self.spoken.lock().unwrap().push(text.to_string());
        let delay = self.delay;
        let completed = self.completed.clone();
        let text = text.to_string();
        stream::iter([PlaybackKind::Started])
            .chain(stream::once(async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                completed.lock().unwrap().push(text);
                PlaybackKind::Complete
            }))
            .boxed()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
