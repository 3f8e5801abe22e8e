//! Dialog Session
//!
//! Owns the single ordered event queue and drives the orchestrator:
//! events are dequeued one at a time, handled to completion, and the
//! resulting commands executed before the next event is taken.
//! Classification and synthesis run as detached tasks whose results
//! re-enter the same queue.

use crate::asr::SpeechEngine;
use crate::dialog::{
    ClassificationOutcome, Command, ConversationState, DialogEvent, MicAuthorization,
    Orchestrator, PlaybackEvent, SpeechEvent,
};
use crate::error::{DialogError, DialogResult};
use crate::nlu::ClassifierEngine;
use crate::provision::ModelProvisioning;
use crate::tts::SynthesisEngine;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub type EventSender = mpsc::Sender<DialogEvent>;
pub type EventReceiver = mpsc::Receiver<DialogEvent>;

/// Create the session's event queue
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    mpsc::channel(capacity.max(1))
}

/// External collaborators the session drives
#[derive(Clone)]
pub struct Engines {
    pub speech: Arc<dyn SpeechEngine>,
    pub classifier: Arc<dyn ClassifierEngine>,
    pub synthesizer: Arc<dyn SynthesisEngine>,
}

pub struct Session {
    orchestrator: Orchestrator,
    engines: Engines,
    events_tx: EventSender,
    events_rx: EventReceiver,
    /// Task forwarding the current utterance's playback signals
    playback: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(
        orchestrator: Orchestrator,
        engines: Engines,
        events_tx: EventSender,
        events_rx: EventReceiver,
    ) -> Self {
        Self {
            orchestrator,
            engines,
            events_tx,
            events_rx,
            playback: None,
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Handle for producers outside the session (e.g. a UI reactivate button)
    pub fn sender(&self) -> EventSender {
        self.events_tx.clone()
    }

    /// Check model artifacts, then start the conversation
    pub fn begin(
        &mut self,
        provisioning: &dyn ModelProvisioning,
        authorization: MicAuthorization,
    ) -> DialogResult<()> {
        provisioning
            .ensure_ready(&self.engines.classifier.required_models())
            .map_err(|e| DialogError::Provisioning(e.to_string()))?;

        info!(
            "🚀 Engines: speech={}, nlu={}, tts={}",
            self.engines.speech.name(),
            self.engines.classifier.name(),
            self.engines.synthesizer.name()
        );
        let commands = self.orchestrator.begin(authorization)?;
        self.execute(commands);
        Ok(())
    }

    /// Consume events until the conversation ends.
    ///
    /// Returns the selected toppings.
    pub async fn run(&mut self) -> DialogResult<Vec<String>> {
        while self.orchestrator.state() != ConversationState::Ended {
            let event = self
                .events_rx
                .recv()
                .await
                .ok_or(DialogError::ChannelClosed)?;
            self.step(event);
        }

        Ok(self
            .orchestrator
            .order()
            .selected_toppings()
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// Handle one event and execute its commands
    pub fn step(&mut self, event: DialogEvent) {
        let commands = self.orchestrator.handle_event(event);
        self.execute(commands);
    }

    fn execute(&mut self, commands: Vec<Command>) {
        for command in commands {
            debug!("▶️ {:?}", command);
            match command {
                Command::StartListening => {
                    if let Err(e) = self.engines.speech.start() {
                        self.enqueue(SpeechEvent::Error(e.to_string()).into());
                    }
                }
                Command::StopListening => {
                    if let Err(e) = self.engines.speech.stop() {
                        self.enqueue(SpeechEvent::Error(e.to_string()).into());
                    }
                }
                Command::Classify { seq, turn, text } => {
                    let classifier = self.engines.classifier.clone();
                    let tx = self.events_tx.clone();
                    tokio::spawn(async move {
                        let result = classifier
                            .classify(&text)
                            .await
                            .map_err(|e| e.to_string());
                        let outcome = ClassificationOutcome { seq, turn, result };
                        if tx.send(outcome.into()).await.is_err() {
                            debug!("Session gone; dropping classification #{}", seq);
                        }
                    });
                }
                Command::Synthesize { utterance, text } => {
                    let mut playback = self.engines.synthesizer.synthesize(&text);
                    let tx = self.events_tx.clone();
                    self.playback = Some(tokio::spawn(async move {
                        while let Some(kind) = playback.next().await {
                            if tx.send(PlaybackEvent { utterance, kind }.into()).await.is_err() {
                                break;
                            }
                        }
                    }));
                }
                Command::CancelSpeech => {
                    // Dropping the stream stops the synthesizer
                    if let Some(task) = self.playback.take() {
                        task.abort();
                    }
                }
            }
        }
    }

    /// Queue an event from inside the consumer without blocking on capacity
    fn enqueue(&self, event: DialogEvent) {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            if tx.send(event).await.is_err() {
                warn!("Event queue closed");
            }
        });
    }
}
