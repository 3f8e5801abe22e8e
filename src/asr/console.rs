//! Line-driven recognizer
//!
//! Treats each typed line as one spoken utterance (stdin for the CLI).
//! While the microphone is open a line becomes a final transcript. A line
//! typed while it is closed counts as pressing the talk button: the
//! recognizer asks the dialog to reactivate, then reports the line.

use super::SpeechEngine;
use crate::dialog::{DialogEvent, SpeechEvent, Transcript};
use crate::session::EventSender;
use anyhow::Result;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

pub type LineReceiver = mpsc::Receiver<String>;

pub struct ConsoleAsr {
    active: Arc<watch::Sender<bool>>,
}

impl ConsoleAsr {
    /// Spawn the listener task over a source of lines; the microphone
    /// starts closed
    pub fn spawn(lines: LineReceiver, events: EventSender, timeout: Duration) -> Self {
        let (active_tx, active_rx) = watch::channel(false);
        let active = Arc::new(active_tx);
        tokio::spawn(listen_loop(lines, events, active.clone(), active_rx, timeout));
        Self { active }
    }

    /// Recognizer fed by the terminal
    pub fn stdin(events: EventSender, timeout: Duration) -> Self {
        Self::spawn(stdin_lines(), events, timeout)
    }
}

/// Read stdin on a plain thread so a pending read never holds up
/// runtime shutdown
fn stdin_lines() -> LineReceiver {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("stdin read failed: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

impl SpeechEngine for ConsoleAsr {
    fn start(&self) -> Result<()> {
        if !self.active.send_replace(true) {
            debug!("🎙️ Listening");
        }
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        if self.active.send_replace(false) {
            debug!("🔇 Microphone closed");
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        *self.active.borrow()
    }

    fn name(&self) -> &str {
        "console"
    }
}

async fn listen_loop(
    mut lines: LineReceiver,
    events: EventSender,
    active: Arc<watch::Sender<bool>>,
    mut active_rx: watch::Receiver<bool>,
    timeout: Duration,
) {
    loop {
        let listening = *active_rx.borrow_and_update();

        let line = if listening {
            tokio::select! {
                line = lines.recv() => line,
                _ = tokio::time::sleep(timeout) => {
                    active.send_replace(false);
                    if events.send(SpeechEvent::Timeout.into()).await.is_err() {
                        break;
                    }
                    continue;
                }
                _ = wait_until(&mut active_rx, false) => continue,
            }
        } else {
            tokio::select! {
                line = lines.recv() => line,
                _ = wait_until(&mut active_rx, true) => continue,
            }
        };

        let Some(line) = line else {
            info!("Input closed; recognizer stopping");
            active.send_replace(false);
            let _ = events.send(SpeechEvent::Closed.into()).await;
            break;
        };
        let Some(text) = extract_text(&line) else {
            continue;
        };

        if !listening && events.send(DialogEvent::Reactivate).await.is_err() {
            break;
        }
        let heard = SpeechEvent::Transcript(Transcript::final_text(&text));
        if events.send(heard.into()).await.is_err() {
            break;
        }
    }
}

async fn wait_until(rx: &mut watch::Receiver<bool>, on: bool) {
    let _ = rx.wait_for(|active| *active == on).await;
}

/// Trim a typed line, filtering empty results
fn extract_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
