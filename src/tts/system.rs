//! System TTS engine (spd-say or espeak-ng)

use super::{PlaybackStream, SynthesisEngine};
use crate::dialog::PlaybackKind;
use anyhow::Result;
use futures::stream::{self, StreamExt};
use tokio::process::{Child, Command};
use tracing::debug;

#[derive(Debug)]
pub struct SystemEngine;

impl Default for SystemEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemEngine {
    pub fn new() -> Self {
        Self
    }
}

enum Step {
    Spawn(String),
    Wait(Child),
    Done,
}

impl SynthesisEngine for SystemEngine {
    fn synthesize(&self, text: &str) -> PlaybackStream {
        stream::unfold(Step::Spawn(text.to_string()), |step| async move {
            match step {
                Step::Spawn(text) => match spawn_speaker(&text) {
                    Ok(child) => Some((PlaybackKind::Started, Step::Wait(child))),
                    Err(e) => Some((PlaybackKind::Error(e.to_string()), Step::Done)),
                },
                Step::Wait(mut child) => {
                    let kind = match child.wait().await {
                        Ok(status) if status.success() => PlaybackKind::Complete,
                        Ok(status) => PlaybackKind::Error(format!("speaker exited with {}", status)),
                        Err(e) => PlaybackKind::Error(e.to_string()),
                    };
                    Some((kind, Step::Done))
                }
                Step::Done => None,
            }
        })
        .boxed()
    }

    fn name(&self) -> &str {
        "system"
    }
}

/// Try spd-say (speech-dispatcher) then espeak-ng; both block until spoken.
/// The speaker is killed when the playback stream is dropped.
fn spawn_speaker(text: &str) -> Result<Child> {
    debug!("System speaking: {}", text);

    if let Ok(child) = Command::new("spd-say")
        .arg("--wait")
        .arg(text)
        .kill_on_drop(true)
        .spawn()
    {
        return Ok(child);
    }

    if let Ok(child) = Command::new("espeak-ng")
        .arg(text)
        .kill_on_drop(true)
        .spawn()
    {
        return Ok(child);
    }

    Err(anyhow::anyhow!(
        "No system TTS command found (tried spd-say, espeak-ng)"
    ))
}
