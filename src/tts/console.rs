//! Console TTS: prints the prompt instead of speaking it

use super::{PlaybackStream, SynthesisEngine};
use crate::dialog::PlaybackKind;
use futures::stream::{self, StreamExt};

#[derive(Debug, Default)]
pub struct ConsoleEngine;

impl ConsoleEngine {
    pub fn new() -> Self {
        Self
    }
}

impl SynthesisEngine for ConsoleEngine {
    fn synthesize(&self, text: &str) -> PlaybackStream {
        let text = text.to_string();
        stream::once(async move {
            println!("🍕 {}", text);
            PlaybackKind::Started
        })
        .chain(stream::iter([PlaybackKind::Complete]))
        .boxed()
    }

    fn name(&self) -> &str {
        "console"
    }
}
