//! TTS (Text-to-Speech) Module
//!
//! Provides a unified interface for multiple TTS backends. Each
//! synthesis returns a stream of playback signals that the session feeds
//! back into the dialog queue.

use crate::config::Config;
use crate::dialog::PlaybackKind;
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::{info, warn};

pub mod console;
pub mod system;

/// Playback signals for one synthesized utterance
pub type PlaybackStream = BoxStream<'static, PlaybackKind>;

/// Trait for TTS engines
pub trait SynthesisEngine: Send + Sync + std::fmt::Debug {
    /// Speak the given text, reporting playback progress
    fn synthesize(&self, text: &str) -> PlaybackStream;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured TTS engine
pub fn create_engine(config: &Config) -> Arc<dyn SynthesisEngine> {
    info!("🛠️ Creating TTS engine: {}", config.tts_engine);
    let engine: Arc<dyn SynthesisEngine> = match config.tts_engine.as_str() {
        "system" => Arc::new(system::SystemEngine::new()),
        "console" => Arc::new(console::ConsoleEngine::new()),
        _ => {
            warn!(
                "  - Unknown engine '{}', falling back to console",
                config.tts_engine
            );
            Arc::new(console::ConsoleEngine::new())
        }
    };
    info!("✅ TTS engine '{}' initialized", engine.name());
    engine
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_fallback() {
        let mut config = Config::default();
        config.tts_engine = "piper".to_string();
        assert_eq!(create_engine(&config).name(), "console");

        config.tts_engine = "system".to_string();
        assert_eq!(create_engine(&config).name(), "system");
    }
}
