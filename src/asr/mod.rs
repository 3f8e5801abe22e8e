//! ASR (Automatic Speech Recognition) Module
//!
//! The dialog core only needs to open and close the microphone; the
//! recognizer pushes its transcripts, timeouts and errors into the
//! session's event queue on its own.
//! - Console: typed lines stand in for spoken utterances

pub mod console;

use anyhow::Result;

pub use console::ConsoleAsr;

/// Trait for speech recognizers
pub trait SpeechEngine: Send + Sync {
    /// Open the microphone for a listening turn. Calling it while
    /// already listening is allowed and keeps the turn open.
    fn start(&self) -> Result<()>;

    /// Close the microphone
    fn stop(&self) -> Result<()>;

    /// Check if currently listening
    fn is_active(&self) -> bool {
        false
    }

    /// Get the engine name
    fn name(&self) -> &str;
}
