//! PizzaTalk Error Types
//!
//! Centralized error handling for the dialog core and its engines.

use thiserror::Error;

/// Central error type for PizzaTalk
#[derive(Error, Debug)]
pub enum DialogError {
    #[error("ASR timeout")]
    RecognitionTimeout,

    #[error("ASR engine error: {0}")]
    Recognition(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("TTS engine error: {0}")]
    Synthesis(String),

    #[error("Record permission not granted; voice control disabled")]
    NotAuthorized,

    #[error("Model provisioning error: {0}")]
    Provisioning(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event queue closed")]
    ChannelClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for PizzaTalk operations
pub type DialogResult<T> = Result<T, DialogError>;
