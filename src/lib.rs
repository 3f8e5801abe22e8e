//! PizzaTalk Library
//!
//! Core modules for the PizzaTalk spoken ordering dialog.

pub mod asr;
pub mod config;
pub mod dialog;
pub mod error;
pub mod nlu;
pub mod provision;
pub mod session;
pub mod tts;
pub mod utils;

pub use dialog::{MicAuthorization, Orchestrator};
pub use error::{DialogError, DialogResult};
pub use session::{Engines, Session};
