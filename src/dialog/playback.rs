//! Playback Reactivation Policy
//!
//! Decides, once the synthesizer finishes, whether the microphone reopens.

use super::events::PlaybackKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterPlayback {
    /// Reopen the microphone
    Reactivate,
    /// End the conversation
    End,
    /// Not a completion; nothing changes
    Stay,
}

pub fn after_playback(kind: &PlaybackKind, continue_conversation: bool) -> AfterPlayback {
    match kind {
        PlaybackKind::Complete if continue_conversation => AfterPlayback::Reactivate,
        PlaybackKind::Complete => AfterPlayback::End,
        PlaybackKind::Started | PlaybackKind::Error(_) => AfterPlayback::Stay,
    }
}
