//! Recognition session management
//!
//! This module provides the `RecognitionSession` abstraction that manages:
//! - The speech-recognition stream lifecycle (start/stop/toggle)
//! - Transcript accumulation (committed text plus interim tail)
//! - The elapsed-time counter tied to the active state
//! - Language selection and session statistics

mod config;
mod session;
mod stats;
mod transcript;

pub use config::SessionConfig;
pub use session::RecognitionSession;
pub use stats::{format_elapsed, SessionStats};
pub use transcript::TranscriptBuffer;
