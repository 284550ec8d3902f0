use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a recognition session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether recognition is currently active
    pub is_active: bool,

    /// Language the session is (or will be) recognizing in
    pub language: String,

    /// When the current or most recent run started
    pub started_at: Option<DateTime<Utc>>,

    /// Seconds counted while the session has been active
    pub elapsed_secs: u64,

    /// `elapsed_secs` formatted as MM:SS
    pub elapsed: String,

    /// Number of final segments committed to the transcript
    pub segments_committed: usize,

    /// Message from the last recognition failure, if any
    pub last_error: Option<String>,
}

/// Format a second count as zero-padded `MM:SS`.
///
/// Minutes do not wrap at 60; past 99 minutes the minute field simply
/// widens ("120:00").
pub fn format_elapsed(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
