use serde::{Deserialize, Serialize};

/// Configuration for a recognition session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-2026-08-06-dictation")
    pub session_id: String,

    /// BCP-47 language tag recognition starts in (e.g. "en-US", "zh-CN")
    pub language: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            language: "en-US".to_string(),
        }
    }
}
