use crate::recognition::TranscriptUpdate;

/// Running transcript for one recognition session.
///
/// Final segments are appended permanently in receipt order; the interim
/// tail is replaced wholesale by each update, never appended. Updates carry
/// provider sequence numbers, so re-applying a batch that was already
/// applied leaves the transcript unchanged.
#[derive(Debug, Default, Clone)]
pub struct TranscriptBuffer {
    /// Accumulated final text
    committed: String,

    /// Tentative tail from the latest update; may still change
    interim: String,

    /// Sequence number of the last applied update
    last_sequence: Option<u64>,

    /// Number of final segments committed so far
    segments_committed: usize,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one recognition update.
    ///
    /// Finals in the batch are committed in order; the interim tail becomes
    /// the concatenation of the batch's non-final segments (empty when there
    /// are none). A sequence number at or below the last applied one means
    /// the batch was already processed and is skipped.
    pub fn apply(&mut self, update: &TranscriptUpdate) {
        if let Some(last) = self.last_sequence {
            if update.sequence <= last {
                return;
            }
        }
        self.last_sequence = Some(update.sequence);

        self.interim.clear();
        for segment in &update.segments {
            if segment.is_final {
                self.committed.push_str(&segment.text);
                self.segments_committed += 1;
            } else {
                self.interim.push_str(&segment.text);
            }
        }
    }

    /// Displayed transcript: committed text followed by the interim tail.
    pub fn display(&self) -> String {
        format!("{}{}", self.committed, self.interim)
    }

    /// Committed (final) text only
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Current interim tail, empty when the latest update had no interim
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Number of final segments committed so far
    pub fn segments_committed(&self) -> usize {
        self.segments_committed
    }

    /// Drop all accumulated text; the next run starts from scratch.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.interim.clear();
        self.last_sequence = None;
        self.segments_committed = 0;
    }
}
