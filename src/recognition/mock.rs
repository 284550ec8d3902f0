//! Scripted recognition provider for tests and demos.
//!
//! `MockProvider::new` returns the provider together with a `MockHandle`;
//! the handle pushes result batches, error codes, and end events into the
//! stream the session is consuming, playing the role of the platform
//! recognition engine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::provider::{
    RecognitionConfig, RecognitionError, RecognitionEvent, RecognitionProvider,
    RecognizedSegment, TranscriptUpdate,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

struct MockShared {
    /// Sender for the currently active stream, if any
    sender: Mutex<Option<mpsc::Sender<RecognitionEvent>>>,

    /// Update sequence counter, monotonically increasing across restarts
    sequence: AtomicU64,

    /// Language the most recent start was configured with
    started_language: Mutex<Option<String>>,
}

/// Scripted recognition provider
pub struct MockProvider {
    shared: Arc<MockShared>,
    listening: bool,
}

/// Test-side handle that feeds events into a `MockProvider` stream
pub struct MockHandle {
    shared: Arc<MockShared>,
}

impl MockProvider {
    pub fn new() -> (Self, MockHandle) {
        let shared = Arc::new(MockShared {
            sender: Mutex::new(None),
            sequence: AtomicU64::new(0),
            started_language: Mutex::new(None),
        });

        let provider = Self {
            shared: Arc::clone(&shared),
            listening: false,
        };

        (provider, MockHandle { shared })
    }
}

#[async_trait]
impl RecognitionProvider for MockProvider {
    async fn start(
        &mut self,
        config: RecognitionConfig,
    ) -> Result<mpsc::Receiver<RecognitionEvent>, RecognitionError> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        *self.shared.sender.lock().unwrap() = Some(tx);
        *self.shared.started_language.lock().unwrap() = Some(config.language);
        self.listening = true;

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), RecognitionError> {
        self.listening = false;

        // The platform confirms the stop asynchronously with an end event.
        let sender = self.shared.sender.lock().unwrap().take();
        if let Some(tx) = sender {
            let _ = tx.send(RecognitionEvent::End).await;
        }

        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn name(&self) -> &str {
        "mock"
    }
}

impl MockHandle {
    fn sender(&self) -> Option<mpsc::Sender<RecognitionEvent>> {
        self.shared.sender.lock().unwrap().clone()
    }

    /// Deliver a result batch; sequence numbers are assigned automatically.
    pub async fn push_update(&self, segments: Vec<RecognizedSegment>) {
        let sequence = self.shared.sequence.fetch_add(1, Ordering::SeqCst);

        if let Some(tx) = self.sender() {
            let _ = tx
                .send(RecognitionEvent::Results(TranscriptUpdate {
                    sequence,
                    segments,
                }))
                .await;
        }
    }

    /// Deliver a single final segment
    pub async fn push_final(&self, text: &str) {
        self.push_update(vec![RecognizedSegment {
            text: text.to_string(),
            is_final: true,
        }])
        .await;
    }

    /// Deliver a single interim segment
    pub async fn push_interim(&self, text: &str) {
        self.push_update(vec![RecognizedSegment {
            text: text.to_string(),
            is_final: false,
        }])
        .await;
    }

    /// Deliver a platform error code; the stream is over after this.
    pub async fn fail(&self, code: &str) {
        let sender = self.shared.sender.lock().unwrap().take();
        if let Some(tx) = sender {
            let _ = tx.send(RecognitionEvent::Error(code.to_string())).await;
        }
    }

    /// End the stream without an explicit stop (the engine gave up on its own).
    pub async fn end(&self) {
        let sender = self.shared.sender.lock().unwrap().take();
        if let Some(tx) = sender {
            let _ = tx.send(RecognitionEvent::End).await;
        }
    }

    /// Language the most recent start was configured with
    pub fn started_language(&self) -> Option<String> {
        self.shared.started_language.lock().unwrap().clone()
    }
}
