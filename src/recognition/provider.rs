use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors reported by a recognition provider.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The platform offers no speech-recognition capability.
    #[error("speech recognition is not supported on this platform")]
    UnsupportedCapability,

    /// The platform reported an error code during recognition.
    #[error("speech recognition error: {0}")]
    Platform(String),
}

/// A single recognized fragment delivered by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedSegment {
    /// Transcribed text
    pub text: String,

    /// Whether the provider guarantees this text will not change further
    pub is_final: bool,
}

/// One incremental result batch.
///
/// The sequence number is assigned by the provider and increases with every
/// update, so a batch that was already applied can be recognized and skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptUpdate {
    /// Provider-assigned update number, monotonically increasing
    pub sequence: u64,

    /// Segments in this update, in recognition order
    pub segments: Vec<RecognizedSegment>,
}

/// Events emitted by a recognition provider
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// An incremental result batch
    Results(TranscriptUpdate),

    /// Platform-reported error code; the stream is over after this
    Error(String),

    /// The provider confirmed the stream has ended
    End,
}

/// Configuration handed to a provider when recognition starts
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    /// BCP-47 language tag (e.g. "en-US", "zh-CN")
    pub language: String,

    /// Keep recognizing until explicitly stopped
    pub continuous: bool,

    /// Deliver tentative (interim) results as they form
    pub interim_results: bool,

    /// Number of alternative transcriptions per result
    pub max_alternatives: u8,
}

impl RecognitionConfig {
    /// Continuous, interim-enabled recognition in the given language.
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            continuous: true,
            interim_results: true,
            max_alternatives: 1,
        }
    }
}

/// Speech-recognition provider trait
///
/// Implementations:
/// - Native: platform speech engine
/// - Mock: scripted events (for testing and demos)
/// - Remote: streaming recognition service
#[async_trait]
pub trait RecognitionProvider: Send + Sync {
    /// Begin recognizing speech
    ///
    /// Returns a channel receiver that will receive recognition events
    /// until the stream errors or ends.
    async fn start(
        &mut self,
        config: RecognitionConfig,
    ) -> Result<mpsc::Receiver<RecognitionEvent>, RecognitionError>;

    /// Ask the provider to end the stream
    ///
    /// Confirmation arrives asynchronously as a `RecognitionEvent::End`
    /// on the event channel.
    async fn stop(&mut self) -> Result<(), RecognitionError>;

    /// Check if the provider is currently recognizing
    fn is_listening(&self) -> bool;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Recognition provider factory
pub struct RecognitionProviderFactory;

impl RecognitionProviderFactory {
    /// Create a recognition provider based on the configured source
    pub fn create(
        source: RecognitionSource,
    ) -> Result<Box<dyn RecognitionProvider>, RecognitionError> {
        match source {
            RecognitionSource::Native => Ok(Box::new(NativeProvider)),

            RecognitionSource::Mock => {
                let (provider, _handle) = super::mock::MockProvider::new();
                Ok(Box::new(provider))
            }

            RecognitionSource::Remote(endpoint) => {
                todo!("Create remote streaming provider for endpoint: {endpoint}")
            }
        }
    }
}

/// Recognition source type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionSource {
    /// Platform speech engine
    Native,
    /// Scripted provider (for testing and demos)
    Mock,
    /// Remote streaming recognition service
    Remote(String),
}

/// Stand-in for a platform speech engine.
///
/// No native engine is wired on the targets this service builds for, so
/// starting recognition reports `UnsupportedCapability`.
#[derive(Debug, Default)]
pub struct NativeProvider;

#[async_trait]
impl RecognitionProvider for NativeProvider {
    async fn start(
        &mut self,
        _config: RecognitionConfig,
    ) -> Result<mpsc::Receiver<RecognitionEvent>, RecognitionError> {
        Err(RecognitionError::UnsupportedCapability)
    }

    async fn stop(&mut self) -> Result<(), RecognitionError> {
        Ok(())
    }

    fn is_listening(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "native"
    }
}
