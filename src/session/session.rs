use super::config::SessionConfig;
use super::stats::{format_elapsed, SessionStats};
use super::transcript::TranscriptBuffer;
use crate::recognition::{
    RecognitionConfig, RecognitionError, RecognitionEvent, RecognitionProvider,
};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A recognition session that manages the speech stream, the running
/// transcript, and the elapsed-time counter.
///
/// The public control is the start/stop toggle; starting while already
/// active is a no-op. Stopping waits for the provider to confirm the end
/// of the stream before the session reports inactive. A platform error
/// always deactivates the session and records a user-visible message;
/// nothing is retried automatically.
pub struct RecognitionSession {
    /// Session configuration
    config: SessionConfig,

    /// Recognition provider the session consumes events from
    provider: Mutex<Box<dyn RecognitionProvider>>,

    /// Stored language preference, applied at the next start
    language: Mutex<String>,

    /// Whether recognition is currently active
    is_active: Arc<AtomicBool>,

    /// Seconds counted while the session has been active
    elapsed_secs: Arc<AtomicU64>,

    /// When the current or most recent run started
    started_at: Mutex<Option<DateTime<Utc>>>,

    /// Accumulated transcript
    transcript: Arc<Mutex<TranscriptBuffer>>,

    /// Message from the last recognition failure, if any
    last_error: Arc<Mutex<Option<String>>>,

    /// Handle for the event-consuming task
    event_task_handle: Mutex<Option<JoinHandle<()>>>,

    /// Handle for the one-per-second ticker task
    ticker_handle: Mutex<Option<JoinHandle<()>>>,
}

impl RecognitionSession {
    /// Create a new recognition session around the given provider.
    pub fn new(config: SessionConfig, provider: Box<dyn RecognitionProvider>) -> Self {
        info!("Creating recognition session: {}", config.session_id);

        let language = config.language.clone();

        Self {
            config,
            provider: Mutex::new(provider),
            language: Mutex::new(language),
            is_active: Arc::new(AtomicBool::new(false)),
            elapsed_secs: Arc::new(AtomicU64::new(0)),
            started_at: Mutex::new(None),
            transcript: Arc::new(Mutex::new(TranscriptBuffer::new())),
            last_error: Arc::new(Mutex::new(None)),
            event_task_handle: Mutex::new(None),
            ticker_handle: Mutex::new(None),
        }
    }

    /// Start recognition, optionally overriding the stored language.
    pub async fn start(&self, language: Option<String>) -> Result<(), RecognitionError> {
        if self.is_active.load(Ordering::SeqCst) {
            warn!("Recognition already started");
            return Ok(());
        }

        let language = match language {
            Some(lang) => {
                *self.language.lock().await = lang.clone();
                lang
            }
            None => self.language.lock().await.clone(),
        };

        info!(
            "Starting recognition session: {} ({})",
            self.config.session_id, language
        );

        // A fresh run starts from an empty transcript and a zeroed counter.
        self.transcript.lock().await.reset();
        self.elapsed_secs.store(0, Ordering::SeqCst);
        *self.last_error.lock().await = None;

        let mut events = self
            .provider
            .lock()
            .await
            .start(RecognitionConfig::for_language(language))
            .await?;

        self.is_active.store(true, Ordering::SeqCst);
        *self.started_at.lock().await = Some(Utc::now());

        // Spawn the event-consuming task: applies updates until the stream
        // errors or ends, then marks the session inactive.
        let is_active = Arc::clone(&self.is_active);
        let transcript = Arc::clone(&self.transcript);
        let last_error = Arc::clone(&self.last_error);
        let session_id = self.config.session_id.clone();

        let event_task = tokio::spawn(async move {
            info!("Recognition event task started");

            while let Some(event) = events.recv().await {
                match event {
                    RecognitionEvent::Results(update) => {
                        transcript.lock().await.apply(&update);
                    }
                    RecognitionEvent::Error(code) => {
                        warn!("Recognition error for {}: {}", session_id, code);
                        *last_error.lock().await =
                            Some(format!("Speech recognition error: {}", code));
                        break;
                    }
                    RecognitionEvent::End => break,
                }
            }

            is_active.store(false, Ordering::SeqCst);
            info!("Recognition event task stopped");
        });

        {
            let mut handle = self.event_task_handle.lock().await;
            *handle = Some(event_task);
        }

        // Spawn the ticker: one increment per second while the session
        // stays active. The count is retained when the session stops.
        let is_active = Arc::clone(&self.is_active);
        let elapsed = Arc::clone(&self.elapsed_secs);

        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
            interval.tick().await; // first tick completes immediately

            loop {
                interval.tick().await;
                if !is_active.load(Ordering::SeqCst) {
                    break;
                }
                elapsed.fetch_add(1, Ordering::SeqCst);
            }
        });

        {
            let mut handle = self.ticker_handle.lock().await;
            if let Some(old) = handle.replace(ticker) {
                old.abort();
            }
        }

        info!("Recognition session started");

        Ok(())
    }

    /// Stop recognition.
    ///
    /// Returns once the provider has confirmed the end of the stream and
    /// the event task has drained. The elapsed counter keeps its value
    /// until the next start.
    pub async fn stop(&self) -> Result<(), RecognitionError> {
        if !self.is_active.load(Ordering::SeqCst) {
            warn!("Recognition not active");
            return Ok(());
        }

        info!("Stopping recognition session: {}", self.config.session_id);

        if let Err(e) = self.provider.lock().await.stop().await {
            // The stream is unusable; force the session out of the active
            // state rather than leaving it stuck in progress.
            self.is_active.store(false, Ordering::SeqCst);
            if let Some(task) = self.event_task_handle.lock().await.take() {
                task.abort();
            }
            if let Some(task) = self.ticker_handle.lock().await.take() {
                task.abort();
            }
            return Err(e);
        }

        // Wait for the event task to observe the end event.
        {
            let mut handle = self.event_task_handle.lock().await;
            if let Some(task) = handle.take() {
                if let Err(e) = task.await {
                    warn!("Recognition event task panicked: {}", e);
                }
            }
        }

        {
            let mut handle = self.ticker_handle.lock().await;
            if let Some(task) = handle.take() {
                task.abort();
            }
        }

        info!("Recognition session stopped");

        Ok(())
    }

    /// The public start/stop control.
    ///
    /// Returns whether the session is active after the toggle.
    pub async fn toggle(&self) -> Result<bool, RecognitionError> {
        if self.is_active.load(Ordering::SeqCst) {
            self.stop().await?;
            Ok(false)
        } else {
            self.start(None).await?;
            Ok(true)
        }
    }

    /// Switch recognition language.
    ///
    /// An active session is stopped first and restarted in the new language
    /// once the provider has confirmed the end of the old stream, so two
    /// streams never run at once. An inactive session only updates the
    /// stored preference.
    pub async fn change_language(
        &self,
        language: impl Into<String>,
    ) -> Result<(), RecognitionError> {
        let language = language.into();

        if self.is_active.load(Ordering::SeqCst) {
            info!("Restarting recognition in {}", language);
            self.stop().await?;
            self.start(Some(language)).await
        } else {
            *self.language.lock().await = language;
            Ok(())
        }
    }

    /// Whether recognition is currently active
    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    /// Seconds counted while the session has been active
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs.load(Ordering::SeqCst)
    }

    /// Get current session statistics
    pub async fn stats(&self) -> SessionStats {
        let elapsed_secs = self.elapsed_secs.load(Ordering::SeqCst);
        let segments_committed = self.transcript.lock().await.segments_committed();

        SessionStats {
            is_active: self.is_active.load(Ordering::SeqCst),
            language: self.language.lock().await.clone(),
            started_at: *self.started_at.lock().await,
            elapsed_secs,
            elapsed: format_elapsed(elapsed_secs),
            segments_committed,
            last_error: self.last_error.lock().await.clone(),
        }
    }

    /// Get a snapshot of the accumulated transcript
    pub async fn transcript(&self) -> TranscriptBuffer {
        self.transcript.lock().await.clone()
    }

    /// Message from the last recognition failure, if any
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }
}
