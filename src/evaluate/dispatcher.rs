use super::kind::{EvaluateError, EvaluationKind, EvaluationResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// Backend that produces the text of an evaluation.
///
/// The shipped implementation is [`SimulatedEvaluator`]; a client for a
/// remote evaluation service can implement this trait and slot in
/// unchanged.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, kind: EvaluationKind, text: &str) -> Result<String, EvaluateError>;
}

/// Placeholder evaluator: answers after a fixed delay with a canned
/// response per kind.
pub struct SimulatedEvaluator {
    delay: Duration,
}

impl SimulatedEvaluator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedEvaluator {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl Evaluator for SimulatedEvaluator {
    async fn evaluate(&self, kind: EvaluationKind, _text: &str) -> Result<String, EvaluateError> {
        tokio::time::sleep(self.delay).await;

        let response = match kind {
            EvaluationKind::Readability => "Readability Score: Good",
            EvaluationKind::Correctness => "No correctness issues found.",
            EvaluationKind::AskAi => "This is a response from Ask AI.",
        };

        Ok(response.to_string())
    }
}

/// Dispatches evaluations and keeps the single live result.
///
/// Each request gets a monotonically increasing id; only the completion
/// matching the latest id is stored, so a slow earlier request cannot
/// overwrite a newer result.
pub struct EvaluationDispatcher {
    evaluator: Box<dyn Evaluator>,
    next_request: AtomicU64,
    latest_request: AtomicU64,
    result: Mutex<Option<EvaluationResult>>,
}

impl EvaluationDispatcher {
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            evaluator,
            next_request: AtomicU64::new(0),
            latest_request: AtomicU64::new(0),
            result: Mutex::new(None),
        }
    }

    /// Run one evaluation over `text`.
    ///
    /// Empty or whitespace-only input fails immediately with the exact
    /// per-kind message and the evaluator is never invoked. Returns the
    /// stored result, or `None` when a newer request superseded this one
    /// while it was in flight.
    pub async fn evaluate(
        &self,
        kind: EvaluationKind,
        text: &str,
    ) -> Result<Option<EvaluationResult>, EvaluateError> {
        if text.trim().is_empty() {
            return Err(EvaluateError::EmptyInput(kind));
        }

        let id = self.next_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest_request.fetch_max(id, Ordering::SeqCst);

        info!("Evaluating {} (request {})", kind.label(), id);

        let text = self.evaluator.evaluate(kind, text).await?;

        if self.latest_request.load(Ordering::SeqCst) != id {
            info!("Discarding superseded {} result (request {})", kind.label(), id);
            return Ok(None);
        }

        let result = EvaluationResult { kind, text };
        *self.result.lock().await = Some(result.clone());

        Ok(Some(result))
    }

    /// The most recently stored result, if any
    pub async fn latest_result(&self) -> Option<EvaluationResult> {
        self.result.lock().await.clone()
    }
}
