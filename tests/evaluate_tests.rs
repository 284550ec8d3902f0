// Tests for the evaluation dispatcher: empty-input guards, canned
// responses, and the latest-request-wins result slot.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use brainwave::evaluate::{
    EvaluateError, EvaluationDispatcher, EvaluationKind, Evaluator, SimulatedEvaluator,
};

/// Evaluator that counts invocations and echoes its input after a delay.
struct EchoEvaluator {
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

#[async_trait]
impl Evaluator for EchoEvaluator {
    async fn evaluate(&self, _kind: EvaluationKind, text: &str) -> Result<String, EvaluateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(format!("echo:{}", text))
    }
}

fn echo_dispatcher(delay: Duration) -> (Arc<EvaluationDispatcher>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let dispatcher = EvaluationDispatcher::new(Box::new(EchoEvaluator {
        calls: Arc::clone(&calls),
        delay,
    }));
    (Arc::new(dispatcher), calls)
}

#[tokio::test]
async fn test_empty_input_messages_are_exact() {
    let (dispatcher, calls) = echo_dispatcher(Duration::ZERO);

    let cases = [
        (
            EvaluationKind::AskAi,
            "Please enter some text before asking AI.",
        ),
        (
            EvaluationKind::Correctness,
            "Please enter some text before checking correctness.",
        ),
        (
            EvaluationKind::Readability,
            "Please enter some text before assessing readability.",
        ),
    ];

    for (kind, message) in cases {
        let err = dispatcher.evaluate(kind, "").await.unwrap_err();
        assert!(matches!(err, EvaluateError::EmptyInput(_)));
        assert_eq!(err.to_string(), message);
    }

    // The backend was never invoked and no result was stored.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(dispatcher.latest_result().await.is_none());
}

#[tokio::test]
async fn test_whitespace_only_input_is_rejected() {
    let (dispatcher, calls) = echo_dispatcher(Duration::ZERO);

    let err = dispatcher
        .evaluate(EvaluationKind::Readability, "   \t\n")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Please enter some text before assessing readability."
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_simulated_evaluator_canned_responses() -> Result<()> {
    let dispatcher = EvaluationDispatcher::new(Box::new(SimulatedEvaluator::new(
        Duration::from_millis(10),
    )));

    let cases = [
        (EvaluationKind::Readability, "Readability Score: Good"),
        (EvaluationKind::Correctness, "No correctness issues found."),
        (EvaluationKind::AskAi, "This is a response from Ask AI."),
    ];

    for (kind, response) in cases {
        let result = dispatcher
            .evaluate(kind, "some transcript")
            .await?
            .expect("result should be applied");

        assert_eq!(result.kind, kind);
        assert_eq!(result.text, response);

        let stored = dispatcher.latest_result().await.expect("stored result");
        assert_eq!(stored.text, response);
    }

    Ok(())
}

#[tokio::test]
async fn test_exactly_one_backend_call_per_request() -> Result<()> {
    let (dispatcher, calls) = echo_dispatcher(Duration::ZERO);

    dispatcher
        .evaluate(EvaluationKind::Correctness, "check me")
        .await?;

    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_superseded_request_result_is_discarded() -> Result<()> {
    let (dispatcher, _calls) = echo_dispatcher(Duration::from_millis(50));

    // First request starts, then a second one supersedes it while the
    // first is still sleeping in the backend.
    let first = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move { dispatcher.evaluate(EvaluationKind::AskAi, "first").await })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;

    let second = dispatcher.evaluate(EvaluationKind::AskAi, "second").await?;
    assert_eq!(second.expect("latest request wins").text, "echo:second");

    // The first completion must not have taken the slot.
    let first = first.await??;
    assert!(first.is_none());

    let stored = dispatcher.latest_result().await.expect("stored result");
    assert_eq!(stored.text, "echo:second");

    Ok(())
}

#[test]
fn test_kind_labels() {
    assert_eq!(EvaluationKind::Readability.label(), "Readability");
    assert_eq!(EvaluationKind::Correctness.label(), "Correctness");
    assert_eq!(EvaluationKind::AskAi.label(), "Ask AI");
}
