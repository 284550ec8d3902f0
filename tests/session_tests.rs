// Integration tests for the recognition session state machine
//
// Driven through the mock provider: each test pushes recognition events
// and observes the session state, the transcript, and the timer.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use brainwave::recognition::{
    MockHandle, MockProvider, RecognitionError, RecognitionProviderFactory, RecognitionSource,
};
use brainwave::session::{format_elapsed, RecognitionSession, SessionConfig};

fn new_session() -> (Arc<RecognitionSession>, MockHandle) {
    let (provider, handle) = MockProvider::new();
    let config = SessionConfig {
        language: "en-US".to_string(),
        ..SessionConfig::default()
    };
    let session = Arc::new(RecognitionSession::new(config, Box::new(provider)));
    (session, handle)
}

/// Poll until the displayed transcript matches, or a second elapses.
async fn wait_for_transcript(session: &RecognitionSession, expected: &str) -> bool {
    for _ in 0..100 {
        if session.transcript().await.display() == expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Poll until the session reports inactive, or a second elapses.
async fn wait_for_inactive(session: &RecognitionSession) -> bool {
    for _ in 0..100 {
        if !session.is_active() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn test_start_activates_and_resets() -> Result<()> {
    let (session, handle) = new_session();

    session.start(None).await?;

    assert!(session.is_active());
    assert_eq!(session.elapsed_secs(), 0);
    assert_eq!(handle.started_language(), Some("en-US".to_string()));

    let stats = session.stats().await;
    assert!(stats.is_active);
    assert!(stats.started_at.is_some());
    assert!(stats.last_error.is_none());

    Ok(())
}

#[tokio::test]
async fn test_transcript_accumulation() -> Result<()> {
    let (session, handle) = new_session();
    session.start(None).await?;

    handle.push_final("hello").await;
    handle.push_interim("world").await;

    assert!(wait_for_transcript(&session, "helloworld").await);
    {
        let t = session.transcript().await;
        assert_eq!(t.committed(), "hello");
        assert_eq!(t.interim(), "world");
    }

    // The tentative tail finalizes; the committed text absorbs it.
    handle.push_final("world").await;

    assert!(wait_for_transcript(&session, "helloworld").await);
    let t = session.transcript().await;
    assert_eq!(t.committed(), "helloworld");
    assert_eq!(t.interim(), "");

    Ok(())
}

#[tokio::test]
async fn test_stop_waits_for_end_confirmation() -> Result<()> {
    let (session, handle) = new_session();
    session.start(None).await?;

    handle.push_final("hi").await;
    session.stop().await?;

    // stop() joins the event task, so the session is inactive once it returns.
    assert!(!session.is_active());

    // The transcript is retained until the next start.
    assert_eq!(session.transcript().await.display(), "hi");

    Ok(())
}

#[tokio::test]
async fn test_start_while_active_is_noop() -> Result<()> {
    let (session, handle) = new_session();
    session.start(None).await?;

    handle.push_final("hello").await;
    assert!(wait_for_transcript(&session, "hello").await);

    // Starting again must not reset the running session.
    session.start(None).await?;

    assert!(session.is_active());
    assert_eq!(session.transcript().await.display(), "hello");

    Ok(())
}

#[tokio::test]
async fn test_error_event_deactivates_and_surfaces_code() -> Result<()> {
    let (session, handle) = new_session();
    session.start(None).await?;

    handle.fail("no-speech").await;

    assert!(wait_for_inactive(&session).await);
    assert_eq!(
        session.last_error().await,
        Some("Speech recognition error: no-speech".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn test_natural_end_deactivates() -> Result<()> {
    let (session, handle) = new_session();
    session.start(None).await?;

    handle.end().await;

    assert!(wait_for_inactive(&session).await);
    assert!(session.last_error().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_toggle_flips_active_state() -> Result<()> {
    let (session, _handle) = new_session();

    assert!(session.toggle().await?);
    assert!(session.is_active());

    assert!(!session.toggle().await?);
    assert!(!session.is_active());

    Ok(())
}

#[tokio::test]
async fn test_change_language_inactive_stores_preference() -> Result<()> {
    let (session, handle) = new_session();

    session.change_language("zh-CN").await?;

    assert!(!session.is_active());
    assert_eq!(session.stats().await.language, "zh-CN");
    // The provider was never started.
    assert_eq!(handle.started_language(), None);

    Ok(())
}

#[tokio::test]
async fn test_change_language_active_restarts_stream() -> Result<()> {
    let (session, handle) = new_session();
    session.start(None).await?;

    handle.push_final("hello").await;
    assert!(wait_for_transcript(&session, "hello").await);

    session.change_language("zh-CN").await?;

    assert!(session.is_active());
    assert_eq!(handle.started_language(), Some("zh-CN".to_string()));
    assert_eq!(session.stats().await.language, "zh-CN");
    // The restart begins a fresh transcript.
    assert_eq!(session.transcript().await.display(), "");

    Ok(())
}

#[tokio::test]
async fn test_unsupported_capability_fails_start() {
    let provider = RecognitionProviderFactory::create(RecognitionSource::Native).unwrap();
    let session = RecognitionSession::new(SessionConfig::default(), provider);

    let err = session.start(None).await.unwrap_err();
    assert!(matches!(err, RecognitionError::UnsupportedCapability));
    assert!(!session.is_active());
}

#[tokio::test]
async fn test_timer_counts_and_is_retained_on_stop() -> Result<()> {
    let (session, _handle) = new_session();
    session.start(None).await?;

    tokio::time::sleep(Duration::from_millis(2200)).await;
    session.stop().await?;

    let elapsed = session.elapsed_secs();
    assert!((1..=3).contains(&elapsed), "elapsed was {}", elapsed);

    // Stopping retains the count; only the next start resets it.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(session.elapsed_secs(), elapsed);

    session.start(None).await?;
    assert_eq!(session.elapsed_secs(), 0);

    Ok(())
}

#[test]
fn test_format_elapsed() {
    assert_eq!(format_elapsed(0), "00:00");
    assert_eq!(format_elapsed(59), "00:59");
    assert_eq!(format_elapsed(60), "01:00");
    assert_eq!(format_elapsed(125), "02:05");
    // Minutes widen past 99 instead of wrapping.
    assert_eq!(format_elapsed(6000), "100:00");
}
