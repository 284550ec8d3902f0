use anyhow::{bail, Result};
use brainwave::recognition::{RecognitionProviderFactory, RecognitionSource};
use brainwave::{
    AppState, Config, EvaluationDispatcher, PunctuationClient, RecognitionSession, SessionConfig,
    SimulatedEvaluator,
};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "brainwave", about = "Live dictation service with punctuation restoration")]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value = "config/brainwave")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);

    let source = match cfg.recognition.provider.as_str() {
        "native" => RecognitionSource::Native,
        "mock" => RecognitionSource::Mock,
        other => bail!("unknown recognition provider: {}", other),
    };
    let provider = RecognitionProviderFactory::create(source)?;

    let session_config = SessionConfig {
        language: cfg.recognition.language.clone(),
        ..SessionConfig::default()
    };
    let session = Arc::new(RecognitionSession::new(session_config, provider));

    let dispatcher = Arc::new(EvaluationDispatcher::new(Box::new(
        SimulatedEvaluator::default(),
    )));

    // The credential is resolved once here; a missing key fails individual
    // punctuation requests, not the process.
    let api_key = std::env::var(&cfg.upstream.api_key_env).ok();
    if api_key.as_deref().map_or(true, str::is_empty) {
        warn!(
            "{} is not set; /punctuate requests will be rejected",
            cfg.upstream.api_key_env
        );
    }
    let punctuation = Arc::new(PunctuationClient::new(cfg.upstream.clone(), api_key));

    let state = AppState::new(session, dispatcher, punctuation);
    let app = brainwave::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
