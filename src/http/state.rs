use crate::evaluate::EvaluationDispatcher;
use crate::punctuate::PunctuationClient;
use crate::session::RecognitionSession;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single recognition session behind the start/stop toggle
    pub session: Arc<RecognitionSession>,

    /// Evaluation dispatcher holding the single live result slot
    pub dispatcher: Arc<EvaluationDispatcher>,

    /// Upstream completion client for punctuation restoration
    pub punctuation: Arc<PunctuationClient>,
}

impl AppState {
    pub fn new(
        session: Arc<RecognitionSession>,
        dispatcher: Arc<EvaluationDispatcher>,
        punctuation: Arc<PunctuationClient>,
    ) -> Self {
        Self {
            session,
            dispatcher,
            punctuation,
        }
    }
}
