pub mod config;
pub mod evaluate;
pub mod http;
pub mod punctuate;
pub mod recognition;
pub mod session;

pub use config::{Config, UpstreamConfig};
pub use evaluate::{
    EvaluateError, EvaluationDispatcher, EvaluationKind, EvaluationResult, Evaluator,
    SimulatedEvaluator,
};
pub use http::{create_router, AppState};
pub use punctuate::{PunctuateError, PunctuationClient};
pub use recognition::{
    MockHandle, MockProvider, RecognitionConfig, RecognitionError, RecognitionEvent,
    RecognitionProvider, RecognitionProviderFactory, RecognitionSource, RecognizedSegment,
    TranscriptUpdate,
};
pub use session::{RecognitionSession, SessionConfig, SessionStats, TranscriptBuffer};
