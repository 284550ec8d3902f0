//! HTTP API for the browser client
//!
//! This module provides the REST surface the dictation page talks to:
//! - POST /session/toggle - Start or stop the recognition session
//! - POST /session/language - Switch recognition language
//! - GET /session/status - Session state, timer, language
//! - GET /session/transcript - Current transcript (committed + interim)
//! - POST /evaluate - Run a text-quality evaluation
//! - POST /punctuate - Restore punctuation via the completion API
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
