//! Punctuation restoration through a remote completion API
//!
//! Stateless: each request makes exactly one upstream chat-completion
//! call and sanitizes the response. Nothing is retried or persisted.

mod client;

pub use client::{
    extract_result, strip_enclosing_quotes, system_instruction, ChatResponse, PunctuateError,
    PunctuationClient,
};
