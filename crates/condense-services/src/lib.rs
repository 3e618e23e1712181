//! Condense external-service clients.
//!
//! The summarization stage talks to the generative-model collaborator behind
//! the [`SummaryProvider`] trait; [`GeminiService`] is the production
//! implementation.

pub mod gemini;
pub mod prompt;

pub use gemini::{GeminiService, SummarizeError, SummaryProvider};
pub use prompt::{build_prompt, SUMMARY_SYSTEM_PROMPT};
