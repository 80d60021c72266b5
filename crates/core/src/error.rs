//! Error types for the Moneta domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Note that an incomplete tool detection (a user asked for a simulation but
//! did not give every number) is **not** an error — it is modeled as unset
//! fields on [`crate::intent::Intent`] and rendered by the caller as a
//! clarifying follow-up question.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Moneta operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Simulation errors ---
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    // --- Retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors from the deterministic financial calculators.
#[derive(Debug, Clone, Error)]
pub enum SimulationError {
    /// A calculator precondition was violated (negative amount, zero
    /// expense, negative month count, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors from the lexical retriever.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The knowledge-base directory is missing or a document in it could
    /// not be read. The retriever never synthesizes a fallback corpus;
    /// callers decide whether to degrade to an empty context.
    #[error("Knowledge base unavailable at {path}: {reason}")]
    CorpusUnavailable { path: PathBuf, reason: String },
}

/// Errors from the generative-model collaborator.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}
