//! # Moneta Core
//!
//! Domain types, traits, and error definitions for the Moneta finance
//! assistant. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The generative-model backend is defined as a trait here; the concrete
//! HTTP client lives in its own crate. This keeps the query-understanding
//! pipeline (detection, simulation, retrieval, prompt assembly) fully
//! testable without a network and gives the workspace a clean dependency
//! graph (all crates depend inward on core).

pub mod error;
pub mod intent;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, RetrievalError, SimulationError};
pub use intent::{CompoundInterestArgs, EmergencyFundArgs, Intent};
pub use message::{ChatTurn, Conversation, ConversationId, Role};
pub use provider::{CompletionRequest, CompletionResponse, Provider};
