//! # Moneta Agent
//!
//! The query-understanding and context-assembly pipeline:
//!
//! 1. **Detect** — classify the utterance and extract numeric arguments
//!    (`moneta-tools`)
//! 2. **Simulate** — run the matching calculator, or compose a follow-up
//!    asking for the missing numbers ([`simulation`])
//! 3. **Retrieve** — rank knowledge-base chunks against the utterance
//!    (`moneta-retrieval`; always runs, independent of detection)
//! 4. **Assemble** — merge policy, context, recent history, and any
//!    simulation report into one prompt ([`prompt`])
//! 5. **Complete** — hand the prompt to the generative-model collaborator
//!    behind the [`moneta_core::Provider`] trait
//!
//! Steps 1–4 are pure and synchronous; only step 5 awaits the network.
//! Provider errors pass through untouched — presenting a rate-limit retry
//! hint to the user is the calling layer's job.

pub mod assistant;
pub mod prompt;
pub mod simulation;

pub use assistant::{Assistant, AssistantReply};
pub use prompt::{ADVISOR_POLICY, HISTORY_WINDOW, build_prompt};
pub use simulation::{ToolOutcome, run_intent};
