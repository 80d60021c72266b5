//! # Moneta Retrieval
//!
//! Lexical retrieval over a local knowledge-base directory.
//!
//! The corpus (a handful of Markdown documents) is re-read and re-chunked
//! on every call — no persistent index, no cache. Chunks are scored against
//! the query by token overlap and the best ones are concatenated into a
//! context block for the prompt assembler.
//!
//! Everything here is synchronous: the directory scan completes fully
//! before `retrieve` returns, and no shared state is mutated, so concurrent
//! callers need no coordination.

pub mod corpus;
pub mod text;

use std::collections::HashSet;
use std::path::PathBuf;

use moneta_core::error::RetrievalError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use text::DEFAULT_MAX_CHUNK_CHARS;

/// Default number of chunks kept per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Visible separator between chunks in the assembled context.
pub const CHUNK_SEPARATOR: &str = "\n\n---\n\n";

/// A chunk together with its overlap score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Count of chunk tokens (with repetition) present in the query.
    pub score: usize,
    /// The raw chunk text.
    pub text: String,
}

/// The outcome of one retrieval call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Retrieval {
    /// Kept chunks joined by [`CHUNK_SEPARATOR`], ranked order. Empty when
    /// nothing scored above zero.
    pub context: String,
    /// Kept chunks with their scores, best first.
    pub ranked: Vec<ScoredChunk>,
}

impl Retrieval {
    /// An empty retrieval — what callers degrade to when the corpus is
    /// unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// The lexical retriever. Stateless — create one and reuse it.
#[derive(Debug, Clone)]
pub struct Retriever {
    corpus_dir: PathBuf,
    max_chunk_chars: usize,
}

impl Retriever {
    /// Create a retriever over the given corpus directory.
    pub fn new(corpus_dir: impl Into<PathBuf>) -> Self {
        Self {
            corpus_dir: corpus_dir.into(),
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }

    /// Override the maximum chunk size.
    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars;
        self
    }

    pub fn corpus_dir(&self) -> &std::path::Path {
        &self.corpus_dir
    }

    /// Retrieve the `top_k` chunks most relevant to `query`.
    ///
    /// Chunks scoring zero are discarded entirely; ties keep corpus order
    /// (the sort is stable). Returns [`RetrievalError::CorpusUnavailable`]
    /// when the corpus directory cannot be scanned — degrading to an empty
    /// context is the caller's decision, not this crate's.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Retrieval, RetrievalError> {
        let raw = corpus::read_corpus(&self.corpus_dir)?;
        let chunks = text::chunk_paragraphs(&raw, self.max_chunk_chars);
        let query_tokens: HashSet<String> = text::tokenize(query).into_iter().collect();

        let mut scored: Vec<ScoredChunk> = chunks
            .into_iter()
            .filter_map(|chunk| {
                let score = text::tokenize(&chunk)
                    .iter()
                    .filter(|token| query_tokens.contains(token.as_str()))
                    .count();
                (score > 0).then_some(ScoredChunk { score, text: chunk })
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(top_k);

        debug!(
            kept = scored.len(),
            top_score = scored.first().map(|c| c.score).unwrap_or(0),
            "retrieval ranked"
        );

        let context = scored
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);

        Ok(Retrieval {
            context,
            ranked: scored,
        })
    }
}
