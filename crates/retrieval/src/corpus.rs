//! Knowledge-base corpus loading.
//!
//! The corpus is a flat directory of text documents. Every call re-reads
//! the directory — there is no cached index, so concurrent callers never
//! observe a stale corpus (and none share the scan cost).

use std::fs;
use std::path::{Path, PathBuf};

use moneta_core::error::RetrievalError;
use tracing::debug;

/// File extensions recognized as corpus documents.
const CORPUS_EXTENSIONS: &[&str] = &["md", "txt"];

/// Read every recognized document in `dir`, filename-sorted, each preceded
/// by a provenance header naming its source file.
///
/// A missing directory or an unreadable document is a
/// [`RetrievalError::CorpusUnavailable`]; no fallback corpus is synthesized.
pub fn read_corpus(dir: &Path) -> Result<String, RetrievalError> {
    let entries = fs::read_dir(dir).map_err(|e| RetrievalError::CorpusUnavailable {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| CORPUS_EXTENSIONS.contains(&ext))
        })
        .collect();

    // Sort for deterministic ordering
    files.sort();

    let mut parts = Vec::with_capacity(files.len());
    for path in &files {
        let content = fs::read_to_string(path).map_err(|e| RetrievalError::CorpusUnavailable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("documento");
        parts.push(format!("\n\n### Fonte: {name}\n{content}"));
    }

    debug!(documents = parts.len(), dir = %dir.display(), "corpus scan complete");
    Ok(parts.join("\n"))
}
