//! `moneta search` — run the retriever alone and inspect chunk scores.

use moneta_config::AppConfig;
use moneta_retrieval::Retriever;

pub fn run(query: &str, top_k: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let retriever = Retriever::new(&config.corpus_dir).with_max_chunk_chars(config.max_chunk_chars);
    let retrieval = retriever
        .retrieve(query, top_k)
        .map_err(|e| format!("Retrieval failed: {e}"))?;

    if retrieval.is_empty() {
        println!("Nenhum trecho relevante encontrado.");
        return Ok(());
    }

    for (i, chunk) in retrieval.ranked.iter().enumerate() {
        println!("── Trecho {} (score {}) ──", i + 1, chunk.score);
        println!("{}", truncate_chars(&chunk.text, 1200));
        println!();
    }

    Ok(())
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
