//! `moneta doctor` — diagnose configuration and knowledge-base health.

use moneta_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!();
    println!("  Moneta Doctor");
    println!();

    if config_path.exists() {
        println!("  [ok]   config file: {}", config_path.display());
    } else {
        println!("  [--]   config file: none (using defaults)");
    }

    if config.has_api_key() {
        println!("  [ok]   API key configured");
    } else {
        println!("  [FAIL] API key missing — set GEMINI_API_KEY or MONETA_API_KEY");
    }

    println!("  [ok]   model: {}", config.model);

    match count_documents(&config.corpus_dir) {
        Ok(0) => println!(
            "  [warn] knowledge base at {} has no documents (.md/.txt)",
            config.corpus_dir.display()
        ),
        Ok(n) => println!(
            "  [ok]   knowledge base: {} documents at {}",
            n,
            config.corpus_dir.display()
        ),
        Err(e) => println!(
            "  [FAIL] knowledge base unreadable at {}: {e}",
            config.corpus_dir.display()
        ),
    }

    println!();
    Ok(())
}

fn count_documents(dir: &std::path::Path) -> std::io::Result<usize> {
    let count = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "md" || ext == "txt")
        })
        .count();
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn counts_only_recognized_documents() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.md"), "x").unwrap();
        fs::write(tmp.path().join("b.txt"), "x").unwrap();
        fs::write(tmp.path().join("c.json"), "x").unwrap();

        assert_eq!(count_documents(tmp.path()).unwrap(), 2);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        assert!(count_documents(std::path::Path::new("/nonexistent/kb")).is_err());
    }
}
