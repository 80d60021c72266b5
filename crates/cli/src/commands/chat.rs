//! `moneta chat` — interactive or single-message chat mode.

use std::sync::Arc;

use moneta_agent::{Assistant, AssistantReply, ToolOutcome};
use moneta_config::AppConfig;
use moneta_core::error::{Error, ProviderError};
use moneta_core::message::Conversation;
use moneta_providers::GeminiProvider;
use moneta_retrieval::Retriever;
use tokio::io::{AsyncBufReadExt, BufReader};

const GREETING: &str =
    "Oi! Me diga seu objetivo (ex: guardar, quitar dívida, investir) e eu te ajudo \
     com opções e próximo passo 🙂";

pub async fn run(
    message: Option<String>,
    show_sources: bool,
    show_calc: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    let Some(api_key) = config.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    GEMINI_API_KEY=...   (recommended)");
        eprintln!("    MONETA_API_KEY=...   (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let provider = Arc::new(GeminiProvider::new(api_key));
    let retriever = Retriever::new(&config.corpus_dir).with_max_chunk_chars(config.max_chunk_chars);
    let assistant = Assistant::new(provider, retriever, &config.model).with_top_k(config.top_k);

    if let Some(msg) = message {
        // Single message mode
        let mut conv = Conversation::new();
        conv.push_user(&msg);

        let answer = ask(&assistant, &msg, &conv, show_sources, show_calc).await;
        println!("{answer}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Moneta — consultor financeiro educativo");
    println!();
    println!("  Modelo:  {}", config.model);
    println!("  Base:    {}", config.corpus_dir.display());
    println!();
    println!("  Digite sua dúvida e pressione Enter.");
    println!("  Digite 'sair' (ou 'exit') para encerrar.");
    println!();
    println!("  Moneta > {GREETING}");
    println!();

    let mut conv = Conversation::new();
    conv.push_assistant(GREETING);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    print_input_marker();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            print_input_marker();
            continue;
        }
        if matches!(line.as_str(), "sair" | "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        conv.push_user(&line);
        let answer = ask(&assistant, &line, &conv, show_sources, show_calc).await;

        println!();
        for out in answer.lines() {
            println!("  Moneta > {out}");
        }
        println!();
        conv.push_assistant(answer);

        print_input_marker();
    }

    println!();
    println!("  Até a próxima! 👋");
    println!();

    Ok(())
}

/// Run one turn and render failures as chat messages, so the session keeps
/// flowing even when the provider misbehaves.
async fn ask(
    assistant: &Assistant,
    user_message: &str,
    conversation: &Conversation,
    show_sources: bool,
    show_calc: bool,
) -> String {
    match assistant.respond(user_message, conversation).await {
        Ok(reply) => {
            print_debug_panels(&reply, show_sources, show_calc);
            reply.answer
        }
        Err(err) => render_failure(&err),
    }
}

fn print_debug_panels(reply: &AssistantReply, show_sources: bool, show_calc: bool) {
    if show_calc {
        if let Some(calc) = reply.outcome.text() {
            let label = match reply.outcome {
                ToolOutcome::Report(_) => "resultado do cálculo",
                ToolOutcome::NeedsInput(_) => "dados faltando",
                ToolOutcome::Rejected(_) => "entrada inválida",
                ToolOutcome::NotTriggered => unreachable!("text() is None"),
            };
            eprintln!("  [debug: {label}]");
            for line in calc.lines() {
                eprintln!("  | {line}");
            }
        }
    }

    if show_sources {
        if reply.ranked.is_empty() {
            eprintln!("  [debug: nenhum trecho relevante encontrado]");
        } else {
            for chunk in &reply.ranked {
                eprintln!("  [debug: trecho usado, score {}]", chunk.score);
            }
        }
    }
}

/// User-facing rendering of pipeline failures. The rate-limit case gets the
/// friendly wait-a-minute treatment; everything else is a generic apology
/// (details go to the log, not the chat).
fn render_failure(err: &Error) -> String {
    match err {
        Error::Provider(ProviderError::RateLimited { retry_after_secs }) => format!(
            "No momento atingi o limite de uso da API gratuita.\n\
             👉 Aguarde cerca de {retry_after_secs} segundos e tente novamente.\n\
             Enquanto isso, posso te ajudar a formular melhor a pergunta 🙂"
        ),
        other => {
            tracing::error!(error = %other, "pipeline failure");
            "Tive um erro técnico aqui. Tenta novamente mais tarde.".into()
        }
    }
}

fn print_input_marker() {
    use std::io::Write;
    print!("  Você > ");
    let _ = std::io::stdout().flush();
}
