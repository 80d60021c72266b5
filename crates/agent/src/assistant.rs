//! The assistant pipeline — one call per user utterance.
//!
//! Detection, simulation, retrieval, and assembly are pure; the only await
//! point is the provider call at the end. A missing knowledge base degrades
//! to an empty context here (the retriever itself reports it as an error;
//! the decision to continue belongs to this orchestrating layer).

use std::sync::Arc;

use moneta_core::error::{Error, RetrievalError};
use moneta_core::message::Conversation;
use moneta_core::provider::{CompletionRequest, Provider};
use moneta_retrieval::{DEFAULT_TOP_K, Retrieval, Retriever, ScoredChunk};
use moneta_tools::detect;
use tracing::{info, warn};

use crate::prompt::build_prompt;
use crate::simulation::{ToolOutcome, run_intent};

/// The end-to-end pipeline. Stateless between calls; conversations are
/// owned by the caller.
pub struct Assistant {
    provider: Arc<dyn Provider>,
    retriever: Retriever,
    model: String,
    top_k: usize,
}

/// One produced reply, with the intermediate artifacts callers may want to
/// surface for debugging (retrieved chunks, simulation block).
#[derive(Debug)]
pub struct AssistantReply {
    /// The generated answer text.
    pub answer: String,
    /// The scored chunks that backed the context block.
    pub ranked: Vec<ScoredChunk>,
    /// What the simulation layer did for this utterance.
    pub outcome: ToolOutcome,
}

impl Assistant {
    /// Create an assistant over a provider and a retriever.
    pub fn new(
        provider: Arc<dyn Provider>,
        retriever: Retriever,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            retriever,
            model: model.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override how many chunks are retrieved per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Produce one reply for `user_message`.
    ///
    /// `conversation` must already contain the current user turn (the
    /// history window in the prompt includes it); the caller appends the
    /// returned answer as the assistant turn afterwards.
    ///
    /// Provider errors — including the rate-limit condition — propagate
    /// untouched for the calling layer to render.
    pub async fn respond(
        &self,
        user_message: &str,
        conversation: &Conversation,
    ) -> Result<AssistantReply, Error> {
        let retrieval = match self.retriever.retrieve(user_message, self.top_k) {
            Ok(retrieval) => retrieval,
            Err(RetrievalError::CorpusUnavailable { path, reason }) => {
                warn!(
                    path = %path.display(),
                    %reason,
                    "knowledge base unavailable, answering without context"
                );
                Retrieval::empty()
            }
        };

        let intent = detect(user_message);
        let outcome = run_intent(&intent);

        let prompt = build_prompt(
            user_message,
            &retrieval.context,
            &conversation.turns,
            outcome.text(),
        );

        let response = self
            .provider
            .complete(CompletionRequest {
                model: self.model.clone(),
                prompt,
            })
            .await?;

        info!(
            provider = self.provider.name(),
            model = %response.model,
            chunks = retrieval.ranked.len(),
            tool_fired = outcome.text().is_some(),
            answer_len = response.text.len(),
            "reply generated"
        );

        Ok(AssistantReply {
            answer: response.text,
            ranked: retrieval.ranked,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use moneta_core::error::ProviderError;
    use moneta_core::provider::CompletionResponse;
    use std::fs;
    use std::sync::Mutex;

    /// Records every prompt it receives and answers with canned text.
    struct RecordingProvider {
        prompts: Mutex<Vec<String>>,
        reply: String,
    }

    impl RecordingProvider {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            self.prompts.lock().unwrap().push(request.prompt);
            Ok(CompletionResponse {
                text: self.reply.clone(),
                model: request.model,
            })
        }
    }

    /// Always rate-limited.
    struct ThrottledProvider;

    #[async_trait]
    impl Provider for ThrottledProvider {
        fn name(&self) -> &str {
            "throttled"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Err(ProviderError::RateLimited {
                retry_after_secs: 60,
            })
        }
    }

    fn corpus_dir() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("reserva.md"),
            "A reserva de emergência cobre gastos fixos em meses difíceis.",
        )
        .unwrap();
        tmp
    }

    #[tokio::test]
    async fn reply_carries_answer_and_retrieved_chunks() {
        let provider = RecordingProvider::new("Resposta gerada.");
        let tmp = corpus_dir();
        let assistant = Assistant::new(
            provider.clone(),
            Retriever::new(tmp.path()),
            "test-model",
        );

        let mut conv = Conversation::new();
        conv.push_user("como funciona a reserva de emergência?");
        let reply = assistant
            .respond("como funciona a reserva de emergência?", &conv)
            .await
            .unwrap();

        assert_eq!(reply.answer, "Resposta gerada.");
        assert_eq!(reply.ranked.len(), 1);
        assert!(provider.last_prompt().contains("reserva de emergência cobre"));
    }

    #[tokio::test]
    async fn simulation_block_lands_in_the_prompt() {
        let provider = RecordingProvider::new("ok");
        let tmp = corpus_dir();
        let assistant = Assistant::new(
            provider.clone(),
            Retriever::new(tmp.path()),
            "test-model",
        );

        let mut conv = Conversation::new();
        conv.push_user("Simule 1000 com 2% ao mês por 12 meses");
        let reply = assistant
            .respond("Simule 1000 com 2% ao mês por 12 meses", &conv)
            .await
            .unwrap();

        assert!(matches!(reply.outcome, ToolOutcome::Report(_)));
        let prompt = provider.last_prompt();
        assert!(prompt.contains("Resultados de cálculo (validados pelo sistema):"));
        assert!(prompt.contains("1268.24"));
    }

    #[tokio::test]
    async fn missing_corpus_degrades_to_empty_context() {
        let provider = RecordingProvider::new("ok");
        let assistant = Assistant::new(
            provider.clone(),
            Retriever::new("/nonexistent/knowledge_base"),
            "test-model",
        );

        let mut conv = Conversation::new();
        conv.push_user("oi, tudo bem?");
        let reply = assistant.respond("oi, tudo bem?", &conv).await.unwrap();

        assert!(reply.ranked.is_empty());
        assert!(provider.last_prompt().contains("(vazio)"));
    }

    #[tokio::test]
    async fn provider_errors_propagate_untouched() {
        let tmp = corpus_dir();
        let assistant = Assistant::new(
            Arc::new(ThrottledProvider),
            Retriever::new(tmp.path()),
            "test-model",
        );

        let mut conv = Conversation::new();
        conv.push_user("oi");
        let err = assistant.respond("oi", &conv).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::RateLimited {
                retry_after_secs: 60
            })
        ));
    }

    #[tokio::test]
    async fn follow_up_for_missing_numbers_reaches_the_prompt() {
        let provider = RecordingProvider::new("ok");
        let tmp = corpus_dir();
        let assistant = Assistant::new(
            provider.clone(),
            Retriever::new(tmp.path()),
            "test-model",
        );

        let mut conv = Conversation::new();
        conv.push_user("quanto rende 1000 de juros?");
        let reply = assistant
            .respond("quanto rende 1000 de juros?", &conv)
            .await
            .unwrap();

        assert!(matches!(reply.outcome, ToolOutcome::NeedsInput(_)));
        assert!(provider.last_prompt().contains("taxa mensal"));
    }
}
