//! Prompt assembly — deterministic string composition, no I/O.
//!
//! Section order is fixed: advisor policy, knowledge-base context, recent
//! history, optional system-validated calculation block, then the literal
//! user message. Empty sections render a placeholder instead of vanishing,
//! so the model always sees the same scaffold.

use moneta_core::message::ChatTurn;

/// How many of the most recent turns make it into the prompt.
pub const HISTORY_WINDOW: usize = 6;

/// The fixed behavioral policy for the advisor persona.
pub const ADVISOR_POLICY: &str = "\
Você é um consultor financeiro amigável e educativo.
Você ajuda o usuário a entender opções e tomar decisões com segurança.

Regras:
- Tom: acolhedor, claro e prático (nível iniciante).
- Se faltarem dados, faça perguntas curtas: objetivo, prazo, valor, tolerância a risco.
- Sempre responda com esta estrutura:

1) Resumo em 1-2 linhas
2) O que eu entendi do seu objetivo
3) Opções (2 a 4) com prós e contras
4) Dica de tomada de decisão (um critério simples)
5) Próximo passo (uma ação curta)

Limites:
- Conteúdo educativo, não é recomendação financeira profissional.
- Nunca peça dados sensíveis (senhas, número de cartão, agência/conta).

Quando houver resultados de cálculo validados pelo sistema, use-os explicitamente e explique a conta de forma simples.";

/// Assemble the final prompt for the generative model.
///
/// `history` is the full conversation so far, current user turn included;
/// only the last [`HISTORY_WINDOW`] turns are rendered, in original order.
/// `calc_result` is included verbatim under a "system-validated" label so
/// the model treats those numbers as ground truth instead of recomputing.
pub fn build_prompt(
    user_message: &str,
    kb_context: &str,
    history: &[ChatTurn],
    calc_result: Option<&str>,
) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let history_text = history[start..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role.prompt_label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");

    let kb_block = if kb_context.is_empty() {
        "(vazio)"
    } else {
        kb_context
    };
    let history_block = if history_text.is_empty() {
        "(sem histórico)"
    } else {
        &history_text
    };

    let calc_block = calc_result
        .map(|calc| format!("\n\nResultados de cálculo (validados pelo sistema):\n{calc}\n"))
        .unwrap_or_default();

    format!(
        "{ADVISOR_POLICY}\n\n\
         Base de conhecimento (use se for relevante):\n{kb_block}\n\n\
         Histórico recente:\n{history_block}\n\
         {calc_block}\n\
         Pergunta do usuário:\n{user_message}"
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_appear_in_fixed_order() {
        let prompt = build_prompt("Como invisto 100 por mês?", "trecho da base", &[], None);

        let policy = prompt.find("consultor financeiro").unwrap();
        let kb = prompt.find("Base de conhecimento").unwrap();
        let hist = prompt.find("Histórico recente:").unwrap();
        let question = prompt.find("Pergunta do usuário:").unwrap();
        assert!(policy < kb && kb < hist && hist < question);
        assert!(prompt.ends_with("Como invisto 100 por mês?"));
    }

    #[test]
    fn empty_sections_render_placeholders() {
        let prompt = build_prompt("Oi", "", &[], None);
        assert!(prompt.contains("Base de conhecimento (use se for relevante):\n(vazio)"));
        assert!(prompt.contains("Histórico recente:\n(sem histórico)"));
    }

    #[test]
    fn no_calc_result_means_no_calc_block() {
        let prompt = build_prompt("Oi", "", &[], None);
        assert!(!prompt.contains("Resultados de cálculo"));
    }

    #[test]
    fn calc_result_included_verbatim_exactly_once() {
        let calc = "- Montante estimado: R$ 1268.24";
        let prompt = build_prompt("Oi", "", &[], Some(calc));
        assert_eq!(prompt.matches("Resultados de cálculo (validados pelo sistema):").count(), 1);
        assert!(prompt.contains(calc));
    }

    #[test]
    fn history_renders_role_labels() {
        let history = vec![
            ChatTurn::user("Quero guardar dinheiro"),
            ChatTurn::assistant("Ótimo objetivo!"),
        ];
        let prompt = build_prompt("E agora?", "", &history, None);
        assert!(prompt.contains("USER: Quero guardar dinheiro"));
        assert!(prompt.contains("ASSISTANT: Ótimo objetivo!"));
    }

    #[test]
    fn long_history_keeps_only_last_six_in_order() {
        let history: Vec<ChatTurn> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    ChatTurn::user(format!("pergunta {i}"))
                } else {
                    ChatTurn::assistant(format!("resposta {i}"))
                }
            })
            .collect();

        let prompt = build_prompt("final", "", &history, None);
        for i in 0..4 {
            assert!(!prompt.contains(&format!("pergunta {i}")) && !prompt.contains(&format!("resposta {i}")));
        }
        for i in 4..10 {
            let label = if i % 2 == 0 { format!("pergunta {i}") } else { format!("resposta {i}") };
            assert!(prompt.contains(&label), "turn {i} should be present");
        }
        // Original order preserved.
        let p4 = prompt.find("pergunta 4").unwrap();
        let p9 = prompt.find("resposta 9").unwrap();
        assert!(p4 < p9);
    }

    #[test]
    fn assembly_is_deterministic() {
        let history = vec![ChatTurn::user("a"), ChatTurn::assistant("b")];
        let one = build_prompt("x", "ctx", &history, Some("calc"));
        let two = build_prompt("x", "ctx", &history, Some("calc"));
        assert_eq!(one, two);
    }

    #[test]
    fn policy_contains_the_response_contract() {
        assert!(ADVISOR_POLICY.contains("1) Resumo"));
        assert!(ADVISOR_POLICY.contains("5) Próximo passo"));
        assert!(ADVISOR_POLICY.contains("dados sensíveis"));
    }
}
