//! Runs a detected intent through the calculators and renders the outcome.
//!
//! Three user-visible shapes come out of here, all plain Portuguese text
//! destined for the prompt's calculation block:
//! - a **report** with the system-validated numbers,
//! - a **follow-up** naming exactly the fields the user still owes us,
//! - a **rejection** when the extracted numbers violate a precondition
//!   (rendered as a message, never propagated as a crash).

use moneta_core::error::SimulationError;
use moneta_core::intent::Intent;
use moneta_tools::simulations::{compound_interest, emergency_fund_coverage};
use tracing::debug;

/// What happened when the detected intent was run.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The utterance asked for no simulation.
    NotTriggered,
    /// A simulation ran; the report carries system-validated numbers.
    Report(String),
    /// A simulation was requested but numbers are missing; the text asks
    /// for exactly the absent fields.
    NeedsInput(String),
    /// The extracted numbers violated a calculator precondition.
    Rejected(String),
}

impl ToolOutcome {
    /// The block to hand to the prompt assembler, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ToolOutcome::NotTriggered => None,
            ToolOutcome::Report(t) | ToolOutcome::NeedsInput(t) | ToolOutcome::Rejected(t) => {
                Some(t)
            }
        }
    }
}

/// Run the calculator matching `intent`, if any.
pub fn run_intent(intent: &Intent) -> ToolOutcome {
    match intent {
        Intent::None => ToolOutcome::NotTriggered,

        Intent::CompoundInterest(args) => {
            let (Some(initial), Some(rate), Some(months)) =
                (args.initial_amount, args.monthly_rate, args.months)
            else {
                return ToolOutcome::NeedsInput(format!(
                    "Para simular juros compostos ainda preciso de: {}.\n\
                     Exemplo: `Simule 1000 com 2% ao mês por 12 meses`.",
                    args.missing_fields().join(", ")
                ));
            };

            match compound_interest(initial, rate, months) {
                Ok(result) => {
                    debug!(final_amount = result.final_amount, "compound-interest simulation ran");
                    ToolOutcome::Report(format!(
                        "- Simulação: juros compostos\n\
                         - Aporte inicial: R$ {initial:.2}\n\
                         - Taxa mensal: {:.2}%\n\
                         - Período: {months} meses\n\
                         - Montante estimado: R$ {:.2}\n\
                         - Juros no período: R$ {:.2}",
                        rate * 100.0,
                        result.final_amount,
                        result.interest_earned,
                    ))
                }
                Err(SimulationError::InvalidArgument(reason)) => {
                    ToolOutcome::Rejected(invalid_numbers_message(&reason))
                }
            }
        }

        Intent::EmergencyFund(args) => {
            let (Some(expense), Some(reserve)) = (args.monthly_expense, args.reserve_amount)
            else {
                return ToolOutcome::NeedsInput(format!(
                    "Para calcular a reserva de emergência ainda preciso de: {}.\n\
                     Exemplo: `Reserva de emergência: gasto 2500 e tenho 8000`.",
                    args.missing_fields().join(", ")
                ));
            };

            match emergency_fund_coverage(expense, reserve) {
                Ok(months) => {
                    debug!(coverage_months = months, "emergency-fund simulation ran");
                    ToolOutcome::Report(format!(
                        "- Simulação: reserva de emergência\n\
                         - Gasto mensal: R$ {expense:.2}\n\
                         - Reserva atual: R$ {reserve:.2}\n\
                         - Cobertura estimada: {months:.1} meses",
                    ))
                }
                Err(SimulationError::InvalidArgument(reason)) => {
                    ToolOutcome::Rejected(invalid_numbers_message(&reason))
                }
            }
        }
    }
}

fn invalid_numbers_message(reason: &str) -> String {
    format!("Não consegui calcular: preciso de números válidos ({reason}). Pode conferir os valores?")
}
