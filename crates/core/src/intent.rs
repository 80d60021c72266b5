//! Detected intent of a user utterance.
//!
//! The detector classifies each utterance into one of two simulation
//! intents (or none) and extracts whatever numeric arguments it can find.
//! Every argument field is optional: an unset field means the user did not
//! supply that number, which is a normal outcome the caller answers with a
//! clarifying question — never an error.

use serde::{Deserialize, Serialize};

/// The classified purpose of a user utterance.
///
/// A closed variant set so every consumer matches exhaustively; there is no
/// "unknown tool" state to defend against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum Intent {
    /// No simulation keywords matched.
    None,
    /// A compound-interest projection was requested.
    CompoundInterest(CompoundInterestArgs),
    /// An emergency-fund runway estimate was requested.
    EmergencyFund(EmergencyFundArgs),
}

/// Arguments for a compound-interest projection.
///
/// Positional extraction: first number in the utterance → initial amount,
/// second → monthly rate (decimal fraction), third → month count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestArgs {
    pub initial_amount: Option<f64>,
    pub monthly_rate: Option<f64>,
    pub months: Option<i32>,
}

impl CompoundInterestArgs {
    /// Whether every argument was supplied.
    pub fn is_complete(&self) -> bool {
        self.initial_amount.is_some() && self.monthly_rate.is_some() && self.months.is_some()
    }

    /// User-facing labels of the fields still missing, in positional order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.initial_amount.is_none() {
            missing.push("valor inicial");
        }
        if self.monthly_rate.is_none() {
            missing.push("taxa mensal");
        }
        if self.months.is_none() {
            missing.push("quantidade de meses");
        }
        missing
    }
}

/// Arguments for an emergency-fund runway estimate.
///
/// Positional extraction: first number → monthly expense, second → reserve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFundArgs {
    pub monthly_expense: Option<f64>,
    pub reserve_amount: Option<f64>,
}

impl EmergencyFundArgs {
    /// Whether every argument was supplied.
    pub fn is_complete(&self) -> bool {
        self.monthly_expense.is_some() && self.reserve_amount.is_some()
    }

    /// User-facing labels of the fields still missing, in positional order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.monthly_expense.is_none() {
            missing.push("gasto mensal");
        }
        if self.reserve_amount.is_none() {
            missing.push("valor da reserva");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_args_report_no_missing_fields() {
        let args = CompoundInterestArgs {
            initial_amount: Some(1000.0),
            monthly_rate: Some(0.02),
            months: Some(12),
        };
        assert!(args.is_complete());
        assert!(args.missing_fields().is_empty());
    }

    #[test]
    fn missing_fields_named_in_positional_order() {
        let args = CompoundInterestArgs {
            initial_amount: Some(1000.0),
            monthly_rate: None,
            months: None,
        };
        assert!(!args.is_complete());
        assert_eq!(
            args.missing_fields(),
            vec!["taxa mensal", "quantidade de meses"]
        );
    }

    #[test]
    fn emergency_fund_missing_fields() {
        let args = EmergencyFundArgs {
            monthly_expense: None,
            reserve_amount: Some(8000.0),
        };
        assert_eq!(args.missing_fields(), vec!["gasto mensal"]);
    }

    #[test]
    fn intent_serialization_is_tagged() {
        let intent = Intent::EmergencyFund(EmergencyFundArgs {
            monthly_expense: Some(2500.0),
            reserve_amount: Some(8000.0),
        });
        let json = serde_json::to_string(&intent).unwrap();
        assert!(json.contains(r#""tool":"emergency_fund""#));
    }
}
