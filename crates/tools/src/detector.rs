//! Keyword intent detector with positional argument extraction.
//!
//! A best-effort heuristic, not a parser: the utterance is lower-cased and
//! matched against localized keyword sets; every decimal-looking token is
//! then pulled out left-to-right and assigned to argument slots purely by
//! position. A token that fails to parse leaves its slot unset without
//! shifting the others, so "not enough numbers" and "malformed number" look
//! identical to the caller — both are answered with a clarifying question.

use std::sync::OnceLock;

use moneta_core::intent::{CompoundInterestArgs, EmergencyFundArgs, Intent};
use regex_lite::Regex;
use tracing::debug;

/// Keywords that trigger a compound-interest simulation.
const COMPOUND_INTEREST_KEYWORDS: &[&str] = &[
    "juros",
    "juros compostos",
    "rendimento",
    "montante",
    "simule",
    "simular",
];

/// Keywords that trigger an emergency-fund simulation.
const EMERGENCY_FUND_KEYWORDS: &[&str] = &[
    "reserva de emergência",
    "reserva emergencia",
    "emergência",
    "emergencia",
];

/// Permissive numeric-literal pattern: a digit followed by any run of
/// digits, dots, and commas. Separator disambiguation happens later in
/// [`parse_decimal`].
fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d[\d.,]*").expect("static pattern compiles"))
}

/// Classify an utterance and extract its numeric arguments.
///
/// Compound-interest keywords are tested first; emergency-fund keywords
/// only when none matched. Argument slots, in order:
/// - compound interest: initial amount, monthly rate, month count
/// - emergency fund: monthly expense, reserve amount
///
/// A rate greater than 1 is read as a percentage and divided by 100
/// ("2" means 2%, "0.02" means an already-decimal 2%). The month count is
/// float-parsed and truncated toward zero.
pub fn detect(utterance: &str) -> Intent {
    let text = utterance.to_lowercase();

    if contains_any(&text, COMPOUND_INTEREST_KEYWORDS) {
        let numbers = extract_numbers(&text);
        let args = CompoundInterestArgs {
            initial_amount: numbers.first().and_then(|t| parse_decimal(t)),
            monthly_rate: numbers
                .get(1)
                .and_then(|t| parse_decimal(t))
                .map(normalize_rate),
            months: numbers
                .get(2)
                .and_then(|t| parse_decimal(t))
                .map(|m| m as i32),
        };
        debug!(?args, "detected compound-interest intent");
        return Intent::CompoundInterest(args);
    }

    if contains_any(&text, EMERGENCY_FUND_KEYWORDS) {
        let numbers = extract_numbers(&text);
        let args = EmergencyFundArgs {
            monthly_expense: numbers.first().and_then(|t| parse_decimal(t)),
            reserve_amount: numbers.get(1).and_then(|t| parse_decimal(t)),
        };
        debug!(?args, "detected emergency-fund intent");
        return Intent::EmergencyFund(args);
    }

    Intent::None
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// All decimal-looking tokens, in left-to-right order.
fn extract_numbers(text: &str) -> Vec<&str> {
    number_pattern().find_iter(text).map(|m| m.as_str()).collect()
}

/// Parse a numeric token accepting Brazilian and plain notations:
/// "1.234,56", "1234,56", and "1234.56" all mean 1234.56.
///
/// Exactly one comma ⇒ dots are group separators and the comma is the
/// decimal separator; otherwise commas become dots (two or more commas
/// therefore produce an unparseable token, i.e. `None`).
fn parse_decimal(token: &str) -> Option<f64> {
    let token = token.trim();
    let normalized = if token.matches(',').count() == 1 {
        token.replace('.', "").replace(',', ".")
    } else {
        token.replace(',', ".")
    };
    normalized.parse().ok()
}

/// Rates above 1 arrive as percentages.
fn normalize_rate(rate: f64) -> f64 {
    if rate > 1.0 { rate / 100.0 } else { rate }
}
