//! Financial simulations — pure, deterministic calculators.
//!
//! These never touch I/O and never panic on user input: precondition
//! violations come back as [`SimulationError::InvalidArgument`] and the
//! caller renders them as a "preciso de números válidos" reply.

use moneta_core::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Result of a compound-interest projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    /// Final amount after the whole period.
    pub final_amount: f64,
    /// Interest earned over the period (`final_amount - initial_amount`).
    pub interest_earned: f64,
}

/// Project an initial amount under monthly compound interest.
///
/// `monthly_rate` is a decimal fraction (0.02 = 2% per month).
///
/// Invariant: `final_amount = initial_amount * (1 + monthly_rate)^months`.
pub fn compound_interest(
    initial_amount: f64,
    monthly_rate: f64,
    months: i32,
) -> Result<CompoundInterestResult, SimulationError> {
    if initial_amount < 0.0 || monthly_rate < 0.0 || months < 0 {
        return Err(SimulationError::InvalidArgument(
            "valores não podem ser negativos".into(),
        ));
    }

    let final_amount = initial_amount * (1.0 + monthly_rate).powi(months);
    Ok(CompoundInterestResult {
        final_amount,
        interest_earned: final_amount - initial_amount,
    })
}

/// How many months of fixed expenses a reserve covers.
pub fn emergency_fund_coverage(
    monthly_expense: f64,
    reserve_amount: f64,
) -> Result<f64, SimulationError> {
    if monthly_expense <= 0.0 {
        return Err(SimulationError::InvalidArgument(
            "gasto mensal deve ser maior que zero".into(),
        ));
    }
    if reserve_amount < 0.0 {
        return Err(SimulationError::InvalidArgument(
            "reserva não pode ser negativa".into(),
        ));
    }

    Ok(reserve_amount / monthly_expense)
}
