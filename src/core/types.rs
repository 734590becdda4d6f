use std::str::FromStr;

use serde::Serialize;

use super::error::SimulationError;

pub const MONTHS_PER_RUN: u32 = 12;
pub const MIN_RETURN_PERCENT: f64 = -8.0;
pub const MAX_RETURN_PERCENT: f64 = 15.0;

/// Visual classification of a gain or loss figure.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Gain,
    Loss,
}

impl Outcome {
    /// Zero counts as a gain.
    pub fn of(value: f64) -> Self {
        if value < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Gain
        }
    }
}

/// A validated starting balance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationInput {
    initial_amount: f64,
}

impl SimulationInput {
    pub fn new(initial_amount: f64) -> Result<Self, SimulationError> {
        if !initial_amount.is_finite() {
            return Err(SimulationError::invalid("amount must be a finite number"));
        }
        if initial_amount <= 0.0 {
            return Err(SimulationError::invalid("amount must be > 0"));
        }
        Ok(Self { initial_amount })
    }

    pub fn initial_amount(&self) -> f64 {
        self.initial_amount
    }
}

impl FromStr for SimulationInput {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SimulationError::invalid("amount is missing"));
        }
        let amount = trimmed
            .parse::<f64>()
            .map_err(|_| SimulationError::invalid(format!("`{trimmed}` is not a number")))?;
        Self::new(amount)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthResult {
    pub month: u32,
    pub start_balance: f64,
    pub percent: f64,
    pub gain_loss: f64,
    pub end_balance: f64,
    /// Classification of `gain_loss`, stored so renderers never recompute it.
    pub outcome: Outcome,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub final_balance: f64,
    pub total_gain: f64,
    pub total_return_percent: f64,
}

impl SimulationSummary {
    pub fn outcome(&self) -> Outcome {
        Outcome::of(self.total_gain)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub initial_amount: f64,
    pub months: Vec<MonthResult>,
    pub summary: SimulationSummary,
}
