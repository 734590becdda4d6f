use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::error::SimulationError;
use super::types::{
    MAX_RETURN_PERCENT, MIN_RETURN_PERCENT, MONTHS_PER_RUN, MonthResult, Outcome, Simulation,
    SimulationInput, SimulationSummary,
};

/// Source of uniform draws in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

/// ChaCha-backed source, seeded from the OS or from a fixed seed for replays.
pub struct EntropySource {
    rng: ChaCha8Rng,
}

impl EntropySource {
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl UniformSource for EntropySource {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

pub fn simulate_amount<S: UniformSource>(
    initial_amount: f64,
    source: &mut S,
) -> Result<Simulation, SimulationError> {
    let input = SimulationInput::new(initial_amount)?;
    Ok(simulate(input, source))
}

/// Runs twelve compounding months starting from the validated input.
pub fn simulate<S: UniformSource>(input: SimulationInput, source: &mut S) -> Simulation {
    let initial_amount = input.initial_amount();
    let mut months = Vec::with_capacity(MONTHS_PER_RUN as usize);
    let mut balance = initial_amount;

    for month in 1..=MONTHS_PER_RUN {
        let step = run_month(month, balance, draw_percent(source));
        balance = step.end_balance;
        months.push(step);
    }

    let summary = summarize(initial_amount, balance);
    Simulation {
        initial_amount,
        months,
        summary,
    }
}

fn draw_percent<S: UniformSource>(source: &mut S) -> f64 {
    let u = clamp_unit(source.next_unit());
    let percent = MIN_RETURN_PERCENT + u * (MAX_RETURN_PERCENT - MIN_RETURN_PERCENT);
    // Rounding can push u * span onto the upper bound for u just below 1.
    if percent >= MAX_RETURN_PERCENT {
        just_below(MAX_RETURN_PERCENT)
    } else {
        percent
    }
}

fn clamp_unit(u: f64) -> f64 {
    if u.is_nan() || u < 0.0 {
        0.0
    } else if u >= 1.0 {
        just_below(1.0)
    } else {
        u
    }
}

fn run_month(month: u32, start_balance: f64, percent: f64) -> MonthResult {
    let gain_loss = start_balance * (percent / 100.0);
    let end_balance = start_balance + gain_loss;
    MonthResult {
        month,
        start_balance,
        percent,
        gain_loss,
        end_balance,
        outcome: Outcome::of(gain_loss),
    }
}

fn summarize(initial_amount: f64, final_balance: f64) -> SimulationSummary {
    let total_gain = final_balance - initial_amount;
    SimulationSummary {
        final_balance,
        total_gain,
        total_return_percent: (total_gain / initial_amount) * 100.0,
    }
}

// Largest f64 strictly below a positive finite value.
fn just_below(value: f64) -> f64 {
    f64::from_bits(value.to_bits() - 1)
}
