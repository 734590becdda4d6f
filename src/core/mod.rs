mod engine;
mod error;
mod format;
mod types;

pub use engine::{EntropySource, UniformSource, simulate, simulate_amount};
pub use error::{INVALID_AMOUNT_MESSAGE, SimulationError};
pub use format::{format_percent, format_usd, render_table};
pub use types::{
    MAX_RETURN_PERCENT, MIN_RETURN_PERCENT, MONTHS_PER_RUN, MonthResult, Outcome, Simulation,
    SimulationInput, SimulationSummary,
};
