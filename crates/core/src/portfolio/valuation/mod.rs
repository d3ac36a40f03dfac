mod valuation_calculator;
mod valuation_model;

pub use valuation_calculator::{day_change, summarize_positions};
pub use valuation_model::*;
